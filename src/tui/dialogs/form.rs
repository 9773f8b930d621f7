//! Form dialog
//!
//! Hosts every multi-field form: sign-up, new folder, notes, attachments
//! and the dashboard search.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::OpenForm;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::FormWidget;

pub fn render(frame: &mut Frame, form: &OpenForm) {
    let fields = form.state.len() as u16;
    // Two rows per field, the error line, hints and the border
    let height = fields * 2 + 5;
    let area = centered_rect_fixed(64, height, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(form.kind.title())
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fields_area = Rect::new(
        inner.x + 1,
        inner.y + 1,
        inner.width.saturating_sub(2),
        fields * 2,
    )
    .intersection(inner);
    frame.render_widget(FormWidget::new(&form.state), fields_area);

    let footer_y = inner.y + 1 + fields * 2;
    if let Some(error) = &form.state.error {
        let error_area =
            Rect::new(inner.x + 1, footer_y, inner.width.saturating_sub(2), 1).intersection(inner);
        frame.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            error_area,
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Next  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    let hints_area = Rect::new(
        inner.x + 1,
        footer_y + 1,
        inner.width.saturating_sub(2),
        1,
    )
    .intersection(inner);
    if !hints_area.is_empty() {
        frame.render_widget(Paragraph::new(hints), hints_area);
    }
}
