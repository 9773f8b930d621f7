//! Yes/no prompt
//!
//! Guards sign-out, item deletion and permanent folder deletion. Only y
//! confirms; n and Esc both back out.

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::layout::centered_rect_fixed;

/// `destructive` paints the prompt red for actions that cannot be undone
pub fn render(frame: &mut Frame, title: &str, message: &str, destructive: bool) {
    let accent = if destructive { Color::Red } else { Color::Yellow };
    let width = (message.chars().count() as u16 + 6).clamp(36, 60);
    let area = centered_rect_fixed(width, 7, frame.area());

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent));

    let body = vec![
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(accent).add_modifier(Modifier::BOLD)),
            Span::raw(" confirm   "),
            Span::styled("n", Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
            Span::raw(" keep"),
        ]),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}
