//! Secure document viewer
//!
//! Shows one item until the countdown runs out or the user locks it.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Wrap},
    Frame,
};

use crate::models::{Folder, Item};
use crate::tui::app::App;

use super::panel;

pub fn render(frame: &mut Frame, app: &App, folder: &Folder, item: &Item, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    let mut lines = vec![
        Line::from(Span::styled(
            item.title.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} in {}", item.item_type, folder.name),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];
    if !item.description.is_empty() {
        lines.push(Line::from(item.description.as_str()));
        lines.push(Line::from(""));
    }
    match (&item.content, &item.file_url) {
        (Some(content), _) => {
            lines.extend(content.lines().map(|l| Line::from(l.to_string())));
        }
        (None, Some(url)) => {
            lines.push(Line::from(vec![
                Span::raw("File: "),
                Span::styled(url.as_str(), Style::default().fg(Color::Cyan)),
            ]));
        }
        (None, None) => lines.push(Line::from("Nothing to show.")),
    }
    if let Some(size) = &item.file_size {
        lines.push(Line::from(""));
        let mut meta = format!("Size: {}", size);
        if let Some(duration) = &item.duration {
            meta.push_str(&format!("  Length: {}", duration));
        }
        lines.push(Line::from(Span::styled(meta, Style::default().fg(Color::DarkGray))));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(panel("Encrypted document")),
        chunks[0],
    );

    let total = app.navigator.config().viewer_lock_seconds;
    let remaining = app.navigator.viewer_remaining();
    let ratio = if total == 0 {
        0.0
    } else {
        f64::from(remaining) / f64::from(total)
    };
    let color = if remaining <= 10 {
        Color::Red
    } else {
        Color::Green
    };
    let gauge = Gauge::default()
        .block(panel("Auto-lock"))
        .gauge_style(Style::default().fg(color))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("Locks in {}s", remaining));
    frame.render_widget(gauge, chunks[1]);
}
