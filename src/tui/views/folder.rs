//! Folder screens: the detail page and the contents browser
//!
//! Both list the folder's items newest first. The detail page adds a
//! summary of the folder itself.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::models::{Folder, ItemType};
use crate::tui::app::App;

use super::dashboard::security_color;
use super::{highlight, panel, render_message};

fn type_color(item_type: ItemType) -> Color {
    match item_type {
        ItemType::Note => Color::White,
        ItemType::Photo => Color::Magenta,
        ItemType::Scan => Color::Blue,
        ItemType::Voice => Color::Green,
    }
}

pub fn render_detail(frame: &mut Frame, app: &App, folder: &Folder, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    let summary = vec![
        Line::from(vec![
            Span::styled(
                folder.name.as_str(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(folder.folder_type.to_string(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::raw(format!("{} items  ", folder.item_count)),
            Span::raw("Security: "),
            Span::styled(
                folder.security_level.to_string(),
                Style::default().fg(security_color(folder.security_level)),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(summary).block(panel("Folder")), chunks[0]);

    render_items(frame, app, "Recent items", chunks[1]);
}

pub fn render_contents(frame: &mut Frame, app: &App, folder: &Folder, area: Rect) {
    render_items(frame, app, &folder.name, area);
}

fn render_items(frame: &mut Frame, app: &App, title: &str, area: Rect) {
    let list = app.navigator.items();
    if list.items.is_empty() {
        let message = if list.loading {
            "Loading items..."
        } else {
            "This folder is empty. Press n for a note or a to attach a file."
        };
        render_message(frame, area, title, message);
        return;
    }

    let widths = [
        Constraint::Length(7),  // Type
        Constraint::Min(20),    // Title
        Constraint::Length(10), // Size
        Constraint::Length(8),  // Length
        Constraint::Length(17), // Added
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("Type").style(bold),
        Cell::from("Title").style(bold),
        Cell::from("Size").style(bold),
        Cell::from("Length").style(bold),
        Cell::from("Added").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow));

    let rows: Vec<Row> = list
        .items
        .iter()
        .map(|item| {
            Row::new(vec![
                Cell::from(item.item_type.to_string())
                    .style(Style::default().fg(type_color(item.item_type))),
                Cell::from(item.title.as_str()),
                Cell::from(item.file_size.clone().unwrap_or_default()),
                Cell::from(item.duration.clone().unwrap_or_default()),
                Cell::from(item.created_at.format("%Y-%m-%d %H:%M").to_string()),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(&format!("{} ({})", title, list.items.len())))
        .highlight_style(highlight())
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(table, area, &mut state);
}
