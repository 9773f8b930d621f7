//! Dashboard: the active folder list

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Cell, Row, Table, TableState},
    Frame,
};

use crate::models::{Folder, SecurityLevel};
use crate::tui::app::App;

use super::{highlight, panel, render_message};

pub(crate) fn security_color(level: SecurityLevel) -> Color {
    match level {
        SecurityLevel::Standard => Color::White,
        SecurityLevel::Enhanced => Color::Yellow,
        SecurityLevel::Maximum => Color::Red,
    }
}

/// Table of folders shared with the storage screen
pub(crate) fn folder_table<'a>(folders: &[&'a Folder], title: String) -> Table<'a> {
    let widths = [
        Constraint::Min(20),    // Name
        Constraint::Length(10), // Type
        Constraint::Length(7),  // Items
        Constraint::Length(10), // Security
        Constraint::Length(12), // Created
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("Name").style(bold),
        Cell::from("Type").style(bold),
        Cell::from("Items").style(bold),
        Cell::from("Security").style(bold),
        Cell::from("Created").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let rows: Vec<Row> = folders
        .iter()
        .map(|folder| {
            Row::new(vec![
                Cell::from(folder.name.as_str()),
                Cell::from(folder.folder_type.to_string()),
                Cell::from(folder.item_count.to_string()),
                Cell::from(folder.security_level.to_string())
                    .style(Style::default().fg(security_color(folder.security_level))),
                Cell::from(folder.created_at.format("%Y-%m-%d").to_string()),
            ])
        })
        .collect();

    Table::new(rows, widths)
        .header(header)
        .block(panel(&title))
        .highlight_style(highlight())
        .highlight_symbol("▶ ")
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let cache = app.navigator.folders();
    let folders = app.navigator.visible_folders();
    let search = app.navigator.search();

    let title = if search.is_empty() {
        format!("Folders ({})", folders.len())
    } else {
        format!("Folders matching '{}' ({})", search, folders.len())
    };

    if folders.is_empty() {
        let message = if cache.is_loading() {
            "Loading folders..."
        } else if !search.is_empty() {
            "No folder matches the search."
        } else {
            "No folders yet. Press n to create one."
        };
        render_message(frame, area, &title, message);
        return;
    }

    let table = folder_table(&folders, title);
    let mut state = TableState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(table, area, &mut state);
}
