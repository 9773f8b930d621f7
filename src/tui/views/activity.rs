//! Login activity

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Cell, Row, Table, TableState},
    Frame,
};

use crate::activity::{ActivityFilter, ActivityStatus};
use crate::tui::app::App;

use super::{highlight, panel, render_message};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.navigator.activity();
    let entries = state.visible();
    let title = format!("Login activity: {} (f to change)", state.filter);

    if entries.is_empty() {
        let message = if state.loading {
            "Loading..."
        } else if state.filter == ActivityFilter::All {
            "No sign-in activity recorded."
        } else {
            "No entries match this filter."
        };
        render_message(frame, area, &title, message);
        return;
    }

    let widths = [
        Constraint::Length(17), // When
        Constraint::Min(30),    // Action
        Constraint::Length(16), // Device
        Constraint::Length(11), // Status
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("When").style(bold),
        Cell::from("Action").style(bold),
        Cell::from("Device").style(bold),
        Cell::from("Status").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow));

    let rows: Vec<Row> = entries
        .iter()
        .map(|entry| {
            let status = entry.status();
            let color = match status {
                ActivityStatus::Success => Color::Green,
                ActivityStatus::Suspicious => Color::Red,
            };
            Row::new(vec![
                Cell::from(
                    entry
                        .timestamp
                        .with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M")
                        .to_string(),
                ),
                Cell::from(entry.action()),
                Cell::from(entry.device.as_str()),
                Cell::from(status.to_string()).style(Style::default().fg(color)),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(&title))
        .highlight_style(highlight());

    let mut table_state = TableState::default();
    table_state.select(Some(app.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}
