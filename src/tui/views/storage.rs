//! Storage management: hidden, archived and deleted folders

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{TableState, Tabs},
    Frame,
};

use crate::app::navigator::StorageState;
use crate::models::FolderStatus;
use crate::tui::app::App;

use super::dashboard::folder_table;
use super::{panel, render_message};

fn tab_label(status: FolderStatus) -> &'static str {
    match status {
        FolderStatus::Hidden => "Hidden",
        FolderStatus::Archived => "Archived",
        FolderStatus::Deleted => "Deleted",
        FolderStatus::Active => "Active",
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let storage = app.navigator.storage();
    let selected_tab = StorageState::TABS
        .iter()
        .position(|t| *t == storage.tab)
        .unwrap_or(0);

    let tabs = Tabs::new(StorageState::TABS.iter().map(|t| tab_label(*t)))
        .block(panel("Storage"))
        .select(selected_tab)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, chunks[0]);

    let folders: Vec<_> = storage.folders.folders().iter().collect();
    let title = format!("{} folders ({})", tab_label(storage.tab), folders.len());

    if folders.is_empty() {
        let message = if storage.folders.is_loading() {
            "Loading..."
        } else {
            "Nothing here."
        };
        render_message(frame, chunks[1], &title, message);
        return;
    }

    let mut state = TableState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(folder_table(&folders, title), chunks[1], &mut state);
}
