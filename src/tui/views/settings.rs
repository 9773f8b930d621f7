//! Settings: preference toggles and sign-out

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::PreferenceFlag;
use crate::tui::app::App;

use super::{highlight, panel};

fn describe(flag: PreferenceFlag) -> &'static str {
    match flag {
        PreferenceFlag::FaceId => "Offer a biometric scan at sign in",
        PreferenceFlag::FingerprintBackup => "Fall back to fingerprint when face scan fails",
        PreferenceFlag::AutoLock => "Lock the vault after a period of inactivity",
        PreferenceFlag::StealthMode => "Hide account details in the header",
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(4)])
        .split(area);

    let preferences = app.navigator.preferences();
    let items: Vec<ListItem> = PreferenceFlag::ALL
        .iter()
        .map(|flag| {
            let (mark, color) = if preferences.get(*flag) {
                ("[on] ", Color::Green)
            } else {
                ("[off]", Color::DarkGray)
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(mark, Style::default().fg(color)),
                    Span::raw(" "),
                    Span::raw(flag.label()),
                ]),
                Line::from(Span::styled(
                    format!("      {}", describe(*flag)),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(panel("Security"))
        .highlight_style(highlight())
        .highlight_symbol("▶ ");
    let mut state = ListState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let account = match app.navigator.profile() {
        Some(profile) => vec![
            Line::from(format!("{} <{}>", profile.full_name, profile.email)),
            Line::from(Span::styled(
                "Press o to sign out and forget this profile",
                Style::default().fg(Color::Yellow),
            )),
        ],
        None => vec![Line::from("No profile")],
    };
    frame.render_widget(Paragraph::new(account).block(panel("Account")), chunks[1]);
}
