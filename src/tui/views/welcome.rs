//! Onboarding, sign-up and sign-in screens

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::AuthStatus;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;

use super::panel;

fn key_hint(key: &str, label: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("[{}]", key), Style::default().fg(Color::Yellow)),
        Span::raw(format!(" {}", label)),
    ])
}

pub fn render_onboarding(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel("Welcome");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Your documents, behind your fingerprint.",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    match app.navigator.session().status {
        AuthStatus::Loading => lines.push(Line::from("Loading your profile...")),
        AuthStatus::Authenticated => {
            let name = app
                .navigator
                .profile()
                .map(|p| p.first_name().to_string())
                .unwrap_or_default();
            lines.push(Line::from(format!("Welcome back, {}.", name)));
            lines.push(Line::from(""));
            lines.push(key_hint("Enter", "Sign in"));
        }
        AuthStatus::Unauthenticated => {
            lines.push(Line::from("No profile on this device yet."));
            lines.push(Line::from(""));
            lines.push(key_hint("N", "Create a profile"));
            lines.push(key_hint("Enter", "Sign in"));
        }
    }
    lines.push(key_hint("Q", "Quit"));

    let content = centered_rect_fixed(50, lines.len() as u16, inner);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        content,
    );
}

/// The sign-up form itself is a dialog; this is the backdrop
pub fn render_sign_up(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from("Set up the profile that unlocks this vault."),
        Line::from("Your PIN is the fallback when biometrics are unavailable."),
    ])
    .alignment(Alignment::Center)
    .block(panel("Create your profile"));
    frame.render_widget(paragraph, area);
}

pub fn render_auth(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel("Sign in");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let content = centered_rect_fixed(44, 9, inner);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Prompt
            Constraint::Length(2), // PIN
            Constraint::Length(2), // Error
            Constraint::Min(1),    // Hints
        ])
        .split(content);

    let prompt = if app.navigator.biometric_sign_in_available() {
        "Use biometrics or enter your PIN"
    } else {
        "Enter your PIN"
    };
    frame.render_widget(Paragraph::new(prompt), rows[0]);
    frame.render_widget(app.pin.clone(), rows[1]);

    if let Some(error) = app.navigator.form_error() {
        frame.render_widget(
            Paragraph::new(error).style(Style::default().fg(Color::Red)),
            rows[2],
        );
    }

    let mut hints = vec![key_hint("Enter", "Continue")];
    if app.navigator.biometric_sign_in_available() {
        hints.push(key_hint("B", "Biometric sign in"));
    }
    hints.push(key_hint("Esc", "Back"));
    frame.render_widget(Paragraph::new(hints), rows[3]);
}
