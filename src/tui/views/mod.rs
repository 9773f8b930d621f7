//! Screen views
//!
//! One render function per screen, picked at a single match on the
//! navigator's screen. Overlays (forms, prompts, the gate modal and toasts)
//! are drawn last.

pub mod activity;
pub mod dashboard;
pub mod folder;
pub mod settings;
pub mod status_bar;
pub mod storage;
pub mod viewer;
pub mod welcome;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::Screen;

use super::app::App;
use super::dialogs;
use super::layout::{notification_rect, AppLayout};
use super::widgets::NotificationWidget;

pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    render_header(frame, app, layout.header);

    match app.screen() {
        Screen::Onboarding => welcome::render_onboarding(frame, app, layout.main),
        Screen::SignUp => welcome::render_sign_up(frame, layout.main),
        Screen::Auth => welcome::render_auth(frame, app, layout.main),
        Screen::Dashboard => dashboard::render(frame, app, layout.main),
        Screen::FolderDetail { folder: open } => {
            folder::render_detail(frame, app, open, layout.main)
        }
        Screen::Folder { folder: open } => folder::render_contents(frame, app, open, layout.main),
        Screen::Viewer { folder: open, item } => {
            viewer::render(frame, app, open, item, layout.main)
        }
        Screen::Settings => settings::render(frame, app, layout.main),
        Screen::Storage => storage::render(frame, app, layout.main),
        Screen::Activity => activity::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    if let Some(form) = &app.form {
        dialogs::form::render(frame, form);
    }
    if let Some(confirm) = &app.confirm {
        dialogs::confirm::render(frame, "Confirm", &confirm.message, confirm.destructive);
    }
    if app.screen() == &Screen::Storage && app.navigator.storage().pending_purge.is_some() {
        dialogs::confirm::render(
            frame,
            "Delete forever",
            "This folder and everything in it will be gone for good.",
            true,
        );
    }
    if let Some(gate) = app.navigator.gate() {
        dialogs::gate::render(frame, gate);
    }
    if let Some(notification) = app.notifications.current() {
        frame.render_widget(
            NotificationWidget::new(notification),
            notification_rect(frame.area()),
        );
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.screen() {
        Screen::Onboarding => "Welcome",
        Screen::SignUp => "Sign up",
        Screen::Auth => "Sign in",
        Screen::Dashboard => "My vault",
        Screen::Folder { .. } => "Contents",
        Screen::FolderDetail { .. } => "Folder",
        Screen::Viewer { .. } => "Secure viewer",
        Screen::Settings => "Settings",
        Screen::Storage => "Storage",
        Screen::Activity => "Login activity",
    };

    let mut spans = vec![
        Span::styled(
            " BioVault ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(title, Style::default().fg(Color::White)),
    ];

    if let Some(profile) = app.navigator.profile() {
        let who = if app.navigator.preferences().stealth_mode {
            profile.first_name().to_string()
        } else {
            format!("{} <{}>", profile.first_name(), profile.email)
        };
        let lock = if app.navigator.session().is_verified() {
            Span::styled("unlocked", Style::default().fg(Color::Green))
        } else {
            Span::styled("locked", Style::default().fg(Color::Yellow))
        };
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled(who, Style::default().fg(Color::Cyan)));
        spans.push(Span::raw("  "));
        spans.push(lock);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Bordered panel used by every screen
pub(crate) fn panel(title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
}

/// Highlight for the selected row in any list
pub(crate) fn highlight() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

/// Centered message for empty and loading lists
pub(crate) fn render_message(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::DarkGray))
        .block(panel(title));
    frame.render_widget(paragraph, area);
}
