//! Key handling for the TUI
//!
//! Turns key presses into navigator intents. Overlays take keys first: the
//! gate modal, then a confirmation prompt, then an open form. Returns the
//! tasks the navigator asked for so the caller can hand them to the runtime.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{Destination, Intent, Screen, Task};
use crate::models::{FolderStatus, FolderType, ItemType, SecurityLevel, PIN_LENGTH};

use super::app::{App, FormKind};
use super::widgets::FormAction;

pub fn handle_key(app: &mut App, key: KeyEvent) -> Vec<Task> {
    if key.kind != KeyEventKind::Press {
        return Vec::new();
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return Vec::new();
    }

    if app.navigator.gate().is_some() {
        return handle_gate_key(app, key);
    }
    if app.confirm.is_some() {
        return handle_confirm_key(app, key);
    }
    if app.navigator.storage().pending_purge.is_some() && app.screen() == &Screen::Storage {
        return handle_purge_key(app, key);
    }
    if app.form.is_some() {
        return handle_form_key(app, key);
    }

    match app.screen() {
        Screen::Onboarding => handle_onboarding_key(app, key),
        Screen::SignUp => match key.code {
            KeyCode::Esc => app.dispatch(Intent::Back),
            _ => Vec::new(),
        },
        Screen::Auth => handle_auth_key(app, key),
        Screen::Dashboard => handle_dashboard_key(app, key),
        Screen::FolderDetail { .. } | Screen::Folder { .. } => handle_folder_key(app, key),
        Screen::Viewer { .. } => match key.code {
            KeyCode::Esc | KeyCode::Char('x') => app.dispatch(Intent::LockViewer),
            _ => Vec::new(),
        },
        Screen::Settings => handle_settings_key(app, key),
        Screen::Storage => handle_storage_key(app, key),
        Screen::Activity => handle_activity_key(app, key),
    }
}

fn handle_gate_key(app: &mut App, key: KeyEvent) -> Vec<Task> {
    match key.code {
        KeyCode::Char('r') | KeyCode::Enter => app.dispatch(Intent::RetryGate),
        KeyCode::Esc | KeyCode::Char('c') => app.dispatch(Intent::CancelGate),
        _ => Vec::new(),
    }
}

fn handle_confirm_key(app: &mut App, key: KeyEvent) -> Vec<Task> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => match app.confirm.take() {
            Some(pending) => app.dispatch(pending.intent),
            None => Vec::new(),
        },
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.confirm = None;
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn handle_purge_key(app: &mut App, key: KeyEvent) -> Vec<Task> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.dispatch(Intent::ConfirmPurge),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.dispatch(Intent::CancelPurge)
        }
        _ => Vec::new(),
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) -> Vec<Task> {
    let Some(form) = app.form.as_mut() else {
        return Vec::new();
    };
    let kind = form.kind;
    let action = form.state.handle_key(key);

    match (kind, action) {
        (FormKind::Search, FormAction::Edited) => {
            let query = form.state.value(0).to_string();
            app.dispatch(Intent::SetSearch(query))
        }
        (FormKind::Search, FormAction::Submit) => {
            app.form = None;
            Vec::new()
        }
        (FormKind::Search, FormAction::Cancel) => {
            app.form = None;
            app.dispatch(Intent::SetSearch(String::new()))
        }
        (_, FormAction::Edited) => Vec::new(),
        (FormKind::SignUp, FormAction::Cancel) => app.dispatch(Intent::Back),
        (FormKind::NewFolder, FormAction::Cancel) => app.dispatch(Intent::CloseNewFolderSheet),
        (_, FormAction::Cancel) => {
            app.form = None;
            Vec::new()
        }
        (_, FormAction::Submit) => submit_form(app),
    }
}

fn submit_form(app: &mut App) -> Vec<Task> {
    let Some(form) = app.form.as_mut() else {
        return Vec::new();
    };
    let state = &mut form.state;

    let intent = match form.kind {
        FormKind::SignUp => Intent::SubmitSignUp {
            full_name: state.text(0),
            email: state.text(1),
            pin: state.text(2),
            biometrics: !state.text(3).to_lowercase().starts_with('n'),
        },
        FormKind::NewFolder => {
            let type_text = state.text(1);
            let folder_type = if type_text.is_empty() {
                FolderType::default()
            } else {
                match FolderType::parse(&type_text) {
                    Some(folder_type) => folder_type,
                    None => {
                        state.error = Some(format!("Unknown folder type '{}'", type_text));
                        return Vec::new();
                    }
                }
            };
            let level_text = state.text(2);
            let security_level = if level_text.is_empty() {
                None
            } else {
                match SecurityLevel::parse(&level_text) {
                    Some(level) => Some(level),
                    None => {
                        state.error = Some(format!("Unknown security level '{}'", level_text));
                        return Vec::new();
                    }
                }
            };
            Intent::CreateFolder {
                name: state.text(0),
                folder_type,
                security_level,
            }
        }
        FormKind::Note => {
            let intent = Intent::AddNote {
                title: state.text(0),
                description: state.text(1),
                content: state.value(2).to_string(),
            };
            app.form = None;
            intent
        }
        FormKind::Attach => {
            let kind_text = state.text(1);
            let Some(kind) = ItemType::parse(&kind_text).filter(ItemType::is_file) else {
                state.error = Some("Kind must be photo, scan or voice".into());
                return Vec::new();
            };
            let path = state.text(0);
            if path.is_empty() {
                state.error = Some("Choose a file to attach".into());
                return Vec::new();
            }
            let duration = Some(state.text(4)).filter(|d| !d.is_empty());
            let intent = Intent::AttachFile {
                kind,
                title: state.text(2),
                description: state.text(3),
                path: path.into(),
                duration,
            };
            app.form = None;
            intent
        }
        FormKind::Search => return Vec::new(),
    };

    app.dispatch(intent)
}

fn handle_onboarding_key(app: &mut App, key: KeyEvent) -> Vec<Task> {
    match key.code {
        KeyCode::Enter | KeyCode::Char('s') => app.dispatch(Intent::ContinueToSignIn),
        KeyCode::Char('n') => app.dispatch(Intent::StartSignUp),
        KeyCode::Char('q') => {
            app.should_quit = true;
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn handle_auth_key(app: &mut App, key: KeyEvent) -> Vec<Task> {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            app.pin.insert(c);
            Vec::new()
        }
        KeyCode::Backspace => {
            app.pin.backspace();
            Vec::new()
        }
        KeyCode::Enter if app.pin.value().len() == PIN_LENGTH => {
            let pin = app.pin.value().to_string();
            app.pin.clear();
            app.dispatch(Intent::SubmitPin(pin))
        }
        KeyCode::Enter | KeyCode::Char('b') => app.dispatch(Intent::StartBiometricSignIn),
        KeyCode::Esc => app.dispatch(Intent::Back),
        _ => Vec::new(),
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) -> Vec<Task> {
    let status_change = |app: &mut App, status: FolderStatus| match app.selected_folder() {
        Some(id) => app.dispatch(Intent::ChangeFolderStatus { id, status }),
        None => Vec::new(),
    };

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next();
            Vec::new()
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_prev();
            Vec::new()
        }
        KeyCode::Enter => match app.selected_folder() {
            Some(id) => app.dispatch(Intent::OpenFolder(id)),
            None => Vec::new(),
        },
        KeyCode::Char('n') => app.dispatch(Intent::OpenNewFolderSheet),
        KeyCode::Char('h') => status_change(app, FolderStatus::Hidden),
        KeyCode::Char('a') => status_change(app, FolderStatus::Archived),
        KeyCode::Char('d') => status_change(app, FolderStatus::Deleted),
        KeyCode::Char('/') => {
            let query = app.navigator.search().to_string();
            app.open_form(FormKind::Search);
            if let Some(form) = app.form.as_mut() {
                for c in query.chars() {
                    form.state.handle_key(KeyEvent::from(KeyCode::Char(c)));
                }
            }
            Vec::new()
        }
        KeyCode::Esc if !app.navigator.search().is_empty() => {
            app.dispatch(Intent::SetSearch(String::new()))
        }
        KeyCode::Char('s') => app.dispatch(Intent::GoTo(Destination::Settings)),
        KeyCode::Char('m') => app.dispatch(Intent::GoTo(Destination::Storage)),
        KeyCode::Char('l') => app.dispatch(Intent::GoTo(Destination::Activity)),
        KeyCode::Char('x') => app.dispatch(Intent::LockSession),
        KeyCode::Char('q') => {
            app.should_quit = true;
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn handle_folder_key(app: &mut App, key: KeyEvent) -> Vec<Task> {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next();
            Vec::new()
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_prev();
            Vec::new()
        }
        KeyCode::Enter => match app.selected_item() {
            Some(id) => app.dispatch(Intent::OpenItem(id)),
            None => Vec::new(),
        },
        KeyCode::Char('b') => app.dispatch(Intent::BrowseContents),
        KeyCode::Char('n') => {
            app.open_form(FormKind::Note);
            Vec::new()
        }
        KeyCode::Char('a') => {
            app.open_form(FormKind::Attach);
            Vec::new()
        }
        KeyCode::Char('d') => {
            if let Some(id) = app.selected_item() {
                let title = app
                    .navigator
                    .items()
                    .get(&id)
                    .map(|i| i.title.clone())
                    .unwrap_or_default();
                app.ask(format!("Delete '{}'?", title), Intent::DeleteItem(id));
            }
            Vec::new()
        }
        KeyCode::Esc => app.dispatch(Intent::Back),
        _ => Vec::new(),
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) -> Vec<Task> {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next();
            Vec::new()
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_prev();
            Vec::new()
        }
        KeyCode::Enter | KeyCode::Char(' ') => match app.selected_flag() {
            Some(flag) => app.dispatch(Intent::TogglePreference(flag)),
            None => Vec::new(),
        },
        KeyCode::Char('o') => {
            app.ask("Sign out and forget this profile?", Intent::SignOut);
            Vec::new()
        }
        KeyCode::Esc => app.dispatch(Intent::Back),
        _ => Vec::new(),
    }
}

fn handle_storage_key(app: &mut App, key: KeyEvent) -> Vec<Task> {
    let tabs = crate::app::navigator::StorageState::TABS;
    let current = tabs
        .iter()
        .position(|t| *t == app.navigator.storage().tab)
        .unwrap_or(0);

    match key.code {
        KeyCode::Tab | KeyCode::Right => {
            let next = tabs[(current + 1) % tabs.len()];
            app.dispatch(Intent::SelectStorageTab(next))
        }
        KeyCode::BackTab | KeyCode::Left => {
            let prev = tabs[(current + tabs.len() - 1) % tabs.len()];
            app.dispatch(Intent::SelectStorageTab(prev))
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next();
            Vec::new()
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_prev();
            Vec::new()
        }
        KeyCode::Char('r') => match app.selected_folder() {
            Some(id) => app.dispatch(Intent::RestoreFolder(id)),
            None => Vec::new(),
        },
        KeyCode::Char('p') => match app.selected_folder() {
            Some(id) => app.dispatch(Intent::RequestPurge(id)),
            None => Vec::new(),
        },
        KeyCode::Esc => app.dispatch(Intent::Back),
        _ => Vec::new(),
    }
}

fn handle_activity_key(app: &mut App, key: KeyEvent) -> Vec<Task> {
    match key.code {
        KeyCode::Char('f') => {
            let next = app.navigator.activity().filter.next();
            app.dispatch(Intent::SetActivityFilter(next))
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next();
            Vec::new()
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_prev();
            Vec::new()
        }
        KeyCode::Esc => app.dispatch(Intent::Back),
        _ => Vec::new(),
    }
}
