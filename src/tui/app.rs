//! Application state for the TUI
//!
//! `App` wraps the navigator with the state only the terminal needs: list
//! selection, open forms, the PIN field, confirmation prompts and toasts.

use crate::app::{Event, Intent, Navigator, Screen, Task};
use crate::models::{FolderId, ItemId, PreferenceFlag, PIN_LENGTH};

use super::widgets::{FormState, NotificationQueue, TextInput};

/// Which form is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    SignUp,
    NewFolder,
    Note,
    Attach,
    Search,
}

impl FormKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::SignUp => " Create your profile ",
            Self::NewFolder => " New folder ",
            Self::Note => " Add note ",
            Self::Attach => " Attach file ",
            Self::Search => " Search ",
        }
    }

    fn build(&self) -> FormState {
        let fields = match self {
            Self::SignUp => vec![
                TextInput::new().label("Full name"),
                TextInput::new().label("Email"),
                TextInput::new()
                    .label("PIN")
                    .placeholder("4 digits")
                    .masked()
                    .max_len(PIN_LENGTH),
                TextInput::new()
                    .label("Biometric unlock")
                    .content("y")
                    .max_len(3),
            ],
            Self::NewFolder => vec![
                TextInput::new().label("Name"),
                TextInput::new()
                    .label("Type")
                    .placeholder("documentos, hojas, media, notas, claves, diario, privado"),
                TextInput::new()
                    .label("Security")
                    .placeholder("standard, enhanced, maximum"),
            ],
            Self::Note => vec![
                TextInput::new().label("Title"),
                TextInput::new().label("Description"),
                TextInput::new().label("Text"),
            ],
            Self::Attach => vec![
                TextInput::new().label("File path"),
                TextInput::new().label("Kind").content("photo"),
                TextInput::new().label("Title"),
                TextInput::new().label("Description"),
                TextInput::new()
                    .label("Length")
                    .placeholder("voice only, e.g. 1:05"),
            ],
            Self::Search => vec![TextInput::new().label("Name")],
        };
        FormState::new(fields)
    }
}

#[derive(Debug, Clone)]
pub struct OpenForm {
    pub kind: FormKind,
    pub state: FormState,
}

impl OpenForm {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            state: kind.build(),
        }
    }
}

/// A yes/no prompt guarding one intent
#[derive(Debug, Clone)]
pub struct PendingConfirm {
    pub message: String,
    pub intent: Intent,
    /// The intent throws data away
    pub destructive: bool,
}

pub struct App {
    pub navigator: Navigator,
    pub should_quit: bool,
    /// Selected row in whichever list the screen shows
    pub selected: usize,
    pub form: Option<OpenForm>,
    /// PIN entry on the auth screen
    pub pin: TextInput,
    pub confirm: Option<PendingConfirm>,
    pub notifications: NotificationQueue,
    seen_epoch: u64,
}

impl App {
    pub fn new(navigator: Navigator) -> Self {
        let seen_epoch = navigator.epoch();
        Self {
            navigator,
            should_quit: false,
            selected: 0,
            form: None,
            pin: pin_input(),
            confirm: None,
            notifications: NotificationQueue::default(),
            seen_epoch,
        }
    }

    /// Feed one event to the navigator and bring the view state along
    pub fn update(&mut self, event: Event) -> Vec<Task> {
        let tasks = self.navigator.update(event);
        self.sync();
        tasks
    }

    pub fn dispatch(&mut self, intent: Intent) -> Vec<Task> {
        self.update(Event::Intent(intent))
    }

    pub fn screen(&self) -> &Screen {
        self.navigator.screen()
    }

    pub fn open_form(&mut self, kind: FormKind) {
        self.form = Some(OpenForm::new(kind));
    }

    pub fn ask(&mut self, message: impl Into<String>, intent: Intent) {
        let destructive = matches!(intent, Intent::DeleteItem(_) | Intent::SignOut);
        self.confirm = Some(PendingConfirm {
            message: message.into(),
            intent,
            destructive,
        });
    }

    fn sync(&mut self) {
        if let Some(notice) = self.navigator.take_notice() {
            self.notifications.push(notice);
        }

        if self.navigator.epoch() != self.seen_epoch {
            self.seen_epoch = self.navigator.epoch();
            self.selected = 0;
            self.form = None;
            self.confirm = None;
            self.pin.clear();
            if self.navigator.screen() == &Screen::SignUp {
                self.open_form(FormKind::SignUp);
            }
        }

        let sheet = self.navigator.new_folder_sheet().cloned();
        let form_kind = self.form.as_ref().map(|f| f.kind);
        match (sheet, form_kind) {
            (Some(sheet), Some(FormKind::NewFolder)) => {
                if let Some(form) = self.form.as_mut() {
                    form.state.error = sheet.error;
                }
            }
            (Some(sheet), _) => {
                let mut form = OpenForm::new(FormKind::NewFolder);
                form.state.error = sheet.error;
                self.form = Some(form);
            }
            (None, Some(FormKind::NewFolder)) => self.form = None,
            _ => {}
        }

        let form_error = self.navigator.form_error().map(str::to_string);
        if let Some(form) = self.form.as_mut() {
            if form.kind == FormKind::SignUp {
                form.state.error = form_error;
            }
        }

        self.selected = self.selected.min(self.list_len().saturating_sub(1));
    }

    /// Rows in the list the current screen shows
    pub fn list_len(&self) -> usize {
        match self.navigator.screen() {
            Screen::Dashboard => self.navigator.visible_folders().len(),
            Screen::Folder { .. } | Screen::FolderDetail { .. } => {
                self.navigator.items().items.len()
            }
            Screen::Settings => PreferenceFlag::ALL.len(),
            Screen::Storage => self.navigator.storage().folders.folders().len(),
            Screen::Activity => self.navigator.activity().visible().len(),
            _ => 0,
        }
    }

    pub fn select_next(&mut self) {
        let len = self.list_len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_folder(&self) -> Option<FolderId> {
        match self.navigator.screen() {
            Screen::Dashboard => self
                .navigator
                .visible_folders()
                .get(self.selected)
                .map(|f| f.id.clone()),
            Screen::Storage => self
                .navigator
                .storage()
                .folders
                .folders()
                .get(self.selected)
                .map(|f| f.id.clone()),
            _ => None,
        }
    }

    pub fn selected_item(&self) -> Option<ItemId> {
        self.navigator
            .items()
            .items
            .get(self.selected)
            .map(|i| i.id.clone())
    }

    pub fn selected_flag(&self) -> Option<PreferenceFlag> {
        PreferenceFlag::ALL.get(self.selected).copied()
    }
}

fn pin_input() -> TextInput {
    TextInput::new()
        .label("PIN")
        .masked()
        .max_len(PIN_LENGTH)
        .focused(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{NavigatorConfig, Outcome};
    use crate::storage::Credentials;

    fn app() -> App {
        let mut app = App::new(Navigator::new(NavigatorConfig::default()));
        let epoch = app.navigator.epoch();
        app.update(Event::Outcome {
            epoch,
            outcome: Outcome::CredentialsLoaded(Credentials::default()),
        });
        app
    }

    #[test]
    fn test_sign_up_screen_opens_form() {
        let mut app = app();
        app.dispatch(Intent::StartSignUp);
        assert_eq!(app.form.as_ref().unwrap().kind, FormKind::SignUp);
        assert_eq!(app.form.as_ref().unwrap().state.value(3), "y");
    }

    #[test]
    fn test_screen_change_resets_view_state() {
        let mut app = app();
        app.dispatch(Intent::StartSignUp);
        app.selected = 3;
        app.dispatch(Intent::Back);
        assert_eq!(app.screen(), &Screen::Onboarding);
        assert!(app.form.is_none());
        assert_eq!(app.selected, 0);
    }
}
