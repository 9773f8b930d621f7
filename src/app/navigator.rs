//! Navigation state machine
//!
//! The navigator owns the current screen, the session, the single gate slot
//! and every list the views render. `update` is the only way in: it applies
//! one event and returns the side effects the runtime has to carry out.
//! Nothing here touches the network, the disk or a clock, so every
//! transition can be exercised synchronously.

use std::time::Duration;

use crate::activity::{ActivityEntry, ActivityFilter, AuthMethod};
use crate::config::{CreateFailurePolicy, Settings};
use crate::crypto::validate_pin;
use crate::error::VaultError;
use crate::models::{
    Folder, FolderId, FolderStatus, Item, ItemId, NewItem, Preferences, UserProfile,
};

use super::cache::{validate_new_folder, FolderCache};
use super::event::{Destination, Event, Intent, Outcome, Task};
use super::gate::{GateKind, GatePhase, GateState, GateTarget};
use super::screen::Screen;
use super::session::Session;

/// Timing and policy knobs, taken from settings
#[derive(Debug, Clone)]
pub struct NavigatorConfig {
    pub verified_delay: Duration,
    pub viewer_lock_seconds: u32,
    pub idle_lock_seconds: u32,
    pub create_failure: CreateFailurePolicy,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for NavigatorConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            verified_delay: settings.verified_delay(),
            viewer_lock_seconds: settings.viewer_lock_seconds,
            idle_lock_seconds: settings.idle_lock_seconds,
            create_failure: settings.create_failure,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A short message for the user, picked up by the view layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }
}

/// The new-folder sheet on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewFolderSheet {
    pub error: Option<String>,
}

/// Items of the folder on screen
#[derive(Debug, Clone, Default)]
pub struct ItemList {
    pub folder_id: Option<FolderId>,
    pub items: Vec<Item>,
    pub loading: bool,
}

impl ItemList {
    fn loading(folder_id: FolderId) -> Self {
        Self {
            folder_id: Some(folder_id),
            items: Vec::new(),
            loading: true,
        }
    }

    fn is_for(&self, folder_id: &FolderId) -> bool {
        self.folder_id.as_ref() == Some(folder_id)
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|i| &i.id == id)
    }
}

/// Storage management screen: one tab per non-active status
#[derive(Debug, Clone)]
pub struct StorageState {
    pub tab: FolderStatus,
    pub folders: FolderCache,
    pub pending_purge: Option<FolderId>,
}

impl Default for StorageState {
    fn default() -> Self {
        Self {
            tab: FolderStatus::Hidden,
            folders: FolderCache::default(),
            pending_purge: None,
        }
    }
}

impl StorageState {
    pub const TABS: [FolderStatus; 3] = [
        FolderStatus::Hidden,
        FolderStatus::Archived,
        FolderStatus::Deleted,
    ];

    fn reset(&mut self, tab: FolderStatus) {
        self.tab = tab;
        self.folders.clear();
        self.folders.mark_loading();
        self.pending_purge = None;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActivityState {
    pub filter: ActivityFilter,
    pub entries: Vec<ActivityEntry>,
    pub loading: bool,
}

impl ActivityState {
    /// Entries passing the current filter, newest first
    pub fn visible(&self) -> Vec<&ActivityEntry> {
        self.entries
            .iter()
            .filter(|e| self.filter.matches(e))
            .collect()
    }
}

pub struct Navigator {
    config: NavigatorConfig,
    screen: Screen,
    session: Session,
    epoch: u64,
    last_attempt: u64,
    gate: Option<GateState>,
    new_folder_sheet: Option<NewFolderSheet>,
    folders: FolderCache,
    search: String,
    items: ItemList,
    storage: StorageState,
    activity: ActivityState,
    profile: Option<UserProfile>,
    preferences: Preferences,
    form_error: Option<String>,
    viewer_remaining: u32,
    idle_seconds: u32,
    notice: Option<Notice>,
}

impl Navigator {
    /// Start on onboarding with credentials still loading
    pub fn new(config: NavigatorConfig) -> Self {
        Self {
            viewer_remaining: config.viewer_lock_seconds,
            config,
            screen: Screen::Onboarding,
            session: Session::default(),
            epoch: 0,
            last_attempt: 0,
            gate: None,
            new_folder_sheet: None,
            folders: FolderCache::default(),
            search: String::new(),
            items: ItemList::default(),
            storage: StorageState::default(),
            activity: ActivityState::default(),
            profile: None,
            preferences: Preferences::default(),
            form_error: None,
            idle_seconds: 0,
            notice: None,
        }
    }

    // Read access for the views

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Lifetime counter of the current screen
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn gate(&self) -> Option<&GateState> {
        self.gate.as_ref()
    }

    pub fn new_folder_sheet(&self) -> Option<&NewFolderSheet> {
        self.new_folder_sheet.as_ref()
    }

    pub fn folders(&self) -> &FolderCache {
        &self.folders
    }

    /// Dashboard folders after the search filter
    pub fn visible_folders(&self) -> Vec<&Folder> {
        self.folders.search(&self.search)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn items(&self) -> &ItemList {
        &self.items
    }

    pub fn storage(&self) -> &StorageState {
        &self.storage
    }

    pub fn activity(&self) -> &ActivityState {
        &self.activity
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Validation message for the sign-up form or the PIN prompt
    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    pub fn viewer_remaining(&self) -> u32 {
        self.viewer_remaining
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// True when biometric sign-in can be offered on the auth screen
    pub fn biometric_sign_in_available(&self) -> bool {
        self.preferences.face_id_enabled
            && self.profile.as_ref().is_some_and(|p| p.has_biometrics)
    }

    /// Apply one event, returning the side effects to run
    pub fn update(&mut self, event: Event) -> Vec<Task> {
        let mut tasks = Vec::new();

        match event {
            Event::Intent(intent) => {
                self.idle_seconds = 0;
                self.handle_intent(intent, &mut tasks);
            }
            Event::Outcome { epoch, outcome } => {
                let bootstrap = matches!(outcome, Outcome::CredentialsLoaded(_));
                if epoch != self.epoch && !bootstrap {
                    tracing::debug!(epoch, current = self.epoch, "Dropping stale outcome");
                } else {
                    self.handle_outcome(outcome, &mut tasks);
                }
            }
            Event::Tick => self.tick(&mut tasks),
        }

        self.enforce_session_guard(&mut tasks);
        tasks
    }

    fn handle_intent(&mut self, intent: Intent, tasks: &mut Vec<Task>) {
        match intent {
            Intent::ContinueToSignIn => {
                if self.screen == Screen::Onboarding {
                    self.enter(Screen::Auth, tasks);
                }
            }
            Intent::StartSignUp => {
                if self.screen == Screen::Onboarding {
                    self.enter(Screen::SignUp, tasks);
                }
            }
            Intent::SubmitSignUp {
                full_name,
                email,
                pin,
                biometrics,
            } => self.sign_up(&full_name, &email, &pin, biometrics, tasks),
            Intent::StartBiometricSignIn => self.start_biometric_sign_in(tasks),
            Intent::SubmitPin(pin) => self.submit_pin(&pin, tasks),

            Intent::OpenFolder(id) => {
                if self.screen != Screen::Dashboard || self.new_folder_sheet.is_some() {
                    return;
                }
                if let Some(folder) = self.folders.get(&id).cloned() {
                    self.open_gate(GateTarget::Folder(folder), tasks);
                }
            }
            Intent::OpenNewFolderSheet => {
                if self.screen == Screen::Dashboard && self.gate.is_none() {
                    self.new_folder_sheet = Some(NewFolderSheet::default());
                }
            }
            Intent::CloseNewFolderSheet => self.new_folder_sheet = None,
            Intent::CreateFolder {
                name,
                folder_type,
                security_level,
            } => {
                let Some(sheet) = self.new_folder_sheet.as_mut() else {
                    return;
                };
                match validate_new_folder(&name, folder_type, security_level) {
                    Ok(request) => {
                        self.new_folder_sheet = None;
                        tasks.push(Task::CreateFolder(request));
                    }
                    Err(e) => sheet.error = Some(user_message(e)),
                }
            }
            Intent::ChangeFolderStatus { id, status } => {
                if self.screen != Screen::Dashboard || status == FolderStatus::Active {
                    return;
                }
                if self.folders.remove(&id).is_some() {
                    tasks.push(Task::ChangeStatus { id, status });
                }
            }
            Intent::SetSearch(query) => self.search = query,
            Intent::GoTo(destination) => {
                if self.screen != Screen::Dashboard {
                    return;
                }
                let screen = match destination {
                    Destination::Settings => Screen::Settings,
                    Destination::Storage => Screen::Storage,
                    Destination::Activity => Screen::Activity,
                };
                self.enter(screen, tasks);
            }
            Intent::LockSession => {
                if self.screen.requires_verified_session() {
                    self.lock_session("Vault locked", tasks);
                }
            }

            Intent::RetryGate => {
                let attempt = self.last_attempt + 1;
                if let Some(gate) = self.gate.as_mut() {
                    if gate.retry(attempt) {
                        self.last_attempt = attempt;
                        tasks.push(Task::Scan { attempt });
                    }
                }
            }
            Intent::CancelGate => self.cancel_gate(tasks),

            Intent::BrowseContents => {
                if let Screen::FolderDetail { folder } = &self.screen {
                    let folder = folder.clone();
                    self.enter(Screen::Folder { folder }, tasks);
                }
            }
            Intent::OpenItem(item_id) => {
                if !self.screen.lists_items() {
                    return;
                }
                let folder = self.screen.folder().cloned();
                let item = self.items.get(&item_id).cloned();
                if let (Some(folder), Some(item)) = (folder, item) {
                    self.open_gate(GateTarget::Item { folder, item }, tasks);
                }
            }
            Intent::AddNote {
                title,
                description,
                content,
            } => {
                if title.trim().is_empty() && content.trim().is_empty() {
                    self.notify(NoticeLevel::Warning, "A note needs a title or some text");
                    return;
                }
                self.create_item(
                    NewItem::Note {
                        title,
                        description,
                        content,
                    },
                    tasks,
                );
            }
            Intent::AttachFile {
                kind,
                title,
                description,
                path,
                duration,
            } => {
                if !kind.is_file() {
                    self.notify(NoticeLevel::Warning, "Notes cannot be attached as files");
                    return;
                }
                self.create_item(
                    NewItem::File {
                        kind,
                        title,
                        description,
                        path,
                        duration,
                    },
                    tasks,
                );
            }
            Intent::DeleteItem(item_id) => self.delete_item(item_id, tasks),

            Intent::LockViewer => {
                if matches!(self.screen, Screen::Viewer { .. }) {
                    self.lock_viewer("Document locked", tasks);
                }
            }

            Intent::TogglePreference(flag) => {
                if self.screen == Screen::Settings {
                    self.preferences.toggle(flag);
                    tasks.push(Task::SavePreferences(self.preferences));
                }
            }
            Intent::SignOut => {
                if self.screen == Screen::Settings {
                    tracing::info!("Signing out and forgetting the profile");
                    self.profile = None;
                    self.session.set_authenticated(false);
                    tasks.push(Task::ForgetProfile);
                }
            }

            Intent::SelectStorageTab(status) => {
                if self.screen == Screen::Storage
                    && status != FolderStatus::Active
                    && status != self.storage.tab
                {
                    self.storage.reset(status);
                    tasks.push(Task::LoadStorage(status));
                }
            }
            Intent::RestoreFolder(id) => {
                if self.screen == Screen::Storage && self.storage.folders.remove(&id).is_some() {
                    tasks.push(Task::ChangeStatus {
                        id,
                        status: FolderStatus::Active,
                    });
                    self.notify(NoticeLevel::Success, "Folder restored");
                }
            }
            Intent::RequestPurge(id) => {
                if self.screen == Screen::Storage && self.storage.folders.get(&id).is_some() {
                    self.storage.pending_purge = Some(id);
                }
            }
            Intent::ConfirmPurge => {
                if let Some(id) = self.storage.pending_purge.take() {
                    if self.storage.folders.remove(&id).is_some() {
                        tasks.push(Task::PurgeFolder(id));
                    }
                }
            }
            Intent::CancelPurge => self.storage.pending_purge = None,

            Intent::SetActivityFilter(filter) => self.activity.filter = filter,

            Intent::Back => self.back(tasks),
        }
    }

    fn handle_outcome(&mut self, outcome: Outcome, tasks: &mut Vec<Task>) {
        match outcome {
            Outcome::CredentialsLoaded(credentials) => {
                self.session
                    .set_authenticated(credentials.profile.is_some());
                self.profile = credentials.profile;
                self.preferences = credentials.preferences;
                tracing::debug!(enrolled = self.profile.is_some(), "Credentials loaded");
            }
            Outcome::FoldersLoaded(result) => match result {
                Ok(folders) => self.folders.replace(folders),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to refresh folders");
                    self.folders.refresh_failed();
                }
            },
            Outcome::FolderCreated(result) => match result {
                Ok(folder) => {
                    tracing::info!(folder_id = %folder.id, "Folder created");
                    self.folders.insert_created(folder.clone());
                    self.enter(Screen::FolderDetail { folder }, tasks);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create folder");
                    if self.config.create_failure == CreateFailurePolicy::Notify {
                        self.notify(NoticeLevel::Error, "Could not create the folder");
                    }
                }
            },
            Outcome::StatusChanged { id, status, result } => match result {
                Ok(_) => tracing::info!(folder_id = %id, %status, "Folder status changed"),
                Err(e) => {
                    tracing::warn!(folder_id = %id, %status, error = %e, "Status change failed, reconciling");
                    self.notify(NoticeLevel::Error, "Could not update the folder");
                    self.reload_listing(tasks);
                }
            },
            Outcome::StorageLoaded { status, result } => {
                if status != self.storage.tab {
                    return;
                }
                match result {
                    Ok(folders) => self.storage.folders.replace(folders),
                    Err(e) => {
                        tracing::error!(%status, error = %e, "Failed to load storage tab");
                        self.storage.folders.refresh_failed();
                    }
                }
            }
            Outcome::FolderPurged { id, result } => match result {
                Ok(()) => {
                    tracing::info!(folder_id = %id, "Folder permanently deleted");
                    self.notify(NoticeLevel::Success, "Folder permanently deleted");
                }
                Err(e) => {
                    tracing::error!(folder_id = %id, error = %e, "Failed to delete folder");
                    self.notify(NoticeLevel::Error, "Could not delete the folder");
                    self.reload_listing(tasks);
                }
            },
            Outcome::ItemsLoaded { folder_id, result } => {
                if !self.items.is_for(&folder_id) {
                    return;
                }
                self.items.loading = false;
                match result {
                    Ok(items) => {
                        let count = items.len() as u64;
                        self.items.items = items;
                        self.folders.set_item_count(&folder_id, count);
                        if let Some(folder) = self.screen.folder_mut() {
                            folder.item_count = count;
                        }
                    }
                    Err(e) => {
                        tracing::error!(folder_id = %folder_id, error = %e, "Failed to load items")
                    }
                }
            }
            Outcome::ItemCreated { folder_id, result } => match result {
                Ok(item) => {
                    tracing::info!(folder_id = %folder_id, item_id = %item.id, "Item saved");
                    if self.items.is_for(&folder_id) {
                        self.items.items.insert(0, item);
                    }
                    self.adjust_item_count(&folder_id, 1);
                    self.notify(NoticeLevel::Success, "Saved");
                }
                Err(e) => {
                    tracing::error!(folder_id = %folder_id, error = %e, "Failed to save item");
                    self.notify(NoticeLevel::Error, "Could not save the item");
                }
            },
            Outcome::ItemDeleted {
                folder_id,
                item_id,
                result,
            } => match result {
                Ok(()) => tracing::info!(folder_id = %folder_id, item_id = %item_id, "Item deleted"),
                Err(e) => {
                    tracing::warn!(folder_id = %folder_id, item_id = %item_id, error = %e, "Item delete failed, reloading");
                    self.adjust_item_count(&folder_id, 1);
                    self.notify(NoticeLevel::Error, "Could not delete the item");
                    if self.items.is_for(&folder_id) {
                        self.items.loading = true;
                        tasks.push(Task::LoadItems(folder_id));
                    }
                }
            },
            Outcome::GateScanned {
                attempt,
                recognised,
            } => self.gate_scanned(attempt, recognised, tasks),
            Outcome::GateDelayElapsed { attempt } => {
                let ready = self
                    .gate
                    .as_ref()
                    .is_some_and(|gate| gate.ready_to_grant(attempt));
                if let (true, Some(gate)) = (ready, self.gate.take()) {
                    self.grant(gate.target, tasks);
                }
            }
            Outcome::ActivityLoaded(result) => {
                self.activity.loading = false;
                match result {
                    Ok(entries) => self.activity.entries = entries,
                    Err(e) => tracing::error!(error = %e, "Failed to read login activity"),
                }
            }
        }
    }

    fn tick(&mut self, tasks: &mut Vec<Task>) {
        if matches!(self.screen, Screen::Viewer { .. }) {
            self.viewer_remaining = self.viewer_remaining.saturating_sub(1);
            if self.viewer_remaining == 0 {
                self.lock_viewer("Document locked automatically", tasks);
                return;
            }
        }

        let idle_limit = self.config.idle_lock_seconds;
        if self.preferences.auto_lock
            && idle_limit > 0
            && self.screen.requires_verified_session()
        {
            self.idle_seconds += 1;
            if self.idle_seconds >= idle_limit {
                tracing::info!(idle_seconds = self.idle_seconds, "Locking after inactivity");
                self.lock_session("Locked after inactivity", tasks);
            }
        }
    }

    /// Switch screens, running the entry side effects.
    ///
    /// Returns false when the entry guard refuses the screen.
    fn enter(&mut self, screen: Screen, tasks: &mut Vec<Task>) -> bool {
        if screen.requires_verified_session() && !self.session.is_verified() {
            tracing::warn!(screen = %screen, "Refusing to enter screen without a verified session");
            return false;
        }

        self.epoch += 1;
        if let Some(gate) = self.gate.take() {
            if gate.phase == GatePhase::Scanning {
                tasks.push(Task::AbortScan);
            }
        }
        self.new_folder_sheet = None;
        self.form_error = None;
        self.idle_seconds = 0;

        match &screen {
            Screen::Dashboard => {
                self.folders.mark_loading();
                tasks.push(Task::LoadFolders);
            }
            Screen::Folder { folder } | Screen::FolderDetail { folder } => {
                self.items = ItemList::loading(folder.id.clone());
                tasks.push(Task::LoadItems(folder.id.clone()));
            }
            Screen::Viewer { .. } => self.viewer_remaining = self.config.viewer_lock_seconds,
            Screen::Storage => {
                self.storage.reset(FolderStatus::Hidden);
                tasks.push(Task::LoadStorage(FolderStatus::Hidden));
            }
            Screen::Activity => {
                self.activity.loading = true;
                tasks.push(Task::LoadActivity);
            }
            Screen::Onboarding | Screen::SignUp | Screen::Auth | Screen::Settings => {}
        }

        tracing::debug!(screen = %screen, epoch = self.epoch, "Entered screen");
        self.screen = screen;
        true
    }

    fn back(&mut self, tasks: &mut Vec<Task>) {
        if self.gate.is_some() {
            self.cancel_gate(tasks);
            return;
        }
        if self.new_folder_sheet.take().is_some() {
            return;
        }
        if self.storage.pending_purge.take().is_some() {
            return;
        }
        if let Some(target) = self.screen.back() {
            self.enter(target, tasks);
        }
    }

    /// Whichever authenticated screen we are on, a lost session sends the
    /// user back to onboarding
    fn enforce_session_guard(&mut self, tasks: &mut Vec<Task>) {
        if self.screen.requires_verified_session() && !self.session.is_verified() {
            tracing::warn!(screen = %self.screen, "Session no longer verified, returning to onboarding");
            self.session.lock();
            self.enter(Screen::Onboarding, tasks);
        }
    }

    fn lock_session(&mut self, message: &str, tasks: &mut Vec<Task>) {
        self.session.lock();
        self.enter(Screen::Auth, tasks);
        self.notify(NoticeLevel::Info, message);
    }

    fn lock_viewer(&mut self, message: &str, tasks: &mut Vec<Task>) {
        if let Some(target) = self.screen.back() {
            self.enter(target, tasks);
            self.notify(NoticeLevel::Info, message);
        }
    }

    fn sign_up(
        &mut self,
        full_name: &str,
        email: &str,
        pin: &str,
        biometrics: bool,
        tasks: &mut Vec<Task>,
    ) {
        if self.screen != Screen::SignUp {
            return;
        }
        match UserProfile::register(full_name, email, pin, biometrics) {
            Ok(profile) => {
                tracing::info!("Profile enrolled");
                tasks.push(Task::SaveProfile(profile.clone()));
                self.profile = Some(profile);
                self.session.set_authenticated(true);
                self.session.lock();
                self.enter(Screen::Auth, tasks);
                self.notify(NoticeLevel::Success, "Profile created. Sign in to continue");
            }
            Err(e) => self.form_error = Some(user_message(e)),
        }
    }

    fn start_biometric_sign_in(&mut self, tasks: &mut Vec<Task>) {
        if self.screen != Screen::Auth {
            return;
        }
        if !self.session.is_authenticated() {
            self.form_error = Some("Create a profile before signing in".into());
            return;
        }
        if !self.biometric_sign_in_available() {
            self.form_error = Some("Biometric unlock is off. Use your PIN".into());
            return;
        }
        self.open_gate(GateTarget::Dashboard, tasks);
    }

    fn submit_pin(&mut self, pin: &str, tasks: &mut Vec<Task>) {
        if self.screen != Screen::Auth || !self.session.is_authenticated() {
            return;
        }
        let Some(profile) = self.profile.as_ref() else {
            return;
        };

        let accepted = validate_pin(pin, &profile.pin);
        let mut entry = ActivityEntry::new(GateKind::SignIn, AuthMethod::Pin, accepted);
        if !accepted {
            entry = entry.with_detail("wrong PIN");
        }
        tasks.push(Task::RecordActivity(entry));

        if accepted {
            self.session.verify();
            self.enter(Screen::Dashboard, tasks);
        } else {
            tracing::info!("PIN rejected");
            self.form_error = Some("Incorrect PIN".into());
        }
    }

    fn open_gate(&mut self, target: GateTarget, tasks: &mut Vec<Task>) {
        if let Some(open) = &self.gate {
            tracing::debug!(gate = %open.kind(), "A gate is already open");
            return;
        }
        self.last_attempt += 1;
        let attempt = self.last_attempt;
        tracing::debug!(gate = %target.kind(), attempt, "Opening gate");
        self.gate = Some(GateState::open(target, attempt));
        self.form_error = None;
        tasks.push(Task::Scan { attempt });
    }

    fn cancel_gate(&mut self, tasks: &mut Vec<Task>) {
        let cancellable = self.gate.as_ref().is_some_and(|g| g.can_cancel());
        if !cancellable {
            return;
        }
        if let Some(gate) = self.gate.take() {
            tracing::debug!(gate = %gate.kind(), "Gate cancelled");
            if gate.phase == GatePhase::Scanning {
                tasks.push(Task::AbortScan);
            }
        }
    }

    fn gate_scanned(&mut self, attempt: u64, recognised: bool, tasks: &mut Vec<Task>) {
        let Some(gate) = self.gate.as_mut() else {
            tracing::debug!(attempt, "Scan result with no gate open");
            return;
        };
        let kind = gate.kind();
        if !gate.resolve(attempt, recognised) {
            tracing::debug!(gate = %kind, attempt, "Ignoring result from an earlier scan");
            return;
        }

        let mut entry = ActivityEntry::new(kind, AuthMethod::Biometric, recognised);
        if !recognised {
            entry = entry.with_detail("not recognised");
            tracing::info!(gate = %kind, "Biometric check failed");
        }
        tasks.push(Task::RecordActivity(entry));

        if recognised {
            tasks.push(Task::GrantAfter {
                attempt,
                delay: self.config.verified_delay,
            });
        }
    }

    fn grant(&mut self, target: GateTarget, tasks: &mut Vec<Task>) {
        match target {
            GateTarget::Dashboard => {
                self.session.verify();
                self.enter(Screen::Dashboard, tasks);
            }
            GateTarget::Folder(folder) => {
                self.enter(Screen::FolderDetail { folder }, tasks);
            }
            GateTarget::Item { folder, item } => {
                self.enter(Screen::Viewer { folder, item }, tasks);
            }
        }
    }

    fn create_item(&mut self, item: NewItem, tasks: &mut Vec<Task>) {
        if !self.screen.lists_items() {
            return;
        }
        if let Some(folder) = self.screen.folder() {
            tasks.push(Task::CreateItem {
                folder_id: folder.id.clone(),
                item,
            });
        }
    }

    fn delete_item(&mut self, item_id: ItemId, tasks: &mut Vec<Task>) {
        if !self.screen.lists_items() {
            return;
        }
        let Some(folder_id) = self.screen.folder().map(|f| f.id.clone()) else {
            return;
        };
        let Some(index) = self.items.items.iter().position(|i| i.id == item_id) else {
            return;
        };
        self.items.items.remove(index);
        self.adjust_item_count(&folder_id, -1);
        tasks.push(Task::DeleteItem { folder_id, item_id });
    }

    fn adjust_item_count(&mut self, folder_id: &FolderId, delta: i64) {
        self.folders.adjust_item_count(folder_id, delta);
        if let Some(folder) = self.screen.folder_mut() {
            if &folder.id == folder_id {
                folder.item_count = folder.item_count.saturating_add_signed(delta);
            }
        }
    }

    /// Re-fetch whichever folder listing is on screen
    fn reload_listing(&mut self, tasks: &mut Vec<Task>) {
        match self.screen {
            Screen::Dashboard => {
                self.folders.mark_loading();
                tasks.push(Task::LoadFolders);
            }
            Screen::Storage => {
                self.storage.folders.mark_loading();
                tasks.push(Task::LoadStorage(self.storage.tab));
            }
            _ => {}
        }
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notice = Some(Notice::new(level, message));
    }
}

/// Validation messages are shown as-is; anything else gets its full text
fn user_message(err: VaultError) -> String {
    match err {
        VaultError::Validation(message) => message,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::AuthStatus;
    use crate::models::{FolderType, ItemType, PreferenceFlag, SecurityLevel};
    use crate::storage::Credentials;
    use chrono::Utc;

    const PIN: &str = "1234";

    fn profile() -> UserProfile {
        UserProfile::register("Ana Pérez", "ana@example.com", PIN, true).unwrap()
    }

    fn outcome(nav: &mut Navigator, outcome: Outcome) -> Vec<Task> {
        let epoch = nav.epoch();
        nav.update(Event::Outcome { epoch, outcome })
    }

    fn intent(nav: &mut Navigator, intent: Intent) -> Vec<Task> {
        nav.update(Event::Intent(intent))
    }

    fn enrolled_navigator() -> Navigator {
        let mut nav = Navigator::new(NavigatorConfig::default());
        outcome(
            &mut nav,
            Outcome::CredentialsLoaded(Credentials {
                profile: Some(profile()),
                preferences: Preferences::default(),
            }),
        );
        nav
    }

    fn folder(id: &str, name: &str) -> Folder {
        let mut folder = Folder::new(name, FolderType::Documentos);
        folder.id = FolderId::from(id);
        folder
    }

    fn item(id: &str, folder_id: &str) -> Item {
        Item {
            id: ItemId::from(id),
            item_type: ItemType::Note,
            title: format!("Item {}", id),
            description: String::new(),
            content: Some("text".into()),
            file_url: None,
            file_size: Some("0.0 KB".into()),
            duration: None,
            folder_id: FolderId::from(folder_id),
            encrypted: true,
            created_at: Utc::now(),
        }
    }

    /// Signed in with the PIN and sitting on the dashboard with two folders
    fn dashboard() -> Navigator {
        let mut nav = enrolled_navigator();
        intent(&mut nav, Intent::ContinueToSignIn);
        let tasks = intent(&mut nav, Intent::SubmitPin(PIN.into()));
        assert!(tasks.contains(&Task::LoadFolders));
        outcome(
            &mut nav,
            Outcome::FoldersLoaded(Ok(vec![folder("a", "Alpha"), folder("b", "Beta")])),
        );
        nav
    }

    fn scan_attempt(tasks: &[Task]) -> u64 {
        tasks
            .iter()
            .find_map(|t| match t {
                Task::Scan { attempt } => Some(*attempt),
                _ => None,
            })
            .expect("a scan task")
    }

    /// Run a gate to completion with a successful scan
    fn pass_gate(nav: &mut Navigator, attempt: u64) -> Vec<Task> {
        let tasks = outcome(
            nav,
            Outcome::GateScanned {
                attempt,
                recognised: true,
            },
        );
        assert!(tasks.iter().any(|t| matches!(t, Task::GrantAfter { .. })));
        outcome(nav, Outcome::GateDelayElapsed { attempt })
    }

    fn assert_session_invariant(nav: &Navigator) {
        if nav.screen().requires_verified_session() {
            assert!(nav.session().is_authenticated());
            assert!(nav.session().biometric_verified);
        }
    }

    #[test]
    fn test_starts_loading_on_onboarding() {
        let nav = Navigator::new(NavigatorConfig::default());
        assert_eq!(nav.screen(), &Screen::Onboarding);
        assert_eq!(nav.session().status, AuthStatus::Loading);
    }

    #[test]
    fn test_dashboard_unreachable_without_profile() {
        let mut nav = Navigator::new(NavigatorConfig::default());
        outcome(&mut nav, Outcome::CredentialsLoaded(Credentials::default()));
        intent(&mut nav, Intent::ContinueToSignIn);

        let tasks = intent(&mut nav, Intent::StartBiometricSignIn);
        assert!(tasks.is_empty());
        assert!(nav.gate().is_none());
        assert!(nav.form_error().is_some());

        intent(&mut nav, Intent::SubmitPin(PIN.into()));
        assert_eq!(nav.screen(), &Screen::Auth);
        assert_session_invariant(&nav);
    }

    #[test]
    fn test_biometric_sign_in_with_retry() {
        let mut nav = enrolled_navigator();
        intent(&mut nav, Intent::ContinueToSignIn);

        let tasks = intent(&mut nav, Intent::StartBiometricSignIn);
        let first = scan_attempt(&tasks);
        assert_eq!(nav.gate().unwrap().kind(), GateKind::SignIn);

        let tasks = outcome(
            &mut nav,
            Outcome::GateScanned {
                attempt: first,
                recognised: false,
            },
        );
        assert!(matches!(
            &tasks[..],
            [Task::RecordActivity(entry)] if !entry.success
        ));
        assert_eq!(nav.screen(), &Screen::Auth);
        assert!(nav.gate().unwrap().error().is_some());

        let tasks = intent(&mut nav, Intent::RetryGate);
        let second = scan_attempt(&tasks);
        assert_ne!(first, second);
        assert_eq!(nav.gate().unwrap().phase, GatePhase::Scanning);

        let tasks = pass_gate(&mut nav, second);
        assert_eq!(nav.screen(), &Screen::Dashboard);
        assert!(tasks.contains(&Task::LoadFolders));
        assert!(nav.gate().is_none());
        assert_session_invariant(&nav);
    }

    #[test]
    fn test_biometric_sign_in_respects_preference() {
        let mut nav = Navigator::new(NavigatorConfig::default());
        let mut preferences = Preferences::default();
        preferences.face_id_enabled = false;
        outcome(
            &mut nav,
            Outcome::CredentialsLoaded(Credentials {
                profile: Some(profile()),
                preferences,
            }),
        );
        intent(&mut nav, Intent::ContinueToSignIn);

        assert!(intent(&mut nav, Intent::StartBiometricSignIn).is_empty());
        assert!(nav.gate().is_none());
    }

    #[test]
    fn test_wrong_pin_is_recorded_and_stays() {
        let mut nav = enrolled_navigator();
        intent(&mut nav, Intent::ContinueToSignIn);

        let tasks = intent(&mut nav, Intent::SubmitPin("9999".into()));
        assert!(matches!(
            &tasks[..],
            [Task::RecordActivity(entry)] if !entry.success && entry.method == AuthMethod::Pin
        ));
        assert_eq!(nav.screen(), &Screen::Auth);
        assert_eq!(nav.form_error(), Some("Incorrect PIN"));
    }

    #[test]
    fn test_sign_up_flow() {
        let mut nav = Navigator::new(NavigatorConfig::default());
        outcome(&mut nav, Outcome::CredentialsLoaded(Credentials::default()));
        intent(&mut nav, Intent::StartSignUp);
        assert_eq!(nav.screen(), &Screen::SignUp);

        let tasks = intent(
            &mut nav,
            Intent::SubmitSignUp {
                full_name: "Ana".into(),
                email: "ana@example.com".into(),
                pin: "12".into(),
                biometrics: true,
            },
        );
        assert!(tasks.is_empty());
        assert_eq!(nav.form_error(), Some("PIN must be exactly 4 digits"));

        let tasks = intent(
            &mut nav,
            Intent::SubmitSignUp {
                full_name: "Ana".into(),
                email: "ana@example.com".into(),
                pin: PIN.into(),
                biometrics: true,
            },
        );
        assert!(matches!(&tasks[..], [Task::SaveProfile(p)] if p.pin == PIN));
        assert_eq!(nav.screen(), &Screen::Auth);
        assert!(nav.session().is_authenticated());
        assert!(!nav.session().biometric_verified);
    }

    #[test]
    fn test_create_folder_scenario() {
        let mut nav = dashboard();
        intent(&mut nav, Intent::OpenNewFolderSheet);
        let tasks = intent(
            &mut nav,
            Intent::CreateFolder {
                name: "Finance".into(),
                folder_type: FolderType::Documentos,
                security_level: None,
            },
        );
        assert!(matches!(&tasks[..], [Task::CreateFolder(req)] if req.name == "Finance"));
        assert!(nav.new_folder_sheet().is_none());

        let mut created = folder("f1", "Finance");
        created.security_level = SecurityLevel::Enhanced;
        let before = nav.folders().folders().len();
        let tasks = outcome(&mut nav, Outcome::FolderCreated(Ok(created)));

        let new_entries: Vec<_> = nav
            .folders()
            .folders()
            .iter()
            .filter(|f| f.id.as_str() == "f1")
            .collect();
        assert_eq!(new_entries.len(), 1);
        assert_eq!(new_entries[0].item_count, 0);
        assert_eq!(nav.folders().folders().len(), before + 1);
        assert!(matches!(nav.screen(), Screen::FolderDetail { folder } if folder.id.as_str() == "f1"));
        assert_eq!(tasks, vec![Task::LoadItems(FolderId::from("f1"))]);
    }

    #[test]
    fn test_empty_folder_name_rejected_locally() {
        let mut nav = dashboard();
        intent(&mut nav, Intent::OpenNewFolderSheet);
        let tasks = intent(
            &mut nav,
            Intent::CreateFolder {
                name: "   ".into(),
                folder_type: FolderType::Notas,
                security_level: None,
            },
        );
        assert!(tasks.is_empty());
        assert_eq!(
            nav.new_folder_sheet().unwrap().error.as_deref(),
            Some("Folder name is required")
        );
    }

    #[test]
    fn test_create_failure_policy() {
        let mut nav = dashboard();
        outcome(
            &mut nav,
            Outcome::FolderCreated(Err(VaultError::Http("down".into()))),
        );
        assert!(nav.take_notice().is_none());
        assert_eq!(nav.screen(), &Screen::Dashboard);

        let mut config = NavigatorConfig::default();
        config.create_failure = CreateFailurePolicy::Notify;
        let mut nav = dashboard();
        nav.config = config;
        outcome(
            &mut nav,
            Outcome::FolderCreated(Err(VaultError::Http("down".into()))),
        );
        assert_eq!(nav.take_notice().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_status_change_is_optimistic_and_reconciles() {
        let mut nav = dashboard();
        let tasks = intent(
            &mut nav,
            Intent::ChangeFolderStatus {
                id: FolderId::from("a"),
                status: FolderStatus::Archived,
            },
        );
        assert_eq!(
            tasks,
            vec![Task::ChangeStatus {
                id: FolderId::from("a"),
                status: FolderStatus::Archived
            }]
        );
        assert!(nav.folders().get(&FolderId::from("a")).is_none());

        // The repository refused, so the listing is fetched again
        let tasks = outcome(
            &mut nav,
            Outcome::StatusChanged {
                id: FolderId::from("a"),
                status: FolderStatus::Archived,
                result: Err(VaultError::Repository {
                    status: 500,
                    message: "boom".into(),
                }),
            },
        );
        assert_eq!(tasks, vec![Task::LoadFolders]);

        outcome(
            &mut nav,
            Outcome::FoldersLoaded(Ok(vec![folder("a", "Alpha"), folder("b", "Beta")])),
        );
        assert!(nav.folders().get(&FolderId::from("a")).is_some());
    }

    #[test]
    fn test_restricted_gate_denial_keeps_screen() {
        let mut nav = dashboard();
        let tasks = intent(&mut nav, Intent::OpenFolder(FolderId::from("a")));
        let attempt = scan_attempt(&tasks);
        assert_eq!(nav.gate().unwrap().kind(), GateKind::Restricted);

        outcome(
            &mut nav,
            Outcome::GateScanned {
                attempt,
                recognised: false,
            },
        );
        assert_eq!(nav.screen(), &Screen::Dashboard);
        assert!(nav.gate().unwrap().error().is_some());

        // A second folder cannot open while the slot is taken
        assert!(intent(&mut nav, Intent::OpenFolder(FolderId::from("b"))).is_empty());

        intent(&mut nav, Intent::CancelGate);
        assert!(nav.gate().is_none());

        let tasks = intent(&mut nav, Intent::OpenFolder(FolderId::from("a")));
        let reopened = scan_attempt(&tasks);
        assert_eq!(nav.gate().unwrap().phase, GatePhase::Scanning);

        // The old denial cannot leak into the new opening
        outcome(
            &mut nav,
            Outcome::GateScanned {
                attempt,
                recognised: true,
            },
        );
        assert_eq!(nav.gate().unwrap().phase, GatePhase::Scanning);

        pass_gate(&mut nav, reopened);
        assert!(matches!(nav.screen(), Screen::FolderDetail { folder } if folder.id.as_str() == "a"));
    }

    #[test]
    fn test_cancel_while_scanning_aborts_scan() {
        let mut nav = dashboard();
        intent(&mut nav, Intent::OpenFolder(FolderId::from("a")));
        let tasks = intent(&mut nav, Intent::CancelGate);
        assert_eq!(tasks, vec![Task::AbortScan]);
    }

    #[test]
    fn test_verified_gate_cannot_be_cancelled() {
        let mut nav = dashboard();
        let tasks = intent(&mut nav, Intent::OpenFolder(FolderId::from("a")));
        let attempt = scan_attempt(&tasks);
        outcome(
            &mut nav,
            Outcome::GateScanned {
                attempt,
                recognised: true,
            },
        );
        intent(&mut nav, Intent::CancelGate);
        assert!(nav.gate().is_some());

        outcome(&mut nav, Outcome::GateDelayElapsed { attempt });
        assert!(matches!(nav.screen(), Screen::FolderDetail { .. }));
    }

    #[test]
    fn test_stale_outcome_dropped() {
        let mut nav = dashboard();
        let dashboard_epoch = nav.epoch();
        intent(&mut nav, Intent::GoTo(Destination::Settings));
        intent(&mut nav, Intent::Back);
        assert_eq!(nav.screen(), &Screen::Dashboard);
        assert_ne!(nav.epoch(), dashboard_epoch);

        outcome(&mut nav, Outcome::FoldersLoaded(Ok(vec![folder("c", "Current")])));
        nav.update(Event::Outcome {
            epoch: dashboard_epoch,
            outcome: Outcome::FoldersLoaded(Ok(vec![folder("s", "Stale")])),
        });

        let names: Vec<_> = nav.folders().folders().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Current"]);
    }

    /// Opens folder "a" and its first item in the viewer
    fn viewer() -> Navigator {
        let mut nav = dashboard();
        let tasks = intent(&mut nav, Intent::OpenFolder(FolderId::from("a")));
        pass_gate(&mut nav, scan_attempt(&tasks));
        outcome(
            &mut nav,
            Outcome::ItemsLoaded {
                folder_id: FolderId::from("a"),
                result: Ok(vec![item("i1", "a"), item("i2", "a")]),
            },
        );

        let tasks = intent(&mut nav, Intent::OpenItem(ItemId::from("i1")));
        assert_eq!(nav.gate().unwrap().kind(), GateKind::Identity);
        pass_gate(&mut nav, scan_attempt(&tasks));
        nav
    }

    #[test]
    fn test_identity_gate_opens_viewer() {
        let nav = viewer();
        assert!(matches!(nav.screen(), Screen::Viewer { item, .. } if item.id.as_str() == "i1"));
        assert_eq!(nav.viewer_remaining(), 59);
    }

    #[test]
    fn test_viewer_auto_locks() {
        let mut nav = viewer();
        for _ in 0..58 {
            nav.update(Event::Tick);
        }
        assert!(matches!(nav.screen(), Screen::Viewer { .. }));
        assert_eq!(nav.viewer_remaining(), 1);

        let tasks = nav.update(Event::Tick);
        assert!(matches!(nav.screen(), Screen::FolderDetail { folder } if folder.id.as_str() == "a"));
        assert_eq!(tasks, vec![Task::LoadItems(FolderId::from("a"))]);
        assert!(nav.take_notice().is_some());
    }

    #[test]
    fn test_viewer_manual_lock() {
        let mut nav = viewer();
        intent(&mut nav, Intent::LockViewer);
        assert!(matches!(nav.screen(), Screen::FolderDetail { .. }));
    }

    #[test]
    fn test_browse_contents_and_back() {
        let mut nav = dashboard();
        let tasks = intent(&mut nav, Intent::OpenFolder(FolderId::from("b")));
        pass_gate(&mut nav, scan_attempt(&tasks));

        let tasks = intent(&mut nav, Intent::BrowseContents);
        assert!(matches!(nav.screen(), Screen::Folder { .. }));
        assert_eq!(tasks, vec![Task::LoadItems(FolderId::from("b"))]);

        intent(&mut nav, Intent::Back);
        assert_eq!(nav.screen(), &Screen::Dashboard);
    }

    #[test]
    fn test_items_follow_counts() {
        let mut nav = dashboard();
        let tasks = intent(&mut nav, Intent::OpenFolder(FolderId::from("a")));
        pass_gate(&mut nav, scan_attempt(&tasks));
        outcome(
            &mut nav,
            Outcome::ItemsLoaded {
                folder_id: FolderId::from("a"),
                result: Ok(vec![item("i1", "a")]),
            },
        );
        assert_eq!(nav.screen().folder().unwrap().item_count, 1);

        let tasks = intent(
            &mut nav,
            Intent::AddNote {
                title: "Passwords".into(),
                description: String::new(),
                content: "hunter2".into(),
            },
        );
        assert!(matches!(&tasks[..], [Task::CreateItem { folder_id, .. }] if folder_id.as_str() == "a"));

        outcome(
            &mut nav,
            Outcome::ItemCreated {
                folder_id: FolderId::from("a"),
                result: Ok(item("i9", "a")),
            },
        );
        assert_eq!(nav.items().items[0].id.as_str(), "i9");
        assert_eq!(nav.screen().folder().unwrap().item_count, 2);
        assert_eq!(nav.folders().get(&FolderId::from("a")).unwrap().item_count, 2);

        let tasks = intent(&mut nav, Intent::DeleteItem(ItemId::from("i1")));
        assert_eq!(
            tasks,
            vec![Task::DeleteItem {
                folder_id: FolderId::from("a"),
                item_id: ItemId::from("i1")
            }]
        );
        assert_eq!(nav.items().items.len(), 1);
        assert_eq!(nav.screen().folder().unwrap().item_count, 1);
    }

    #[test]
    fn test_empty_note_rejected() {
        let mut nav = dashboard();
        let tasks = intent(&mut nav, Intent::OpenFolder(FolderId::from("a")));
        pass_gate(&mut nav, scan_attempt(&tasks));

        let tasks = intent(
            &mut nav,
            Intent::AddNote {
                title: " ".into(),
                description: "d".into(),
                content: String::new(),
            },
        );
        assert!(tasks.is_empty());
        assert_eq!(nav.take_notice().unwrap().level, NoticeLevel::Warning);
    }

    #[test]
    fn test_idle_lock_returns_to_auth() {
        let mut config = NavigatorConfig::default();
        config.idle_lock_seconds = 3;
        let mut nav = dashboard();
        nav.config = config;

        nav.update(Event::Tick);
        nav.update(Event::Tick);
        intent(&mut nav, Intent::SetSearch("al".into()));
        nav.update(Event::Tick);
        nav.update(Event::Tick);
        assert_eq!(nav.screen(), &Screen::Dashboard);

        nav.update(Event::Tick);
        assert_eq!(nav.screen(), &Screen::Auth);
        assert!(nav.session().is_authenticated());
        assert!(!nav.session().biometric_verified);
    }

    #[test]
    fn test_idle_lock_off_when_preference_disabled() {
        let mut config = NavigatorConfig::default();
        config.idle_lock_seconds = 1;
        let mut nav = dashboard();
        nav.config = config;
        intent(&mut nav, Intent::GoTo(Destination::Settings));
        intent(&mut nav, Intent::TogglePreference(PreferenceFlag::AutoLock));

        for _ in 0..5 {
            nav.update(Event::Tick);
        }
        assert_eq!(nav.screen(), &Screen::Settings);
    }

    #[test]
    fn test_sign_out_forces_onboarding() {
        let mut nav = dashboard();
        intent(&mut nav, Intent::GoTo(Destination::Settings));
        let tasks = intent(&mut nav, Intent::SignOut);

        assert!(tasks.contains(&Task::ForgetProfile));
        assert_eq!(nav.screen(), &Screen::Onboarding);
        assert!(!nav.session().is_authenticated());
        assert!(!nav.session().biometric_verified);
        assert!(nav.profile().is_none());
    }

    #[test]
    fn test_toggle_preference_persists() {
        let mut nav = dashboard();
        intent(&mut nav, Intent::GoTo(Destination::Settings));
        let tasks = intent(
            &mut nav,
            Intent::TogglePreference(PreferenceFlag::FingerprintBackup),
        );
        assert!(nav.preferences().fingerprint_backup);
        assert_eq!(tasks, vec![Task::SavePreferences(*nav.preferences())]);
    }

    #[test]
    fn test_storage_restore_and_purge() {
        let mut nav = dashboard();
        let tasks = intent(&mut nav, Intent::GoTo(Destination::Storage));
        assert_eq!(tasks, vec![Task::LoadStorage(FolderStatus::Hidden)]);

        let tasks = intent(&mut nav, Intent::SelectStorageTab(FolderStatus::Archived));
        assert_eq!(tasks, vec![Task::LoadStorage(FolderStatus::Archived)]);

        // A late answer for the previous tab is ignored
        outcome(
            &mut nav,
            Outcome::StorageLoaded {
                status: FolderStatus::Hidden,
                result: Ok(vec![folder("h", "Hidden")]),
            },
        );
        assert!(nav.storage().folders.folders().is_empty());

        outcome(
            &mut nav,
            Outcome::StorageLoaded {
                status: FolderStatus::Archived,
                result: Ok(vec![folder("x", "Old"), folder("y", "Older")]),
            },
        );

        let tasks = intent(&mut nav, Intent::RestoreFolder(FolderId::from("x")));
        assert_eq!(
            tasks,
            vec![Task::ChangeStatus {
                id: FolderId::from("x"),
                status: FolderStatus::Active
            }]
        );

        intent(&mut nav, Intent::RequestPurge(FolderId::from("y")));
        assert_eq!(nav.storage().pending_purge, Some(FolderId::from("y")));
        intent(&mut nav, Intent::CancelPurge);
        assert!(nav.storage().pending_purge.is_none());

        intent(&mut nav, Intent::RequestPurge(FolderId::from("y")));
        let tasks = intent(&mut nav, Intent::ConfirmPurge);
        assert_eq!(tasks, vec![Task::PurgeFolder(FolderId::from("y"))]);
        assert!(nav.storage().folders.folders().is_empty());

        let tasks = outcome(
            &mut nav,
            Outcome::FolderPurged {
                id: FolderId::from("y"),
                result: Err(VaultError::Http("down".into())),
            },
        );
        assert_eq!(tasks, vec![Task::LoadStorage(FolderStatus::Archived)]);
    }

    #[test]
    fn test_activity_filter() {
        let mut nav = dashboard();
        let tasks = intent(&mut nav, Intent::GoTo(Destination::Activity));
        assert_eq!(tasks, vec![Task::LoadActivity]);

        outcome(
            &mut nav,
            Outcome::ActivityLoaded(Ok(vec![
                ActivityEntry::new(GateKind::SignIn, AuthMethod::Pin, true),
                ActivityEntry::new(GateKind::SignIn, AuthMethod::Biometric, false),
            ])),
        );
        assert_eq!(nav.activity().visible().len(), 2);

        intent(&mut nav, Intent::SetActivityFilter(ActivityFilter::Suspicious));
        let visible = nav.activity().visible();
        assert_eq!(visible.len(), 1);
        assert!(!visible[0].success);
    }

    #[test]
    fn test_search_filters_dashboard() {
        let mut nav = dashboard();
        intent(&mut nav, Intent::SetSearch("BET".into()));
        let visible = nav.visible_folders();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Beta");
    }

    #[test]
    fn test_session_invariant_over_a_walk() {
        let mut nav = enrolled_navigator();
        let walk = vec![
            Intent::GoTo(Destination::Settings),
            Intent::ContinueToSignIn,
            Intent::OpenFolder(FolderId::from("a")),
            Intent::SubmitPin("0000".into()),
            Intent::Back,
            Intent::StartSignUp,
            Intent::Back,
            Intent::ContinueToSignIn,
            Intent::SubmitPin(PIN.into()),
            Intent::GoTo(Destination::Storage),
            Intent::Back,
            Intent::LockSession,
            Intent::GoTo(Destination::Activity),
        ];
        for step in walk {
            intent(&mut nav, step);
            assert_session_invariant(&nav);
        }
        assert_eq!(nav.screen(), &Screen::Auth);
    }
}
