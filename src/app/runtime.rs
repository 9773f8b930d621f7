//! Task runtime
//!
//! Executes the tasks the navigator asks for and reports back through the
//! event channel. Reads and timers started for one screen are aborted as
//! soon as the navigator moves on; mutations always run to completion and
//! their late outcomes are dropped by the navigator's epoch check.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

use crate::activity::{ActivityFilter, ActivityLog};
use crate::biometrics::BiometricGate;
use crate::models::FolderStatus;
use crate::repository::VaultRepository;
use crate::storage::CredentialStore;

use super::event::{Event, Outcome, Task};

/// Entries shown on the activity screen
pub const ACTIVITY_LIMIT: usize = 100;

pub struct Runtime {
    repository: Arc<dyn VaultRepository>,
    gate: Arc<dyn BiometricGate>,
    credentials: CredentialStore,
    activity: ActivityLog,
    events: UnboundedSender<Event>,
    epoch: u64,
    in_flight: Vec<AbortHandle>,
    scan: Option<AbortHandle>,
}

impl Runtime {
    pub fn new(
        repository: Arc<dyn VaultRepository>,
        gate: Arc<dyn BiometricGate>,
        credentials: CredentialStore,
        activity: ActivityLog,
        events: UnboundedSender<Event>,
    ) -> Self {
        Self {
            repository,
            gate,
            credentials,
            activity,
            events,
            epoch: 0,
            in_flight: Vec::new(),
            scan: None,
        }
    }

    /// Hand the stored profile and preferences to the navigator
    pub fn bootstrap(&self) {
        let credentials = self.credentials.credentials().clone();
        self.send(self.epoch, Outcome::CredentialsLoaded(credentials));
    }

    /// Carry out the tasks from one update. `epoch` is the navigator's
    /// epoch after that update.
    pub fn run(&mut self, epoch: u64, tasks: Vec<Task>) {
        if epoch != self.epoch {
            let stale = self.in_flight.len();
            for handle in self.in_flight.drain(..) {
                handle.abort();
            }
            if stale > 0 {
                tracing::debug!(epoch, aborted = stale, "Screen changed, aborting reads");
            }
            self.epoch = epoch;
        }
        self.in_flight.retain(|handle| !handle.is_finished());

        for task in tasks {
            if task.is_immediate() {
                self.run_immediate(task);
            } else {
                self.spawn(epoch, task);
            }
        }
    }

    /// Number of spawned reads and timers still tracked for the screen
    pub fn pending(&self) -> usize {
        self.in_flight.iter().filter(|h| !h.is_finished()).count()
    }

    fn run_immediate(&mut self, task: Task) {
        let result = match task {
            Task::AbortScan => {
                if let Some(handle) = self.scan.take() {
                    handle.abort();
                    tracing::debug!("Biometric scan aborted");
                }
                Ok(())
            }
            Task::RecordActivity(entry) => self.activity.log(&entry),
            Task::SaveProfile(profile) => self.credentials.save_profile(profile),
            Task::ForgetProfile => self.credentials.forget_profile(),
            Task::SavePreferences(preferences) => self.credentials.save_preferences(preferences),
            other => {
                tracing::debug!(task = ?other, "Not an immediate task");
                Ok(())
            }
        };

        if let Err(e) = result {
            tracing::error!(error = %e, "Failed to write local state");
        }
    }

    fn spawn(&mut self, epoch: u64, task: Task) {
        let events = self.events.clone();

        match task {
            Task::Scan { attempt } => {
                if let Some(previous) = self.scan.take() {
                    previous.abort();
                }
                let gate = Arc::clone(&self.gate);
                let handle = tokio::spawn(async move {
                    let recognised = gate.attempt().await;
                    let outcome = Outcome::GateScanned {
                        attempt,
                        recognised,
                    };
                    let _ = events.send(Event::Outcome { epoch, outcome });
                });
                self.scan = Some(handle.abort_handle());
            }
            Task::LoadActivity => {
                let result = self.activity.read_recent(ActivityFilter::All, ACTIVITY_LIMIT);
                self.send(epoch, Outcome::ActivityLoaded(result));
            }
            task => {
                let abortable = is_abortable(&task);
                let repository = Arc::clone(&self.repository);
                let handle = tokio::spawn(async move {
                    if let Some(outcome) = perform(repository, task).await {
                        let _ = events.send(Event::Outcome { epoch, outcome });
                    }
                });
                if abortable {
                    self.in_flight.push(handle.abort_handle());
                }
            }
        }
    }

    fn send(&self, epoch: u64, outcome: Outcome) {
        if self.events.send(Event::Outcome { epoch, outcome }).is_err() {
            tracing::debug!("Event channel closed");
        }
    }
}

/// Reads and timers belong to the screen that asked for them
fn is_abortable(task: &Task) -> bool {
    matches!(
        task,
        Task::LoadFolders | Task::LoadStorage(_) | Task::LoadItems(_) | Task::GrantAfter { .. }
    )
}

async fn perform(repository: Arc<dyn VaultRepository>, task: Task) -> Option<Outcome> {
    let outcome = match task {
        Task::LoadFolders => {
            Outcome::FoldersLoaded(repository.list_folders(FolderStatus::Active).await)
        }
        Task::LoadStorage(status) => Outcome::StorageLoaded {
            status,
            result: repository.list_folders(status).await,
        },
        Task::CreateFolder(request) => {
            Outcome::FolderCreated(repository.create_folder(request).await)
        }
        Task::ChangeStatus { id, status } => {
            let result = repository.update_folder_status(&id, status).await;
            Outcome::StatusChanged { id, status, result }
        }
        Task::PurgeFolder(id) => {
            let result = repository.delete_folder(&id).await;
            Outcome::FolderPurged { id, result }
        }
        Task::LoadItems(folder_id) => {
            let result = repository.list_items(&folder_id).await;
            Outcome::ItemsLoaded { folder_id, result }
        }
        Task::CreateItem { folder_id, item } => {
            let result = repository.create_item(&folder_id, item).await;
            Outcome::ItemCreated { folder_id, result }
        }
        Task::DeleteItem { folder_id, item_id } => {
            let result = repository.delete_item(&folder_id, &item_id).await;
            Outcome::ItemDeleted {
                folder_id,
                item_id,
                result,
            }
        }
        Task::GrantAfter { attempt, delay } => {
            tokio::time::sleep(delay).await;
            Outcome::GateDelayElapsed { attempt }
        }
        _ => return None,
    };
    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{ActivityEntry, AuthMethod};
    use crate::app::gate::GateKind;
    use crate::config::VaultPaths;
    use crate::crypto::{KeyDerivationParams, SecureString, Security};
    use crate::models::{FolderType, NewFolder, UserProfile};
    use crate::repository::LocalRepository;
    use crate::storage::Storage;
    use async_trait::async_trait;
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    /// Answers immediately with a fixed result
    struct FixedGate(bool);

    #[async_trait]
    impl BiometricGate for FixedGate {
        async fn attempt(&self) -> bool {
            self.0
        }
    }

    /// Never finishes
    struct StuckGate;

    #[async_trait]
    impl BiometricGate for StuckGate {
        async fn attempt(&self) -> bool {
            std::future::pending::<bool>().await
        }
    }

    /// Fixed salt so a reopened store derives the same key
    fn security() -> Security {
        let params =
            KeyDerivationParams::with_values("c29tZXNhbHR2YWx1ZQ".into(), 1024, 1, 1);
        Security::from_passphrase(&SecureString::new("test"), &params).unwrap()
    }

    fn runtime(
        temp_dir: &TempDir,
        gate: Arc<dyn BiometricGate>,
    ) -> (Runtime, UnboundedReceiver<Event>) {
        let paths = VaultPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        let storage = Storage::new(paths.clone()).unwrap();
        let repository = Arc::new(LocalRepository::new(storage));
        let credentials = CredentialStore::open(paths.credentials_file(), security());
        let activity = ActivityLog::new(paths.activity_log());
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Runtime::new(repository, gate, credentials, activity, tx),
            rx,
        )
    }

    async fn next_outcome(rx: &mut UnboundedReceiver<Event>) -> (u64, Outcome) {
        match rx.recv().await {
            Some(Event::Outcome { epoch, outcome }) => (epoch, outcome),
            other => panic!("expected an outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_repository_tasks_report_back() {
        let temp_dir = TempDir::new().unwrap();
        let (mut runtime, mut rx) = runtime(&temp_dir, Arc::new(FixedGate(true)));

        runtime.run(
            1,
            vec![Task::CreateFolder(NewFolder::new(
                "Finance",
                FolderType::Documentos,
            ))],
        );
        let (epoch, outcome) = next_outcome(&mut rx).await;
        assert_eq!(epoch, 1);
        assert!(matches!(outcome, Outcome::FolderCreated(Ok(ref f)) if f.name == "Finance"));

        runtime.run(1, vec![Task::LoadFolders]);
        let (_, outcome) = next_outcome(&mut rx).await;
        match outcome {
            Outcome::FoldersLoaded(Ok(folders)) => assert_eq!(folders.len(), 1),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_scan_reports_attempt() {
        let temp_dir = TempDir::new().unwrap();
        let (mut runtime, mut rx) = runtime(&temp_dir, Arc::new(FixedGate(false)));

        runtime.run(3, vec![Task::Scan { attempt: 7 }]);
        let (epoch, outcome) = next_outcome(&mut rx).await;
        assert_eq!(epoch, 3);
        assert!(matches!(
            outcome,
            Outcome::GateScanned {
                attempt: 7,
                recognised: false
            }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_screen_change_aborts_pending_grant() {
        let temp_dir = TempDir::new().unwrap();
        let (mut runtime, mut rx) = runtime(&temp_dir, Arc::new(FixedGate(true)));

        runtime.run(
            1,
            vec![Task::GrantAfter {
                attempt: 1,
                delay: Duration::from_millis(500),
            }],
        );
        assert_eq!(runtime.pending(), 1);

        runtime.run(2, Vec::new());
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_grant_fires_after_delay() {
        let temp_dir = TempDir::new().unwrap();
        let (mut runtime, mut rx) = runtime(&temp_dir, Arc::new(FixedGate(true)));

        runtime.run(
            1,
            vec![Task::GrantAfter {
                attempt: 4,
                delay: Duration::from_millis(500),
            }],
        );
        let (_, outcome) = next_outcome(&mut rx).await;
        assert!(matches!(outcome, Outcome::GateDelayElapsed { attempt: 4 }));
    }

    #[tokio::test]
    async fn test_abort_scan_silences_gate() {
        let temp_dir = TempDir::new().unwrap();
        let (mut runtime, mut rx) = runtime(&temp_dir, Arc::new(StuckGate));

        runtime.run(1, vec![Task::Scan { attempt: 1 }]);
        runtime.run(1, vec![Task::AbortScan]);
        assert!(runtime.scan.is_none());

        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_immediate_tasks_persist() {
        let temp_dir = TempDir::new().unwrap();
        let (mut runtime, mut rx) = runtime(&temp_dir, Arc::new(FixedGate(true)));

        let profile = UserProfile::register("Ana", "ana@example.com", "1234", true).unwrap();
        runtime.run(
            1,
            vec![
                Task::SaveProfile(profile.clone()),
                Task::RecordActivity(ActivityEntry::new(
                    GateKind::SignIn,
                    AuthMethod::Pin,
                    true,
                )),
            ],
        );
        assert_eq!(runtime.credentials.profile(), Some(&profile));

        runtime.run(1, vec![Task::LoadActivity]);
        let (_, outcome) = next_outcome(&mut rx).await;
        match outcome {
            Outcome::ActivityLoaded(Ok(entries)) => assert_eq!(entries.len(), 1),
            other => panic!("unexpected {:?}", other),
        }

        // A fresh store sees the saved profile
        let reopened = CredentialStore::open(
            VaultPaths::with_base_dir(temp_dir.path().to_path_buf()).credentials_file(),
            security(),
        );
        assert_eq!(reopened.profile(), Some(&profile));
    }

    #[tokio::test]
    async fn test_bootstrap_sends_credentials() {
        let temp_dir = TempDir::new().unwrap();
        let (runtime, mut rx) = runtime(&temp_dir, Arc::new(FixedGate(true)));

        runtime.bootstrap();
        let (_, outcome) = next_outcome(&mut rx).await;
        assert!(matches!(outcome, Outcome::CredentialsLoaded(ref c) if c.profile.is_none()));
    }
}
