//! Messages into and out of the navigator
//!
//! Views turn key presses into [`Intent`]s. The runtime turns [`Task`]s into
//! repository calls, gate scans, timers and credential writes, and feeds
//! their [`Outcome`]s back tagged with the screen epoch they were issued in.

use std::path::PathBuf;
use std::time::Duration;

use crate::activity::{ActivityEntry, ActivityFilter};
use crate::error::VaultResult;
use crate::models::{
    Folder, FolderId, FolderStatus, FolderType, Item, ItemId, ItemType, NewFolder, NewItem,
    PreferenceFlag, Preferences, SecurityLevel, UserProfile,
};
use crate::storage::Credentials;

#[derive(Debug)]
pub enum Event {
    Intent(Intent),
    Outcome { epoch: u64, outcome: Outcome },
    /// One-second clock driving the viewer and idle countdowns
    Tick,
}

/// Places reachable from the dashboard without a gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Settings,
    Storage,
    Activity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    // Onboarding
    ContinueToSignIn,
    StartSignUp,

    // Sign-up
    SubmitSignUp {
        full_name: String,
        email: String,
        pin: String,
        biometrics: bool,
    },

    // Auth
    StartBiometricSignIn,
    SubmitPin(String),

    // Dashboard
    OpenFolder(FolderId),
    OpenNewFolderSheet,
    CloseNewFolderSheet,
    CreateFolder {
        name: String,
        folder_type: FolderType,
        security_level: Option<SecurityLevel>,
    },
    ChangeFolderStatus {
        id: FolderId,
        status: FolderStatus,
    },
    SetSearch(String),
    GoTo(Destination),
    LockSession,

    // Gate modal
    RetryGate,
    CancelGate,

    // Folder screens
    BrowseContents,
    OpenItem(ItemId),
    AddNote {
        title: String,
        description: String,
        content: String,
    },
    AttachFile {
        kind: ItemType,
        title: String,
        description: String,
        path: PathBuf,
        duration: Option<String>,
    },
    DeleteItem(ItemId),

    // Viewer
    LockViewer,

    // Settings
    TogglePreference(PreferenceFlag),
    SignOut,

    // Storage
    SelectStorageTab(FolderStatus),
    RestoreFolder(FolderId),
    RequestPurge(FolderId),
    ConfirmPurge,
    CancelPurge,

    // Activity
    SetActivityFilter(ActivityFilter),

    Back,
}

#[derive(Debug)]
pub enum Outcome {
    CredentialsLoaded(Credentials),
    FoldersLoaded(VaultResult<Vec<Folder>>),
    FolderCreated(VaultResult<Folder>),
    StatusChanged {
        id: FolderId,
        status: FolderStatus,
        result: VaultResult<Folder>,
    },
    StorageLoaded {
        status: FolderStatus,
        result: VaultResult<Vec<Folder>>,
    },
    FolderPurged {
        id: FolderId,
        result: VaultResult<()>,
    },
    ItemsLoaded {
        folder_id: FolderId,
        result: VaultResult<Vec<Item>>,
    },
    ItemCreated {
        folder_id: FolderId,
        result: VaultResult<Item>,
    },
    ItemDeleted {
        folder_id: FolderId,
        item_id: ItemId,
        result: VaultResult<()>,
    },
    GateScanned {
        attempt: u64,
        recognised: bool,
    },
    GateDelayElapsed {
        attempt: u64,
    },
    ActivityLoaded(VaultResult<Vec<ActivityEntry>>),
}

/// Side effects requested by the navigator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    LoadFolders,
    LoadStorage(FolderStatus),
    CreateFolder(NewFolder),
    ChangeStatus { id: FolderId, status: FolderStatus },
    PurgeFolder(FolderId),
    LoadItems(FolderId),
    CreateItem { folder_id: FolderId, item: NewItem },
    DeleteItem { folder_id: FolderId, item_id: ItemId },
    /// Run one biometric scan for the open gate
    Scan { attempt: u64 },
    /// Stop the running scan, if any
    AbortScan,
    /// Hold the verified state before granting
    GrantAfter { attempt: u64, delay: Duration },
    LoadActivity,
    RecordActivity(ActivityEntry),
    SaveProfile(UserProfile),
    ForgetProfile,
    SavePreferences(Preferences),
}

impl Task {
    /// Tasks that finish synchronously and are never aborted by a screen
    /// change
    pub fn is_immediate(&self) -> bool {
        matches!(
            self,
            Self::AbortScan
                | Self::RecordActivity(_)
                | Self::SaveProfile(_)
                | Self::ForgetProfile
                | Self::SavePreferences(_)
        )
    }
}
