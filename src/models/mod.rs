//! Core data models for BioVault
//!
//! Folders, the items stored in them, and the enrolled user's profile.

pub mod folder;
pub mod ids;
pub mod item;
pub mod profile;

pub use folder::{Folder, FolderStatus, FolderType, NewFolder, SecurityLevel};
pub use ids::{FolderId, ItemId};
pub use item::{Item, ItemType, NewItem};
pub use profile::{PreferenceFlag, Preferences, UserProfile, PIN_LENGTH};
