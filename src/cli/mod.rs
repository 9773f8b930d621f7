//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the repository and the
//! credential store.

pub mod activity;
pub mod folder;
pub mod item;
pub mod profile;

pub use activity::{handle_activity_command, ActivityArgs};
pub use folder::{handle_folder_command, FolderCommands};
pub use item::{handle_item_command, ItemCommands};
pub use profile::{handle_profile_command, ProfileCommands};
