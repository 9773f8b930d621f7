//! Terminal output formatting for CLI commands

pub mod activity;
pub mod folder;
pub mod item;

pub use activity::format_activity;
pub use folder::{format_folder_details, format_folder_list};
pub use item::{format_item_list, format_item_saved};
