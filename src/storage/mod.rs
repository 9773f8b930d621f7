//! Storage layer for BioVault
//!
//! JSON file storage for folders and items, where each change is written
//! before it becomes visible, plus the encrypted credential store.

pub mod credentials;
pub mod file_io;
pub mod folders;
pub mod items;

pub use credentials::{CredentialStore, Credentials};
pub use file_io::{read_json, write_json_atomic};
pub use folders::FolderStore;
pub use items::ItemStore;

use crate::config::paths::VaultPaths;
use crate::error::VaultError;

/// Coordinator over the folder and item files
pub struct Storage {
    paths: VaultPaths,
    pub folders: FolderStore,
    pub items: ItemStore,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: VaultPaths) -> Result<Self, VaultError> {
        paths.ensure_directories()?;

        Ok(Self {
            folders: FolderStore::new(paths.folders_file()),
            items: ItemStore::new(paths.items_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &VaultPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), VaultError> {
        self.folders.load()?;
        self.items.load()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Folder, FolderStatus, FolderType};
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").join("uploads").exists());
        storage.load_all().unwrap();
        assert!(storage.folders.list_by_status(FolderStatus::Active).unwrap().is_empty());

        storage
            .folders
            .insert(Folder::new("Inbox", FolderType::Notas))
            .unwrap();
        assert!(storage.paths().folders_file().exists());
    }
}
