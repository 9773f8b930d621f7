//! Folder store backed by folders.json
//!
//! Every mutation goes through [`FolderStore::commit`], which holds the
//! write lock while the new document is written. The in-memory map only
//! changes once the file has been replaced.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{VaultError, VaultResult};
use crate::models::{Folder, FolderId, FolderStatus};

use super::file_io::{read_json, write_json_atomic};

type FolderMap = HashMap<FolderId, Folder>;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct FolderData {
    folders: Vec<Folder>,
}

impl FolderData {
    fn from_map(map: &FolderMap) -> Self {
        let mut folders: Vec<Folder> = map.values().cloned().collect();
        folders.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Self { folders }
    }
}

pub struct FolderStore {
    path: PathBuf,
    data: RwLock<FolderMap>,
}

impl FolderStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> VaultResult<RwLockReadGuard<'_, FolderMap>> {
        self.data
            .read()
            .map_err(|e| VaultError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> VaultResult<RwLockWriteGuard<'_, FolderMap>> {
        self.data
            .write()
            .map_err(|e| VaultError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Replace the in-memory folders with what is on disk
    pub fn load(&self) -> VaultResult<()> {
        let file_data: FolderData = read_json(&self.path)?;
        let mut data = self.write()?;
        *data = file_data
            .folders
            .into_iter()
            .map(|folder| (folder.id.clone(), folder))
            .collect();
        Ok(())
    }

    /// Apply `change` to a copy of the folders and persist it
    ///
    /// Nothing is kept in memory when `change` or the write fails.
    pub fn commit<R>(
        &self,
        change: impl FnOnce(&mut FolderMap) -> VaultResult<R>,
    ) -> VaultResult<R> {
        let mut data = self.write()?;
        let mut next = data.clone();
        let result = change(&mut next)?;
        write_json_atomic(&self.path, &FolderData::from_map(&next))?;
        *data = next;
        Ok(result)
    }

    pub fn get(&self, id: &FolderId) -> VaultResult<Option<Folder>> {
        Ok(self.read()?.get(id).cloned())
    }

    /// Folders with the given status, newest first
    pub fn list_by_status(&self, status: FolderStatus) -> VaultResult<Vec<Folder>> {
        let mut folders: Vec<Folder> = self
            .read()?
            .values()
            .filter(|f| f.status == status)
            .cloned()
            .collect();
        folders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(folders)
    }

    /// Add or overwrite a folder
    pub fn insert(&self, folder: Folder) -> VaultResult<()> {
        self.commit(|folders| {
            folders.insert(folder.id.clone(), folder);
            Ok(())
        })
    }

    /// Move a folder to `status`, returning the updated folder
    pub fn set_status(&self, id: &FolderId, status: FolderStatus) -> VaultResult<Folder> {
        self.commit(|folders| {
            let folder = folders
                .get_mut(id)
                .ok_or_else(|| VaultError::folder_not_found(id.as_str()))?;
            folder.status = status;
            Ok(folder.clone())
        })
    }

    /// Remove a folder, returning it if it existed
    pub fn remove(&self, id: &FolderId) -> VaultResult<Option<Folder>> {
        self.commit(|folders| Ok(folders.remove(id)))
    }
}
