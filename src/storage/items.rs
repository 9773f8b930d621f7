//! Item store backed by items.json
//!
//! Mutations follow the same copy, write, swap sequence as the folder
//! store.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{VaultError, VaultResult};
use crate::models::{FolderId, Item, ItemId};

use super::file_io::{read_json, write_json_atomic};

type ItemMap = HashMap<ItemId, Item>;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ItemData {
    items: Vec<Item>,
}

pub struct ItemStore {
    path: PathBuf,
    data: RwLock<ItemMap>,
}

impl ItemStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> VaultResult<RwLockReadGuard<'_, ItemMap>> {
        self.data
            .read()
            .map_err(|e| VaultError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    /// Replace the in-memory items with what is on disk
    pub fn load(&self) -> VaultResult<()> {
        let file_data: ItemData = read_json(&self.path)?;
        let mut data = self.write()?;
        *data = file_data
            .items
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();
        Ok(())
    }

    fn write(&self) -> VaultResult<RwLockWriteGuard<'_, ItemMap>> {
        self.data
            .write()
            .map_err(|e| VaultError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Apply `change` to a copy of the items and persist it
    pub fn commit<R>(
        &self,
        change: impl FnOnce(&mut ItemMap) -> VaultResult<R>,
    ) -> VaultResult<R> {
        let mut data = self.write()?;
        let mut next = data.clone();
        let result = change(&mut next)?;

        let mut items: Vec<Item> = next.values().cloned().collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        write_json_atomic(&self.path, &ItemData { items })?;

        *data = next;
        Ok(result)
    }

    /// Items in a folder, newest first
    pub fn list_for_folder(&self, folder_id: &FolderId) -> VaultResult<Vec<Item>> {
        let mut items: Vec<Item> = self
            .read()?
            .values()
            .filter(|i| &i.folder_id == folder_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    pub fn count_for_folder(&self, folder_id: &FolderId) -> VaultResult<u64> {
        Ok(self
            .read()?
            .values()
            .filter(|i| &i.folder_id == folder_id)
            .count() as u64)
    }

    pub fn insert(&self, item: Item) -> VaultResult<()> {
        self.commit(|items| {
            items.insert(item.id.clone(), item);
            Ok(())
        })
    }

    /// Remove an item that belongs to `folder_id`
    ///
    /// An item filed under another folder is reported as not found.
    pub fn remove_in_folder(&self, folder_id: &FolderId, id: &ItemId) -> VaultResult<Item> {
        self.commit(|items| {
            let in_folder = items
                .get(id)
                .map_or(false, |item| &item.folder_id == folder_id);
            if !in_folder {
                return Err(VaultError::item_not_found(id.as_str()));
            }
            items
                .remove(id)
                .ok_or_else(|| VaultError::item_not_found(id.as_str()))
        })
    }

    /// Remove every item in a folder, returning what was removed
    pub fn remove_for_folder(&self, folder_id: &FolderId) -> VaultResult<Vec<Item>> {
        self.commit(|items| {
            let ids: Vec<ItemId> = items
                .values()
                .filter(|i| &i.folder_id == folder_id)
                .map(|i| i.id.clone())
                .collect();
            Ok(ids.iter().filter_map(|id| items.remove(id)).collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemType;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn note(folder: &str, title: &str, minutes_ago: i64) -> Item {
        Item {
            id: ItemId::new(),
            item_type: ItemType::Note,
            title: title.into(),
            description: String::new(),
            content: Some("body".into()),
            file_url: None,
            file_size: None,
            duration: None,
            folder_id: FolderId::from(folder),
            encrypted: true,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_list_for_folder_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        let store = ItemStore::new(temp_dir.path().join("items.json"));
        store.insert(note("f1", "old", 10)).unwrap();
        store.insert(note("f1", "new", 1)).unwrap();
        store.insert(note("f2", "other", 5)).unwrap();

        let items = store.list_for_folder(&FolderId::from("f1")).unwrap();
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["new", "old"]);
        assert_eq!(store.count_for_folder(&FolderId::from("f2")).unwrap(), 1);
    }

    #[test]
    fn test_remove_for_folder() {
        let temp_dir = TempDir::new().unwrap();
        let store = ItemStore::new(temp_dir.path().join("items.json"));
        store.insert(note("f1", "a", 1)).unwrap();
        store.insert(note("f1", "b", 2)).unwrap();
        store.insert(note("f2", "c", 3)).unwrap();

        let removed = store.remove_for_folder(&FolderId::from("f1")).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(store.count_for_folder(&FolderId::from("f1")).unwrap(), 0);
        assert_eq!(store.count_for_folder(&FolderId::from("f2")).unwrap(), 1);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("items.json");
        let store = ItemStore::new(path.clone());
        store.insert(note("f1", "kept", 0)).unwrap();

        let reloaded = ItemStore::new(path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.count_for_folder(&FolderId::from("f1")).unwrap(), 1);
    }

    #[test]
    fn test_remove_checks_owning_folder() {
        let temp_dir = TempDir::new().unwrap();
        let store = ItemStore::new(temp_dir.path().join("items.json"));
        let item = note("f2", "wifi", 0);
        let id = item.id.clone();
        store.insert(item).unwrap();

        let err = store
            .remove_in_folder(&FolderId::from("f1"), &id)
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.count_for_folder(&FolderId::from("f2")).unwrap(), 1);

        let removed = store.remove_in_folder(&FolderId::from("f2"), &id).unwrap();
        assert_eq!(removed.title, "wifi");
        assert_eq!(store.count_for_folder(&FolderId::from("f2")).unwrap(), 0);
    }

    #[test]
    fn test_failed_write_keeps_memory_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("items.json");
        let store = ItemStore::new(path.clone());
        store.insert(note("f1", "first", 0)).unwrap();

        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("blocker"), "x").unwrap();

        assert!(store.insert(note("f1", "second", 0)).is_err());
        assert!(store.remove_for_folder(&FolderId::from("f1")).is_err());
        assert_eq!(store.count_for_folder(&FolderId::from("f1")).unwrap(), 1);
    }
}
