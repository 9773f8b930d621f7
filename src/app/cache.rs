//! Local mirror of a folder listing
//!
//! The cache is replaced wholesale on refresh and edited optimistically in
//! between. It never talks to the repository itself; the navigator issues
//! the calls and feeds results back in.

use crate::error::{VaultError, VaultResult};
use crate::models::{Folder, FolderId, FolderType, NewFolder, SecurityLevel};

#[derive(Debug, Clone, Default)]
pub struct FolderCache {
    folders: Vec<Folder>,
    loading: bool,
}

impl FolderCache {
    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn mark_loading(&mut self) {
        self.loading = true;
    }

    /// Replace the whole list with a fresh listing
    pub fn replace(&mut self, folders: Vec<Folder>) {
        self.folders = folders;
        self.loading = false;
    }

    /// A refresh failed; keep what we had
    pub fn refresh_failed(&mut self) {
        self.loading = false;
    }

    pub fn clear(&mut self) {
        self.folders.clear();
        self.loading = false;
    }

    pub fn get(&self, id: &FolderId) -> Option<&Folder> {
        self.folders.iter().find(|f| &f.id == id)
    }

    /// Add a folder the repository just created. The listing is newest
    /// first, so it goes on top.
    pub fn insert_created(&mut self, folder: Folder) {
        self.folders.retain(|f| f.id != folder.id);
        self.folders.insert(0, folder);
    }

    /// Drop a folder from the view ahead of the repository confirming
    pub fn remove(&mut self, id: &FolderId) -> Option<Folder> {
        let index = self.folders.iter().position(|f| &f.id == id)?;
        Some(self.folders.remove(index))
    }

    /// Follow item creations and deletions
    pub fn adjust_item_count(&mut self, id: &FolderId, delta: i64) {
        if let Some(folder) = self.folders.iter_mut().find(|f| &f.id == id) {
            folder.item_count = folder.item_count.saturating_add_signed(delta);
        }
    }

    /// Take the count from a fresh item listing
    pub fn set_item_count(&mut self, id: &FolderId, count: u64) {
        if let Some(folder) = self.folders.iter_mut().find(|f| &f.id == id) {
            folder.item_count = count;
        }
    }

    /// Case-insensitive name filter; an empty query matches everything
    pub fn search(&self, query: &str) -> Vec<&Folder> {
        let query = query.trim().to_lowercase();
        self.folders
            .iter()
            .filter(|f| query.is_empty() || f.name.to_lowercase().contains(&query))
            .collect()
    }
}

/// Validate new-folder input before anything reaches the repository
pub fn validate_new_folder(
    name: &str,
    folder_type: FolderType,
    security_level: Option<SecurityLevel>,
) -> VaultResult<NewFolder> {
    let name = name.trim();
    if name.is_empty() {
        return Err(VaultError::Validation("Folder name is required".into()));
    }
    Ok(NewFolder {
        name: name.to_string(),
        folder_type: Some(folder_type),
        security_level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(id: &str, name: &str) -> Folder {
        let mut folder = Folder::new(name, FolderType::Notas);
        folder.id = FolderId::from(id);
        folder
    }

    #[test]
    fn test_replace_and_remove() {
        let mut cache = FolderCache::default();
        cache.mark_loading();
        cache.replace(vec![folder("a", "Alpha"), folder("b", "Beta")]);
        assert!(!cache.is_loading());

        let removed = cache.remove(&FolderId::from("a")).unwrap();
        assert_eq!(removed.name, "Alpha");
        assert_eq!(cache.folders().len(), 1);
        assert!(cache.remove(&FolderId::from("a")).is_none());
    }

    #[test]
    fn test_insert_created_goes_first_once() {
        let mut cache = FolderCache::default();
        cache.replace(vec![folder("a", "Alpha")]);
        cache.insert_created(folder("f1", "Finance"));
        cache.insert_created(folder("f1", "Finance"));

        let ids: Vec<_> = cache.folders().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["f1", "a"]);
    }

    #[test]
    fn test_item_count_never_negative() {
        let mut cache = FolderCache::default();
        cache.replace(vec![folder("a", "Alpha")]);
        cache.adjust_item_count(&FolderId::from("a"), 2);
        cache.adjust_item_count(&FolderId::from("a"), -5);
        assert_eq!(cache.get(&FolderId::from("a")).unwrap().item_count, 0);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut cache = FolderCache::default();
        cache.replace(vec![folder("a", "Tax Returns"), folder("b", "Photos")]);
        assert_eq!(cache.search("tax").len(), 1);
        assert_eq!(cache.search("  ").len(), 2);
        assert!(cache.search("zzz").is_empty());
    }

    #[test]
    fn test_validate_new_folder() {
        assert!(validate_new_folder("   ", FolderType::Notas, None)
            .unwrap_err()
            .is_validation());
        let request = validate_new_folder(" Finance ", FolderType::Documentos, None).unwrap();
        assert_eq!(request.name, "Finance");
        assert_eq!(request.folder_type, Some(FolderType::Documentos));
    }
}
