//! In-process repository over the JSON storage layer

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{VaultError, VaultResult};
use crate::models::item::{default_title, file_size, note_size};
use crate::models::{
    Folder, FolderId, FolderStatus, Item, ItemId, ItemType, NewFolder, NewItem,
};
use crate::storage::Storage;

use super::VaultRepository;

/// URL prefix under which uploaded files are served
const UPLOADS_URL: &str = "/uploads";

pub struct LocalRepository {
    storage: Storage,
}

impl LocalRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    fn with_count(&self, mut folder: Folder) -> VaultResult<Folder> {
        folder.item_count = self.storage.items.count_for_folder(&folder.id)?;
        Ok(folder)
    }

    fn require_folder(&self, id: &FolderId) -> VaultResult<Folder> {
        self.storage
            .folders
            .get(id)?
            .ok_or_else(|| VaultError::folder_not_found(id.as_str()))
    }

    /// Copy an upload into the uploads directory, returning its URL and size
    async fn store_upload(&self, source: &Path) -> VaultResult<(String, u64)> {
        let bytes = tokio::fs::read(source).await.map_err(|e| {
            VaultError::Io(format!("Failed to read {}: {}", source.display(), e))
        })?;

        let original = source
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload");
        let filename = format!(
            "{}-{}-{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4(),
            original
        );

        let uploads = self.storage.paths().uploads_dir();
        tokio::fs::create_dir_all(&uploads).await?;
        tokio::fs::write(uploads.join(&filename), &bytes).await?;

        Ok((format!("{}/{}", UPLOADS_URL, filename), bytes.len() as u64))
    }

    fn remove_upload(&self, url: Option<&str>) {
        let Some(url) = url else {
            return;
        };
        let Some(filename) = url.strip_prefix(UPLOADS_URL).map(|s| s.trim_start_matches('/'))
        else {
            return;
        };
        let path = self.storage.paths().uploads_dir().join(filename);
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove upload");
        }
    }
}

#[async_trait]
impl VaultRepository for LocalRepository {
    async fn list_folders(&self, status: FolderStatus) -> VaultResult<Vec<Folder>> {
        self.storage
            .folders
            .list_by_status(status)?
            .into_iter()
            .map(|f| self.with_count(f))
            .collect()
    }

    async fn create_folder(&self, request: NewFolder) -> VaultResult<Folder> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(VaultError::Validation("Folder name is required".into()));
        }

        let mut folder = Folder::new(name, request.folder_type.unwrap_or_default());
        folder.security_level = request.security_level.unwrap_or_default();

        self.storage.folders.insert(folder.clone())?;

        tracing::info!(folder_id = %folder.id, name = %folder.name, "Created folder");
        Ok(folder)
    }

    async fn update_folder_status(
        &self,
        id: &FolderId,
        status: FolderStatus,
    ) -> VaultResult<Folder> {
        let folder = self.storage.folders.set_status(id, status)?;

        tracing::info!(folder_id = %id, %status, "Updated folder status");
        self.with_count(folder)
    }

    async fn delete_folder(&self, id: &FolderId) -> VaultResult<()> {
        let folder = self
            .storage
            .folders
            .remove(id)?
            .ok_or_else(|| VaultError::folder_not_found(id.as_str()))?;

        let removed = match self.storage.items.remove_for_folder(id) {
            Ok(removed) => removed,
            Err(e) => {
                // Put the folder back so the delete is all or nothing
                if let Err(restore) = self.storage.folders.insert(folder) {
                    tracing::error!(folder_id = %id, error = %restore, "Failed to restore folder");
                }
                return Err(e);
            }
        };
        for item in &removed {
            self.remove_upload(item.file_url.as_deref());
        }

        tracing::info!(folder_id = %id, items = removed.len(), "Deleted folder");
        Ok(())
    }

    async fn list_items(&self, folder_id: &FolderId) -> VaultResult<Vec<Item>> {
        self.storage.items.list_for_folder(folder_id)
    }

    async fn create_item(&self, folder_id: &FolderId, request: NewItem) -> VaultResult<Item> {
        self.require_folder(folder_id)?;

        let item_type = request.item_type();
        let title = match request.title().trim() {
            "" => default_title(item_type),
            t => t.to_string(),
        };

        let mut item = Item {
            id: ItemId::new(),
            item_type,
            title,
            description: String::new(),
            content: None,
            file_url: None,
            file_size: None,
            duration: None,
            folder_id: folder_id.clone(),
            encrypted: true,
            created_at: Utc::now(),
        };

        match request {
            NewItem::Note {
                description,
                content,
                ..
            } => {
                item.description = description;
                if !content.is_empty() {
                    item.file_size = Some(note_size(&content));
                    item.content = Some(content);
                }
            }
            NewItem::File {
                kind,
                description,
                path,
                duration,
                ..
            } => {
                if !kind.is_file() {
                    return Err(VaultError::Validation(
                        "Notes cannot be uploaded as files".into(),
                    ));
                }
                let (url, size) = self.store_upload(&path).await?;
                item.description = description;
                item.file_url = Some(url);
                item.file_size = Some(file_size(size));
                if kind == ItemType::Voice {
                    item.duration = duration.filter(|d| !d.is_empty());
                }
            }
        }

        if let Err(e) = self.storage.items.insert(item.clone()) {
            self.remove_upload(item.file_url.as_deref());
            return Err(e);
        }

        tracing::info!(folder_id = %folder_id, item_id = %item.id, kind = %item_type, "Created item");
        Ok(item)
    }

    async fn delete_item(&self, folder_id: &FolderId, item_id: &ItemId) -> VaultResult<()> {
        let removed = self.storage.items.remove_in_folder(folder_id, item_id)?;
        self.remove_upload(removed.file_url.as_deref());

        tracing::info!(folder_id = %folder_id, item_id = %item_id, "Deleted item");
        Ok(())
    }
}
