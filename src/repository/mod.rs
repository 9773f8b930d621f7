//! Folder and item repository
//!
//! [`VaultRepository`] is the request/response boundary for folder and item
//! CRUD. Two backends implement it: [`LocalRepository`] keeps JSON files
//! under the data directory, [`HttpRepository`] talks to a remote folder API.

pub mod http;
pub mod local;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{RepositoryBackend, Settings, VaultPaths};
use crate::error::VaultResult;
use crate::models::{Folder, FolderId, FolderStatus, Item, ItemId, NewFolder, NewItem};
use crate::storage::Storage;

pub use http::HttpRepository;
pub use local::LocalRepository;

#[async_trait]
pub trait VaultRepository: Send + Sync {
    /// Folders with the given status, newest first, with item counts
    async fn list_folders(&self, status: FolderStatus) -> VaultResult<Vec<Folder>>;

    /// Create an active folder. An empty name is a validation error.
    async fn create_folder(&self, request: NewFolder) -> VaultResult<Folder>;

    async fn update_folder_status(&self, id: &FolderId, status: FolderStatus)
        -> VaultResult<Folder>;

    /// Permanently delete a folder and every item in it
    async fn delete_folder(&self, id: &FolderId) -> VaultResult<()>;

    /// Items in a folder, newest first
    async fn list_items(&self, folder_id: &FolderId) -> VaultResult<Vec<Item>>;

    async fn create_item(&self, folder_id: &FolderId, item: NewItem) -> VaultResult<Item>;

    async fn delete_item(&self, folder_id: &FolderId, item_id: &ItemId) -> VaultResult<()>;
}

/// Build the repository selected in settings.
///
/// `api_url` overrides the configured backend with an HTTP one.
pub fn open_repository(
    settings: &Settings,
    paths: &VaultPaths,
    api_url: Option<&str>,
) -> VaultResult<Arc<dyn VaultRepository>> {
    let backend = match api_url {
        Some(url) => RepositoryBackend::Http {
            base_url: url.to_string(),
            timeout_seconds: match &settings.repository {
                RepositoryBackend::Http {
                    timeout_seconds, ..
                } => *timeout_seconds,
                RepositoryBackend::Local => 30,
            },
        },
        None => settings.repository.clone(),
    };

    match backend {
        RepositoryBackend::Local => {
            let storage = Storage::new(paths.clone())?;
            storage.load_all()?;
            tracing::debug!(path = %paths.data_dir().display(), "Using local repository");
            Ok(Arc::new(LocalRepository::new(storage)))
        }
        RepositoryBackend::Http {
            base_url,
            timeout_seconds,
        } => {
            tracing::debug!(%base_url, "Using HTTP repository");
            Ok(Arc::new(HttpRepository::new(
                base_url,
                Duration::from_secs(timeout_seconds),
            )?))
        }
    }
}
