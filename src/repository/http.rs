//! HTTP client for a remote folder API
//!
//! Folder payloads may carry the item count either as `itemCount` or in
//! the ORM shape `_count.items`; both are accepted.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;

use crate::error::{VaultError, VaultResult};
use crate::models::{
    Folder, FolderId, FolderStatus, FolderType, Item, ItemId, NewFolder, NewItem, SecurityLevel,
};

use super::VaultRepository;

pub struct HttpRepository {
    base_url: String,
    client: Client,
}

impl HttpRepository {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> VaultResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VaultError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success response into a repository error carrying the
    /// server's `error` message when there is one
    async fn check(response: Response) -> VaultResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);

        Err(VaultError::Repository {
            status: status.as_u16(),
            message,
        })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct CountRecord {
    #[serde(default)]
    items: u64,
}

/// Folder as it arrives on the wire
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FolderRecord {
    id: FolderId,
    name: String,
    #[serde(default)]
    folder_type: FolderType,
    #[serde(default)]
    security_level: SecurityLevel,
    #[serde(default)]
    status: FolderStatus,
    #[serde(default)]
    item_count: Option<u64>,
    #[serde(default, rename = "_count")]
    count: Option<CountRecord>,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
}

impl From<FolderRecord> for Folder {
    fn from(record: FolderRecord) -> Self {
        let item_count = record
            .item_count
            .or(record.count.map(|c| c.items))
            .unwrap_or(0);

        Self {
            id: record.id,
            name: record.name,
            folder_type: record.folder_type,
            item_count,
            security_level: record.security_level,
            status: record.status,
            created_at: record.created_at,
        }
    }
}

#[async_trait]
impl VaultRepository for HttpRepository {
    async fn list_folders(&self, status: FolderStatus) -> VaultResult<Vec<Folder>> {
        let response = self
            .client
            .get(self.url("/folders"))
            .query(&[("status", status.as_str())])
            .send()
            .await?;

        let records: Vec<FolderRecord> = Self::check(response).await?.json().await?;
        Ok(records.into_iter().map(Folder::from).collect())
    }

    async fn create_folder(&self, request: NewFolder) -> VaultResult<Folder> {
        if request.name.trim().is_empty() {
            return Err(VaultError::Validation("Folder name is required".into()));
        }

        let response = self
            .client
            .post(self.url("/folders"))
            .json(&request)
            .send()
            .await?;

        let record: FolderRecord = Self::check(response).await?.json().await?;
        Ok(record.into())
    }

    async fn update_folder_status(
        &self,
        id: &FolderId,
        status: FolderStatus,
    ) -> VaultResult<Folder> {
        let response = self
            .client
            .patch(self.url(&format!("/folders/{}", id)))
            .json(&json!({ "status": status }))
            .send()
            .await?;

        let record: FolderRecord = Self::check(response).await?.json().await?;
        Ok(record.into())
    }

    async fn delete_folder(&self, id: &FolderId) -> VaultResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/folders/{}", id)))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    async fn list_items(&self, folder_id: &FolderId) -> VaultResult<Vec<Item>> {
        let response = self
            .client
            .get(self.url(&format!("/folders/{}/items", folder_id)))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn create_item(&self, folder_id: &FolderId, item: NewItem) -> VaultResult<Item> {
        let url = self.url(&format!("/folders/{}/items", folder_id));

        let request = match item {
            NewItem::Note {
                title,
                description,
                content,
            } => self.client.post(url).json(&json!({
                "type": "note",
                "title": title,
                "description": description,
                "content": content,
            })),
            NewItem::File {
                kind,
                title,
                description,
                path,
                duration,
            } => {
                let bytes = tokio::fs::read(&path).await.map_err(|e| {
                    VaultError::Io(format!("Failed to read {}: {}", path.display(), e))
                })?;
                let file_name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("upload")
                    .to_string();

                let mut form = reqwest::multipart::Form::new()
                    .text("type", kind.as_str())
                    .text("title", title)
                    .text("description", description)
                    .part(
                        "file",
                        reqwest::multipart::Part::bytes(bytes).file_name(file_name),
                    );
                if let Some(duration) = duration {
                    form = form.text("duration", duration);
                }
                self.client.post(url).multipart(form)
            }
        };

        let response = request.send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete_item(&self, folder_id: &FolderId, item_id: &ItemId) -> VaultResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/folders/{}/items/{}", folder_id, item_id)))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemType;
    use wiremock::matchers::{body_json, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repo(server: &MockServer) -> HttpRepository {
        HttpRepository::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_list_accepts_both_count_shapes() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/folders"))
            .and(query_param("status", "active"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": "f2", "name": "Media", "folderType": "media",
                    "securityLevel": "standard", "status": "active",
                    "createdAt": "2024-05-02T00:00:00Z", "_count": { "items": 4 }
                },
                {
                    "id": "f1", "name": "Finance", "folderType": "documentos",
                    "securityLevel": "enhanced", "status": "active",
                    "createdAt": "2024-05-01T00:00:00Z", "itemCount": 2
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let folders = repo(&server)
            .list_folders(FolderStatus::Active)
            .await
            .unwrap();

        assert_eq!(folders.len(), 2);
        assert_eq!(folders[0].item_count, 4);
        assert_eq!(folders[1].item_count, 2);
        assert_eq!(folders[1].folder_type, FolderType::Documentos);
    }

    #[tokio::test]
    async fn test_create_folder_posts_camel_case() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/folders"))
            .and(body_json(json!({"name": "Finance", "folderType": "documentos"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "f1", "name": "Finance", "folderType": "documentos",
                "securityLevel": "enhanced", "status": "active",
                "createdAt": "2024-05-01T00:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let folder = repo(&server)
            .create_folder(NewFolder::new("Finance", FolderType::Documentos))
            .await
            .unwrap();

        assert_eq!(folder.id.as_str(), "f1");
        assert_eq!(folder.item_count, 0);
        assert_eq!(folder.security_level, SecurityLevel::Enhanced);
    }

    #[tokio::test]
    async fn test_empty_name_never_reaches_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = repo(&server)
            .create_folder(NewFolder::new("  ", FolderType::Notas))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_patch_rejection_maps_to_validation() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/folders/f1"))
            .and(body_json(json!({"status": "archived"})))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid status"})),
            )
            .mount(&server)
            .await;

        let err = repo(&server)
            .update_folder_status(&FolderId::from("f1"), FolderStatus::Archived)
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Repository error (400): Invalid status");
    }

    #[tokio::test]
    async fn test_server_error_is_repository_error() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/folders/f1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = repo(&server)
            .delete_folder(&FolderId::from("f1"))
            .await
            .unwrap_err();
        assert!(matches!(err, VaultError::Repository { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_note_and_file_items() {
        let server = MockServer::start().await;
        let item = |kind: &str| {
            json!({
                "id": "i1", "type": kind, "title": "t", "description": "",
                "folderId": "f1", "encrypted": true,
                "createdAt": "2024-05-01T00:00:00Z"
            })
        };

        Mock::given(method("POST"))
            .and(path("/folders/f1/items"))
            .and(body_json(json!({
                "type": "note", "title": "t", "description": "", "content": "body"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(item("note")))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/folders/f1/items"))
            .and(header_exists("content-type"))
            .respond_with(ResponseTemplate::new(200).set_body_json(item("scan")))
            .mount(&server)
            .await;

        let repo = repo(&server);
        let folder = FolderId::from("f1");

        let note = repo
            .create_item(
                &folder,
                NewItem::Note {
                    title: "t".into(),
                    description: String::new(),
                    content: "body".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(note.item_type, ItemType::Note);

        let temp_dir = tempfile::TempDir::new().unwrap();
        let scan_path = temp_dir.path().join("receipt.png");
        std::fs::write(&scan_path, b"png").unwrap();

        let scan = repo
            .create_item(
                &folder,
                NewItem::File {
                    kind: ItemType::Scan,
                    title: "t".into(),
                    description: String::new(),
                    path: scan_path,
                    duration: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(scan.item_type, ItemType::Scan);
    }
}
