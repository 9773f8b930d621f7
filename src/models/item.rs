//! Item model
//!
//! Items are the notes and files stored inside a folder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::ids::{FolderId, ItemId};

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Note,
    Voice,
    Photo,
    Scan,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Voice => "voice",
            Self::Photo => "photo",
            Self::Scan => "scan",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "note" => Some(Self::Note),
            "voice" | "audio" => Some(Self::Voice),
            "photo" | "image" => Some(Self::Photo),
            "scan" => Some(Self::Scan),
            _ => None,
        }
    }

    /// True for the kinds that carry an uploaded file
    pub fn is_file(&self) -> bool {
        !matches!(self, Self::Note)
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored note or file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,

    #[serde(rename = "type")]
    pub item_type: ItemType,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub content: Option<String>,

    /// Where the uploaded file can be fetched from
    #[serde(default)]
    pub file_url: Option<String>,

    /// Human readable size, e.g. "12.4 KB"
    #[serde(default)]
    pub file_size: Option<String>,

    /// Recording length, voice items only
    #[serde(default)]
    pub duration: Option<String>,

    pub folder_id: FolderId,

    #[serde(default)]
    pub encrypted: bool,

    pub created_at: DateTime<Utc>,
}

/// Request to add an item to a folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewItem {
    /// A text note, sent as JSON
    Note {
        title: String,
        description: String,
        content: String,
    },
    /// A photo, scan or voice recording read from disk and uploaded
    File {
        kind: ItemType,
        title: String,
        description: String,
        path: PathBuf,
        duration: Option<String>,
    },
}

impl NewItem {
    pub fn item_type(&self) -> ItemType {
        match self {
            Self::Note { .. } => ItemType::Note,
            Self::File { kind, .. } => *kind,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Note { title, .. } | Self::File { title, .. } => title,
        }
    }
}

/// Title used when the caller leaves it empty
pub fn default_title(item_type: ItemType) -> String {
    format!("New {}", item_type)
}

/// Size label for a note body. Always reported in KB.
pub fn note_size(content: &str) -> String {
    format!("{:.1} KB", content.len() as f64 / KIB)
}

/// Size label for an uploaded file, switching to MB above one MiB
pub fn file_size(bytes: u64) -> String {
    let bytes = bytes as f64;
    if bytes > MIB {
        format!("{:.1} MB", bytes / MIB)
    } else {
        format!("{:.1} KB", bytes / KIB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_labels() {
        assert_eq!(note_size("hello"), "0.0 KB");
        assert_eq!(note_size(&"x".repeat(2048)), "2.0 KB");
        assert_eq!(file_size(1536), "1.5 KB");
        assert_eq!(file_size(1024 * 1024), "1024.0 KB");
        assert_eq!(file_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_item_wire_format() {
        let json = r#"{
            "id": "i1",
            "type": "voice",
            "title": "Memo",
            "description": "",
            "content": null,
            "fileUrl": "/uploads/1-a-memo.webm",
            "fileSize": "0.5 KB",
            "duration": "0:12",
            "folderId": "f1",
            "encrypted": true,
            "createdAt": "2024-05-01T10:00:00Z"
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_type, ItemType::Voice);
        assert_eq!(item.folder_id.as_str(), "f1");
        assert_eq!(item.duration.as_deref(), Some("0:12"));
    }

    #[test]
    fn test_default_title() {
        assert_eq!(default_title(ItemType::Scan), "New scan");
    }
}
