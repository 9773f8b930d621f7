//! Folder model
//!
//! Folders group notes and files and move through a lifecycle of
//! active, hidden, archived and deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::FolderId;
use crate::error::{VaultError, VaultResult};

/// Kind of content a folder is meant for.
///
/// Wire values are the ones the folder API has always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FolderType {
    Documentos,
    Hojas,
    Media,
    Notas,
    Claves,
    Diario,
    #[default]
    Privado,
}

impl FolderType {
    pub const ALL: [FolderType; 7] = [
        Self::Documentos,
        Self::Hojas,
        Self::Media,
        Self::Notas,
        Self::Claves,
        Self::Diario,
        Self::Privado,
    ];

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Documentos => "documentos",
            Self::Hojas => "hojas",
            Self::Media => "media",
            Self::Notas => "notas",
            Self::Claves => "claves",
            Self::Diario => "diario",
            Self::Privado => "privado",
        }
    }

    /// Parse from the wire value or its English label
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "documentos" | "documents" => Some(Self::Documentos),
            "hojas" | "sheets" => Some(Self::Hojas),
            "media" => Some(Self::Media),
            "notas" | "notes" => Some(Self::Notas),
            "claves" | "keys" | "passwords" => Some(Self::Claves),
            "diario" | "journal" => Some(Self::Diario),
            "privado" | "private" => Some(Self::Privado),
            _ => None,
        }
    }
}

impl fmt::Display for FolderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Documentos => "Documents",
            Self::Hojas => "Sheets",
            Self::Media => "Media",
            Self::Notas => "Notes",
            Self::Claves => "Keys",
            Self::Diario => "Journal",
            Self::Privado => "Private",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    Standard,
    #[default]
    Enhanced,
    Maximum,
}

impl SecurityLevel {
    pub const ALL: [SecurityLevel; 3] = [Self::Standard, Self::Enhanced, Self::Maximum];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Some(Self::Standard),
            "enhanced" => Some(Self::Enhanced),
            "maximum" | "max" => Some(Self::Maximum),
            _ => None,
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "Standard"),
            Self::Enhanced => write!(f, "Enhanced"),
            Self::Maximum => write!(f, "Maximum"),
        }
    }
}

/// Lifecycle status of a folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FolderStatus {
    #[default]
    Active,
    Hidden,
    Archived,
    Deleted,
}

impl FolderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Hidden => "hidden",
            Self::Archived => "archived",
            Self::Deleted => "deleted",
        }
    }

    /// Parse a status string, rejecting anything outside the lifecycle
    pub fn parse(s: &str) -> VaultResult<Self> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "hidden" => Ok(Self::Hidden),
            "archived" => Ok(Self::Archived),
            "deleted" => Ok(Self::Deleted),
            other => Err(VaultError::Validation(format!(
                "Invalid status '{}'. Valid: active, hidden, archived, deleted",
                other
            ))),
        }
    }
}

impl fmt::Display for FolderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A folder as held by the repository and mirrored in the cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: FolderId,

    pub name: String,

    pub folder_type: FolderType,

    /// Number of items in the folder, computed by the repository
    #[serde(default)]
    pub item_count: u64,

    pub security_level: SecurityLevel,

    pub status: FolderStatus,

    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Create a new active folder
    pub fn new(name: impl Into<String>, folder_type: FolderType) -> Self {
        Self {
            id: FolderId::new(),
            name: name.into(),
            folder_type,
            item_count: 0,
            security_level: SecurityLevel::default(),
            status: FolderStatus::Active,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.folder_type)
    }
}

/// Request to create a folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFolder {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_type: Option<FolderType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_level: Option<SecurityLevel>,
}

impl NewFolder {
    pub fn new(name: impl Into<String>, folder_type: FolderType) -> Self {
        Self {
            name: name.into(),
            folder_type: Some(folder_type),
            security_level: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_wire_format() {
        let mut folder = Folder::new("Finance", FolderType::Documentos);
        folder.id = FolderId::from("f1");

        let json = serde_json::to_value(&folder).unwrap();
        assert_eq!(json["id"], "f1");
        assert_eq!(json["folderType"], "documentos");
        assert_eq!(json["securityLevel"], "enhanced");
        assert_eq!(json["status"], "active");
        assert_eq!(json["itemCount"], 0);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(FolderStatus::parse("Archived").unwrap(), FolderStatus::Archived);
        let err = FolderStatus::parse("frozen").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_folder_type_parse() {
        assert_eq!(FolderType::parse("notes"), Some(FolderType::Notas));
        assert_eq!(FolderType::parse("claves"), Some(FolderType::Claves));
        assert_eq!(FolderType::parse("unknown"), None);
        for kind in FolderType::ALL {
            assert_eq!(FolderType::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_security_level_parse() {
        assert_eq!(SecurityLevel::parse("Maximum"), Some(SecurityLevel::Maximum));
        assert_eq!(SecurityLevel::parse("max"), Some(SecurityLevel::Maximum));
        assert_eq!(SecurityLevel::parse("paranoid"), None);
    }

    #[test]
    fn test_new_folder_omits_unset_fields() {
        let request = NewFolder {
            name: "Tax".into(),
            folder_type: None,
            security_level: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"name":"Tax"}"#);
    }
}
