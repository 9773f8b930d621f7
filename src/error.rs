//! Custom error types for BioVault
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for BioVault operations
#[derive(Error, Debug)]
pub enum VaultError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors, raised before anything reaches the repository
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Encryption errors
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// The repository answered with an error status
    #[error("Repository error ({status}): {message}")]
    Repository { status: u16, message: String },

    /// Transport-level HTTP failures
    #[error("HTTP error: {0}")]
    Http(String),

    /// The platform biometric check could not be run
    #[error("Biometric error: {0}")]
    Biometric(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl VaultError {
    /// Create a "not found" error for folders
    pub fn folder_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Folder",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for items
    pub fn item_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Item",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Repository { status: 404, .. }
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Repository { status: 400, .. }
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for VaultError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Repository {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => Self::Http(err.to_string()),
        }
    }
}

/// Result type alias for BioVault operations
pub type VaultResult<T> = Result<T, VaultError>;
