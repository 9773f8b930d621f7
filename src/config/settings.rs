//! User settings for BioVault
//!
//! Manages which repository and biometric backend to use, lock timers, and
//! the key-derivation parameters for the credential store.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::VaultPaths;
use crate::crypto::key_derivation::KeyDerivationParams;
use crate::error::VaultError;

/// Where folders and items live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RepositoryBackend {
    /// JSON files under the data directory
    Local,
    /// A remote folder API
    Http {
        base_url: String,
        #[serde(default = "default_http_timeout")]
        timeout_seconds: u64,
    },
}

impl Default for RepositoryBackend {
    fn default() -> Self {
        Self::Local
    }
}

fn default_http_timeout() -> u64 {
    30
}

/// How the platform biometric check is performed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BiometricBackend {
    /// Run a verifier program; exit status 0 means the user was recognised
    Command {
        program: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

impl Default for BiometricBackend {
    fn default() -> Self {
        Self::Command {
            program: "fprintd-verify".to_string(),
            args: Vec::new(),
        }
    }
}

/// What the user sees when a folder creation fails on the repository side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CreateFailurePolicy {
    /// Log only; the sheet closes and nothing else happens
    #[default]
    Silent,
    /// Log and show a notice
    Notify,
}

/// User settings for BioVault
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Folder/item repository backend
    #[serde(default)]
    pub repository: RepositoryBackend,

    /// Biometric gate backend
    #[serde(default)]
    pub biometrics: BiometricBackend,

    /// Pause between a successful scan and the granted transition
    #[serde(default = "default_verified_delay_ms")]
    pub verified_delay_ms: u64,

    /// Seconds a document stays open in the viewer before it locks
    #[serde(default = "default_viewer_lock_seconds")]
    pub viewer_lock_seconds: u32,

    /// Idle seconds before the session locks back to the sign-in screen
    #[serde(default = "default_idle_lock_seconds")]
    pub idle_lock_seconds: u32,

    /// Behaviour when folder creation fails
    #[serde(default)]
    pub create_failure: CreateFailurePolicy,

    /// Argon2 parameters for the credential store key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_params: Option<KeyDerivationParams>,

    /// Default log filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_verified_delay_ms() -> u64 {
    500
}

fn default_viewer_lock_seconds() -> u32 {
    59
}

fn default_idle_lock_seconds() -> u32 {
    300
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            repository: RepositoryBackend::default(),
            biometrics: BiometricBackend::default(),
            verified_delay_ms: default_verified_delay_ms(),
            viewer_lock_seconds: default_viewer_lock_seconds(),
            idle_lock_seconds: default_idle_lock_seconds(),
            create_failure: CreateFailurePolicy::default(),
            key_params: None,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &VaultPaths) -> Result<Self, VaultError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| VaultError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                VaultError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &VaultPaths) -> Result<(), VaultError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| VaultError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| VaultError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Generate key-derivation parameters on first use.
    ///
    /// Returns true when new parameters were created and the settings need
    /// saving.
    pub fn ensure_key_params(&mut self) -> bool {
        if self.key_params.is_some() {
            return false;
        }
        self.key_params = Some(KeyDerivationParams::new());
        true
    }

    pub fn verified_delay(&self) -> Duration {
        Duration::from_millis(self.verified_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.repository, RepositoryBackend::Local);
        assert_eq!(settings.verified_delay(), Duration::from_millis(500));
        assert_eq!(settings.viewer_lock_seconds, 59);
        assert_eq!(settings.create_failure, CreateFailurePolicy::Silent);
        assert!(settings.key_params.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.repository = RepositoryBackend::Http {
            base_url: "http://localhost:3000/api".into(),
            timeout_seconds: 10,
        };
        settings.create_failure = CreateFailurePolicy::Notify;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.repository, settings.repository);
        assert_eq!(loaded.create_failure, CreateFailurePolicy::Notify);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"idle_lock_seconds": 60}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.idle_lock_seconds, 60);
        assert_eq!(loaded.biometrics, BiometricBackend::default());
    }

    #[test]
    fn test_ensure_key_params_only_once() {
        let mut settings = Settings::default();
        assert!(settings.ensure_key_params());
        let salt = settings.key_params.as_ref().unwrap().salt.clone();
        assert!(!settings.ensure_key_params());
        assert_eq!(settings.key_params.as_ref().unwrap().salt, salt);
    }
}
