//! Encrypted credential store
//!
//! Holds the enrolled profile and the preference flags in a single
//! AES-GCM envelope on disk. Anything unreadable loads as empty state.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::crypto::{EncryptedData, Security};
use crate::error::VaultResult;
use crate::models::{Preferences, UserProfile};

use super::file_io::{read_json, write_json_atomic};

/// Decrypted contents of the credential store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub preferences: Preferences,
}

pub struct CredentialStore {
    path: PathBuf,
    security: Security,
    state: Credentials,
}

impl CredentialStore {
    /// Open the store, loading whatever can be decrypted
    pub fn open(path: PathBuf, security: Security) -> Self {
        let envelope: Option<EncryptedData> = read_json(&path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Credential store unreadable, starting empty");
            None
        });

        let state = envelope
            .map(|data| security.decrypt_data::<Credentials>(&data))
            .unwrap_or_default();

        Self {
            path,
            security,
            state,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.state
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.state.profile.as_ref()
    }

    pub fn preferences(&self) -> Preferences {
        self.state.preferences
    }

    pub fn save_profile(&mut self, profile: UserProfile) -> VaultResult<()> {
        self.update(|state| state.profile = Some(profile))
    }

    pub fn save_preferences(&mut self, preferences: Preferences) -> VaultResult<()> {
        self.update(|state| state.preferences = preferences)
    }

    /// Drop the enrolled profile; preferences survive
    pub fn forget_profile(&mut self) -> VaultResult<()> {
        self.update(|state| state.profile = None)
    }

    /// Write the changed state, keeping it only once it is on disk
    fn update(&mut self, change: impl FnOnce(&mut Credentials)) -> VaultResult<()> {
        let mut next = self.state.clone();
        change(&mut next);
        let envelope = self.security.encrypt_data(&next)?;
        write_json_atomic(&self.path, &envelope)?;
        self.state = next;
        Ok(())
    }
}
