//! User profile and preference flags kept in the credential store

use serde::{Deserialize, Serialize};

use crate::error::{VaultError, VaultResult};

/// Number of digits in a vault PIN
pub const PIN_LENGTH: usize = 4;

/// The enrolled user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub full_name: String,
    pub email: String,
    pub pin: String,
    #[serde(default)]
    pub has_biometrics: bool,
}

impl UserProfile {
    /// Build a profile from sign-up input, rejecting incomplete data
    pub fn register(
        full_name: &str,
        email: &str,
        pin: &str,
        has_biometrics: bool,
    ) -> VaultResult<Self> {
        let full_name = full_name.trim();
        let email = email.trim();

        if full_name.is_empty() {
            return Err(VaultError::Validation("Full name is required".into()));
        }
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(VaultError::Validation("A valid email is required".into()));
        }
        validate_pin_format(pin)?;

        Ok(Self {
            full_name: full_name.to_string(),
            email: email.to_string(),
            pin: pin.to_string(),
            has_biometrics,
        })
    }

    /// First name, for greetings
    pub fn first_name(&self) -> &str {
        self.full_name.split_whitespace().next().unwrap_or("")
    }
}

/// Check that a PIN is exactly four ASCII digits
pub fn validate_pin_format(pin: &str) -> VaultResult<()> {
    if pin.len() != PIN_LENGTH || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(VaultError::Validation(format!(
            "PIN must be exactly {} digits",
            PIN_LENGTH
        )));
    }
    Ok(())
}

/// The four toggles on the settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default = "default_true")]
    pub face_id_enabled: bool,
    #[serde(default)]
    pub fingerprint_backup: bool,
    #[serde(default = "default_true")]
    pub auto_lock: bool,
    #[serde(default = "default_true")]
    pub stealth_mode: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            face_id_enabled: true,
            fingerprint_backup: false,
            auto_lock: true,
            stealth_mode: true,
        }
    }
}

/// Which preference a toggle refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceFlag {
    FaceId,
    FingerprintBackup,
    AutoLock,
    StealthMode,
}

impl PreferenceFlag {
    pub const ALL: [PreferenceFlag; 4] = [
        Self::FaceId,
        Self::FingerprintBackup,
        Self::AutoLock,
        Self::StealthMode,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::FaceId => "Biometric unlock",
            Self::FingerprintBackup => "Fingerprint backup",
            Self::AutoLock => "Auto-lock",
            Self::StealthMode => "Stealth mode",
        }
    }

    /// Command-line name of the flag
    pub fn key(&self) -> &'static str {
        match self {
            Self::FaceId => "face-id",
            Self::FingerprintBackup => "fingerprint-backup",
            Self::AutoLock => "auto-lock",
            Self::StealthMode => "stealth-mode",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|flag| flag.key() == s)
            .or(match s.as_str() {
                "biometric" | "biometrics" => Some(Self::FaceId),
                _ => None,
            })
    }
}

impl Preferences {
    pub fn get(&self, flag: PreferenceFlag) -> bool {
        match flag {
            PreferenceFlag::FaceId => self.face_id_enabled,
            PreferenceFlag::FingerprintBackup => self.fingerprint_backup,
            PreferenceFlag::AutoLock => self.auto_lock,
            PreferenceFlag::StealthMode => self.stealth_mode,
        }
    }

    pub fn toggle(&mut self, flag: PreferenceFlag) {
        let slot = match flag {
            PreferenceFlag::FaceId => &mut self.face_id_enabled,
            PreferenceFlag::FingerprintBackup => &mut self.fingerprint_backup,
            PreferenceFlag::AutoLock => &mut self.auto_lock,
            PreferenceFlag::StealthMode => &mut self.stealth_mode,
        };
        *slot = !*slot;
    }
}
