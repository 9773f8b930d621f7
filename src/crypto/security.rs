//! Sealing persisted JSON state
//!
//! `Security` holds an AES-256-GCM cipher keyed from the store passphrase.
//! Values are serialised to JSON and sealed under a fresh random nonce.
//! Opening never fails loudly: a wrong key, tampered ciphertext or an
//! unexpected shape all come back as the type's default (an empty list
//! for collections).

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{VaultError, VaultResult};

use super::key_derivation::{derive_key, KeyDerivationParams};
use super::secure_memory::SecureString;

/// Environment variable holding the store passphrase
pub const KEY_ENV_VAR: &str = "BIOVAULT_KEY";

/// Used when `BIOVAULT_KEY` is unset. Protects against casual reads only.
const PROVISIONAL_PASSPHRASE: &str = "biovault-provisional-key-change-me";

/// 96-bit GCM nonce
const NONCE_LEN: usize = 12;

const SEAL_VERSION: u8 = 1;

fn seal_version() -> u8 {
    SEAL_VERSION
}

/// Resolve the store passphrase from the environment
pub fn passphrase_from_env() -> SecureString {
    match std::env::var(KEY_ENV_VAR) {
        Ok(value) if !value.is_empty() => SecureString::new(value),
        _ => {
            tracing::warn!("{} is not set, using the provisional key", KEY_ENV_VAR);
            SecureString::new(PROVISIONAL_PASSPHRASE)
        }
    }
}

/// A sealed value as stored on disk, both fields base64
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedData {
    #[serde(default = "seal_version")]
    pub version: u8,
    pub nonce: String,
    /// Ciphertext followed by the GCM tag
    pub ciphertext: String,
}

pub struct Security {
    cipher: Aes256Gcm,
}

impl Security {
    pub fn from_passphrase(
        passphrase: &SecureString,
        params: &KeyDerivationParams,
    ) -> VaultResult<Self> {
        let key = derive_key(passphrase.as_str(), params)?;
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| VaultError::Encryption(format!("Bad store key: {}", e)))?;
        Ok(Self { cipher })
    }

    /// Serialise `value` to JSON and seal it
    pub fn encrypt_data<T: Serialize + ?Sized>(&self, value: &T) -> VaultResult<EncryptedData> {
        let json = serde_json::to_vec(value)?;
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let sealed = self
            .cipher
            .encrypt(&nonce, json.as_slice())
            .map_err(|e| VaultError::Encryption(format!("Sealing failed: {}", e)))?;

        Ok(EncryptedData {
            version: SEAL_VERSION,
            nonce: STANDARD.encode(nonce),
            ciphertext: STANDARD.encode(sealed),
        })
    }

    /// Open and parse, falling back to `T::default()` on any failure
    pub fn decrypt_data<T: DeserializeOwned + Default>(&self, data: &EncryptedData) -> T {
        let plaintext = match self.open(data) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "Decryption failed, treating as empty");
                return T::default();
            }
        };

        serde_json::from_slice(&plaintext).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Decrypted data has an unexpected shape");
            T::default()
        })
    }

    fn open(&self, data: &EncryptedData) -> VaultResult<Vec<u8>> {
        if data.version != SEAL_VERSION {
            return Err(VaultError::Encryption(format!(
                "Unsupported seal version {}",
                data.version
            )));
        }

        let nonce = STANDARD
            .decode(&data.nonce)
            .map_err(|e| VaultError::Encryption(format!("Nonce is not base64: {}", e)))?;
        if nonce.len() != NONCE_LEN {
            return Err(VaultError::Encryption(format!(
                "Nonce is {} bytes, expected {}",
                nonce.len(),
                NONCE_LEN
            )));
        }
        let sealed = STANDARD
            .decode(&data.ciphertext)
            .map_err(|e| VaultError::Encryption(format!("Ciphertext is not base64: {}", e)))?;

        self.cipher
            .decrypt(Nonce::from_slice(&nonce), sealed.as_slice())
            .map_err(|_| VaultError::Encryption("Wrong key or corrupted data".into()))
    }
}

/// Compare an entered PIN with the saved one in constant time
pub fn validate_pin(input: &str, saved: &str) -> bool {
    let a = input.as_bytes();
    let b = saved.as_bytes();
    if a.len() != b.len() || b.is_empty() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
