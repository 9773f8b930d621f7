//! Credential store key derivation
//!
//! The store key is Argon2id over the passphrase. Salt and cost parameters
//! are generated once and kept in the settings file, so the same
//! passphrase always opens the same store.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Algorithm, Argon2, Params, Version,
};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{VaultError, VaultResult};

/// Length of an AES-256 key
pub const KEY_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDerivationParams {
    /// Salt in the PHC base64 alphabet
    pub salt: String,
    /// KiB of memory per hash
    pub memory_cost: u32,
    /// Passes over memory
    pub time_cost: u32,
    /// Lanes
    pub parallelism: u32,
}

impl Default for KeyDerivationParams {
    fn default() -> Self {
        Self {
            salt: String::new(),
            memory_cost: Params::DEFAULT_M_COST,
            time_cost: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl KeyDerivationParams {
    /// Default costs with a fresh random salt
    pub fn new() -> Self {
        Self {
            salt: SaltString::generate(&mut OsRng).to_string(),
            ..Default::default()
        }
    }

    pub fn with_values(salt: String, memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            salt,
            memory_cost,
            time_cost,
            parallelism,
        }
    }

    /// Cheap parameters with a fresh salt, for tests
    #[cfg(test)]
    pub fn light() -> Self {
        Self::with_values(SaltString::generate(&mut OsRng).to_string(), 1024, 1, 1)
    }

    fn hasher(&self) -> VaultResult<Argon2<'static>> {
        let params = Params::new(
            self.memory_cost,
            self.time_cost,
            self.parallelism,
            Some(KEY_LEN),
        )
        .map_err(|e| VaultError::Encryption(format!("Invalid Argon2 parameters: {}", e)))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// A derived AES-256 key, wiped from memory on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_LEN]);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

pub fn derive_key(passphrase: &str, params: &KeyDerivationParams) -> VaultResult<DerivedKey> {
    let salt = SaltString::from_b64(&params.salt)
        .map_err(|e| VaultError::Encryption(format!("Invalid salt: {}", e)))?;

    let mut key = [0u8; KEY_LEN];
    params
        .hasher()?
        .hash_password_into(passphrase.as_bytes(), salt.as_str().as_bytes(), &mut key)
        .map_err(|e| VaultError::Encryption(format!("Key derivation failed: {}", e)))?;

    Ok(DerivedKey(key))
}
