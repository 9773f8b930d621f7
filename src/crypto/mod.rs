//! Cryptographic functions for BioVault
//!
//! AES-256-GCM encryption with Argon2id key derivation protects the
//! credential store at rest.

pub mod key_derivation;
pub mod secure_memory;
pub mod security;

pub use key_derivation::{derive_key, DerivedKey, KeyDerivationParams};
pub use secure_memory::SecureString;
pub use security::{passphrase_from_env, validate_pin, EncryptedData, Security};
