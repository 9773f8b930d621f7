//! Configuration module for BioVault
//!
//! - Platform path resolution
//! - Settings persistence (backends, lock timers, key parameters)

pub mod paths;
pub mod settings;

pub use paths::VaultPaths;
pub use settings::{BiometricBackend, CreateFailurePolicy, RepositoryBackend, Settings};
