//! BioVault - a terminal vault with biometric-gated folders
//!
//! Folders of notes, photos, scans and voice memos sit behind a biometric
//! check. Signing in, opening a folder and viewing a document each pass a
//! modal gate; a PIN is the fallback.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Folders, items and the user profile
//! - `storage`: JSON file storage and the encrypted credential store
//! - `repository`: Folder/item repository, local or over HTTP
//! - `biometrics`: The platform biometric check
//! - `activity`: Append-only log of sign-in attempts
//! - `app`: Navigator state machine and the task runtime
//! - `cli`, `display`, `tui`: Command line and terminal front ends
//!
//! # Example
//!
//! ```rust,ignore
//! use biovault::config::{VaultPaths, Settings};
//!
//! let paths = VaultPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod activity;
pub mod app;
pub mod biometrics;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod repository;
pub mod storage;
pub mod tui;

pub use error::{VaultError, VaultResult};
