//! JSON documents on disk
//!
//! Writes go through a uniquely named temp file in the target directory
//! that is persisted over the destination, so concurrent writers never
//! share a scratch file and readers only ever see a complete document.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use crate::error::VaultError;

fn storage_error(action: &str, path: &Path, e: impl std::fmt::Display) -> VaultError {
    VaultError::Storage(format!("Failed to {} {}: {}", action, path.display(), e))
}

/// Parse a JSON document, or `T::default()` when the file is absent
pub fn read_json<T, P>(path: P) -> Result<T, VaultError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(storage_error("open", path, e)),
    };

    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_error("parse", path, e))
}

/// Replace `path` with the pretty-printed JSON of `data`
///
/// On error the previous contents of `path` are left untouched.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), VaultError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| storage_error("create directory", dir, e))?;

    let bytes = serde_json::to_vec_pretty(data)?;

    // Dropping `scratch` on any early return removes it
    let mut scratch =
        NamedTempFile::new_in(dir).map_err(|e| storage_error("create temp file in", dir, e))?;
    scratch
        .write_all(&bytes)
        .and_then(|_| scratch.as_file().sync_all())
        .map_err(|e| storage_error("write temp file for", path, e))?;
    scratch
        .persist(path)
        .map_err(|e| storage_error("replace", path, e.error))?;

    Ok(())
}
