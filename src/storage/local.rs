// SPDX-License-Identifier: MIT

//! JSON-file-backed key/value store.
//!
//! The browser build of the storefront kept session, cart, and saved
//! addresses in `localStorage`; this is the same contract on disk. One JSON
//! file per key under the configured data directory. Reads never fail:
//! missing or unparseable content is treated as "no saved state".

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ClientError, Result};

/// Local key/value store scoped to one data directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| ClientError::Storage(format!("create {}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    /// Read and deserialize the value for `key`.
    ///
    /// Returns `None` when the key is absent or the stored content does not
    /// parse; a corrupt entry is removed so the next write starts clean.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);
        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(key, error = %e, "Discarding unparseable stored value");
                let _ = fs::remove_file(&path);
                None
            }
        }
    }

    /// Serialize and write the value for `key`.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .map_err(|e| ClientError::Storage(format!("serialize {}: {}", key, e)))?;
        fs::write(self.path_for(key), raw)
            .map_err(|e| ClientError::Storage(format!("write {}: {}", key, e)))
    }

    /// Remove the value for `key`. No-op when absent.
    pub fn remove(&self, key: &str) {
        let _ = fs::remove_file(self.path_for(key));
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}
