//! JSON-file backed [`KeyValueStore`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{KeyValueStore, Result, StorageError};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct StoreDocument {
    entries: BTreeMap<String, String>,
}

/// Stores every key in one JSON object, e.g. `{"highestScore": "30"}`.
///
/// Writes go to a temp file that is renamed over the original so a crash
/// never leaves a half-written document behind.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<StoreDocument> {
        if !self.path.exists() {
            return Ok(StoreDocument::default());
        }
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_document()?.entries.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut document = match self.read_document() {
            Ok(document) => document,
            Err(StorageError::Json(err)) => {
                tracing::warn!("replacing unreadable {}: {err}", self.path.display());
                StoreDocument::default()
            }
            Err(err) => return Err(err),
        };
        document.entries.insert(key.to_string(), value.to_string());

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, serde_json::to_vec_pretty(&document)?)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(key, value, "wrote {}", self.path.display());
        Ok(())
    }
}
