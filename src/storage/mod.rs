//! Key-value persistence for the high score.
//!
//! The game only needs two keys: [`HIGH_SCORE_KEY`] holds the score as a
//! base-10 string and [`HIGH_SCORE_AT_KEY`] the RFC 3339 time it was set.
//! Reads that fail are treated as "no high score yet"; writes go through
//! [`HighScoreWriter`] and never block the game loop.

pub mod file;
pub mod writer;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use thiserror::Error;

pub use self::file::FileStore;
pub use self::writer::HighScoreWriter;

pub const HIGH_SCORE_KEY: &str = "highestScore";
pub const HIGH_SCORE_AT_KEY: &str = "highestScoreAt";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store lock was poisoned")]
    LockPoisoned,

    #[error("high score writer has shut down")]
    WriterClosed,
}

pub type Result<T> = std::result::Result<T, StorageError>;

pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HighScoreRecord {
    pub score: u32,
    pub recorded_at: Option<DateTime<Utc>>,
}

impl HighScoreRecord {
    /// Reads the stored high score, falling back to zero on any failure.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let score = match store.get(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => raw.trim().parse::<u32>().unwrap_or_else(|err| {
                tracing::warn!(value = %raw, "ignoring unparsable high score: {err}");
                0
            }),
            Ok(None) => 0,
            Err(err) => {
                tracing::warn!("failed to load high score: {err}");
                0
            }
        };
        let recorded_at = match store.get(HIGH_SCORE_AT_KEY) {
            Ok(Some(raw)) => DateTime::parse_from_rfc3339(raw.trim())
                .map(|stamp| stamp.with_timezone(&Utc))
                .ok(),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!("failed to load high score timestamp: {err}");
                None
            }
        };
        tracing::info!(score, "loaded high score");
        Self { score, recorded_at }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(HIGH_SCORE_KEY, &self.score.to_string())?;
        if let Some(stamp) = self.recorded_at {
            store.set(HIGH_SCORE_AT_KEY, &stamp.to_rfc3339())?;
        }
        Ok(())
    }
}
