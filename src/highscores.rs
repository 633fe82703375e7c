//! High score persistence
//!
//! A single best score stored as JSON in the working directory. Losing a
//! read or a write must never interrupt play, so the public calls fall back
//! to zero / no-op and only log what went wrong.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default storage file name
pub const DEFAULT_PATH: &str = "high_score.json";

/// Failure reading or writing persisted data
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk record
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    #[serde(default)]
    high_score: u64,
}

/// Storage for the best score
pub trait ScoreStore {
    /// Stored value, or 0 when there is nothing usable
    fn load(&self) -> u64;
    /// Best-effort write
    fn save(&mut self, value: u64);
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored score. `Ok(None)` when no file exists yet.
    pub fn try_load(&self) -> Result<Option<u64>, PersistError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record: HighScoreRecord = serde_json::from_str(&json)?;
        Ok(Some(record.high_score))
    }

    /// Write via a temp file and rename, so a failed write leaves the old
    /// record intact.
    pub fn try_save(&self, value: u64) -> Result<(), PersistError> {
        let json = serde_json::to_string(&HighScoreRecord { high_score: value })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u64 {
        match self.try_load() {
            Ok(Some(score)) => {
                log::info!("Loaded high score {} from {}", score, self.path.display());
                score
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Ignoring high score at {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, value: u64) {
        match self.try_save(value) {
            Ok(()) => log::info!("High score {} saved", value),
            Err(e) => log::warn!("Could not save high score {}: {}", value, e),
        }
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub value: u64,
    /// Every value passed to `save`, in order
    pub saves: Vec<u64>,
}

impl MemoryScoreStore {
    pub fn with_value(value: u64) -> Self {
        Self {
            value,
            saves: Vec::new(),
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u64 {
        self.value
    }

    fn save(&mut self, value: u64) {
        self.value = value;
        self.saves.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileScoreStore {
        FileScoreStore::new(dir.path().join(DEFAULT_PATH))
    }

    #[test]
    fn test_missing_file_loads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.try_load().unwrap().is_none());
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.save(42);
        assert_eq!(store.load(), 42);
        assert!(!store.path().with_extension("json.tmp").exists());

        let json = fs::read_to_string(store.path()).unwrap();
        assert_eq!(json, r#"{"high_score":42}"#);
    }

    #[test]
    fn test_malformed_file_loads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        for junk in ["not json", r#"{"high_score": -5}"#, r#"{"high_score": "ten"}"#, "42"] {
            fs::write(store.path(), junk).unwrap();
            assert!(store.try_load().is_err(), "{junk}");
            assert_eq!(store.load(), 0);
        }
    }

    #[test]
    fn test_missing_key_loads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"best": 9}"#).unwrap();
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_unwritable_location_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileScoreStore::new(dir.path().join("missing").join(DEFAULT_PATH));
        assert!(store.try_save(5).is_err());
        store.save(5);
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_memory_store_records_saves() {
        let mut store = MemoryScoreStore::with_value(3);
        assert_eq!(store.load(), 3);
        store.save(8);
        store.save(11);
        assert_eq!(store.load(), 11);
        assert_eq!(store.saves, vec![8, 11]);
    }
}
