//! Best-score persistence
//!
//! The only durable value is a single best score. Stores:
//! - `MemoryStore`: in-process, for tests and headless runs
//! - `JsonFileStore`: a small JSON document on disk (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from a best-score store
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("best score i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("best score record is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("best score storage unavailable: {0}")]
    Unavailable(String),
}

/// On-disk / in-storage shape of the record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScoreRecord {
    pub best_score: u64,
}

/// Read/write access to the persisted best score
pub trait BestScoreStore {
    /// Current best score (0 if nothing has been stored yet)
    fn read_best_score(&self) -> Result<u64, PersistenceError>;

    /// Overwrite the stored best score
    fn write_best_score(&mut self, score: u64) -> Result<(), PersistenceError>;
}

impl<S: BestScoreStore + ?Sized> BestScoreStore for Box<S> {
    fn read_best_score(&self) -> Result<u64, PersistenceError> {
        (**self).read_best_score()
    }

    fn write_best_score(&mut self, score: u64) -> Result<(), PersistenceError> {
        (**self).write_best_score(score)
    }
}

/// Write `score` only if it beats the stored best.
/// Returns the best score after the call.
pub fn record_if_best<S: BestScoreStore + ?Sized>(
    store: &mut S,
    score: u64,
) -> Result<u64, PersistenceError> {
    let best = store.read_best_score()?;
    if score <= best {
        return Ok(best);
    }
    store.write_best_score(score)?;
    log::info!("New best score: {} (was {})", score, best);
    Ok(score)
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best_score: Option<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a best score
    pub fn with_best(best_score: u64) -> Self {
        Self {
            best_score: Some(best_score),
        }
    }
}

impl BestScoreStore for MemoryStore {
    fn read_best_score(&self) -> Result<u64, PersistenceError> {
        Ok(self.best_score.unwrap_or(0))
    }

    fn write_best_score(&mut self, score: u64) -> Result<(), PersistenceError> {
        self.best_score = Some(score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read_best_score().unwrap(), 0);
        store.write_best_score(120).unwrap();
        assert_eq!(store.read_best_score().unwrap(), 120);
    }

    #[test]
    fn test_record_if_best() {
        let mut store = MemoryStore::with_best(300);
        assert_eq!(record_if_best(&mut store, 500).unwrap(), 500);
        assert_eq!(store.read_best_score().unwrap(), 500);

        let mut store = MemoryStore::with_best(300);
        assert_eq!(record_if_best(&mut store, 200).unwrap(), 300);
        assert_eq!(store.read_best_score().unwrap(), 300);

        // Ties do not rewrite
        assert_eq!(record_if_best(&mut store, 300).unwrap(), 300);
    }

    #[test]
    fn test_boxed_store() {
        let mut store: Box<dyn BestScoreStore> = Box::new(MemoryStore::new());
        store.write_best_score(7).unwrap();
        assert_eq!(store.read_best_score().unwrap(), 7);
    }
}
