//! Browser LocalStorage store (wasm32)

use super::{BestScoreRecord, BestScoreStore, PersistenceError};

/// Best score kept under a single LocalStorage key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::STORAGE_KEY)
    }
}

impl LocalStorageStore {
    /// LocalStorage key scoped to this game
    pub const STORAGE_KEY: &'static str = "wave_blaster_best_score";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .ok_or_else(|| PersistenceError::Unavailable("no window".into()))?
            .local_storage()
            .map_err(|e| PersistenceError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| PersistenceError::Unavailable("LocalStorage disabled".into()))
    }
}

impl BestScoreStore for LocalStorageStore {
    fn read_best_score(&self) -> Result<u64, PersistenceError> {
        let storage = Self::storage()?;
        match storage
            .get_item(&self.key)
            .map_err(|e| PersistenceError::Unavailable(format!("{e:?}")))?
        {
            Some(json) => {
                let record: BestScoreRecord = serde_json::from_str(&json)?;
                Ok(record.best_score)
            }
            None => Ok(0),
        }
    }

    fn write_best_score(&mut self, score: u64) -> Result<(), PersistenceError> {
        let storage = Self::storage()?;
        let json = serde_json::to_string(&BestScoreRecord { best_score: score })?;
        storage
            .set_item(&self.key, &json)
            .map_err(|e| PersistenceError::Unavailable(format!("{e:?}")))?;
        log::info!("Best score saved ({})", score);
        Ok(())
    }
}
