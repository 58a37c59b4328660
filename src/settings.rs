//! Session settings
//!
//! Loaded from a JSON file by the native host; missing fields fall back to
//! defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAX_PARTICLES, STARTING_LIVES};

/// Errors while loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; `None` picks one per session
    pub seed: Option<u64>,
    /// Lives at the start of a session and after reset
    pub starting_lives: u8,
    /// Particle budget
    pub max_particles: usize,
    /// Where the native host keeps the best score
    pub best_score_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            starting_lives: STARTING_LIVES,
            max_particles: MAX_PARTICLES,
            best_score_path: PathBuf::from("wave_blaster_best.json"),
        }
    }
}

impl Settings {
    /// Highest accepted value for `starting_lives`
    pub const MAX_STARTING_LIVES: u8 = 9;

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(1..=Self::MAX_STARTING_LIVES).contains(&self.starting_lives) {
            return Err(SettingsError::Invalid(format!(
                "starting_lives must be in 1..={}, got {}",
                Self::MAX_STARTING_LIVES,
                self.starting_lives
            )));
        }
        Ok(())
    }

    /// Load and validate settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        Ok(())
    }
}
