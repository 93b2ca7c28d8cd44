//! Engine settings
//!
//! Read from a JSON file next to the game data; missing or invalid files
//! fall back to defaults.

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Where content and progress live, plus RNG seeding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Board catalog JSON
    pub catalog_path: PathBuf,
    /// Progress store JSON
    pub progress_path: PathBuf,
    /// Fixed seed for fallback selection and random fill (None = entropy)
    pub rng_seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("catalog.json"),
            progress_path: PathBuf::from("progress.json"),
            rng_seed: None,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "word_search_settings.json";

    /// Load settings, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// RNG for board fallback and letter fill
    pub fn rng(&self) -> Pcg32 {
        let seed = self.rng_seed.unwrap_or_else(rand::random);
        Pcg32::seed_from_u64(seed)
    }
}
