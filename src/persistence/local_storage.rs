//! Browser LocalStorage progress store (wasm32 only)

use super::ProgressStore;
use crate::error::{Error, Result};

/// One LocalStorage key per category
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    const KEY_PREFIX: &'static str = "word_search_progress_";

    /// Attach to the window's LocalStorage
    pub fn open() -> Result<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| Error::Store("LocalStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }

    fn key(category: &str) -> String {
        format!("{}{}", Self::KEY_PREFIX, category)
    }
}

impl ProgressStore for LocalStorageStore {
    fn read_index(&self, category: &str) -> Option<i32> {
        let raw = self.storage.get_item(&Self::key(category)).ok().flatten()?;
        match raw.parse() {
            Ok(index) => Some(index),
            Err(_) => {
                // Unparseable values are re-initialized like a first visit
                log::warn!("Ignoring unreadable progress '{}' for {}", raw, category);
                None
            }
        }
    }

    fn write_index(&mut self, category: &str, index: i32) -> Result<()> {
        self.storage
            .set_item(&Self::key(category), &index.to_string())
            .map_err(|e| Error::Store(format!("{:?}", e)))?;
        log::info!("Progress saved: {} = {}", category, index);
        Ok(())
    }
}
