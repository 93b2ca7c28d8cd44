//! Progress persistence
//!
//! The resolver only sees the [`ProgressStore`] contract: one integer index
//! per category name. Backends:
//! - `MemoryStore`: in-process map (tests, embedding)
//! - `JsonFileStore`: versioned JSON envelope on disk with atomic replace
//! - `LocalStorageStore`: browser LocalStorage (wasm32 only)

pub mod envelope;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;
pub mod memory;

pub use envelope::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Durable mapping from category name to its current board index
///
/// `read_index` returns `None` when the category was never played. An
/// explicitly stored value is always returned as-is, even when negative.
pub trait ProgressStore {
    fn read_index(&self, category: &str) -> Option<i32>;
    fn write_index(&mut self, category: &str, index: i32) -> Result<()>;
}

/// A single persisted `(category, index)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub category: String,
    pub index: i32,
}
