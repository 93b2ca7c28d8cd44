//! In-memory progress store

use std::collections::BTreeMap;

use super::{ProgressRecord, ProgressStore};
use crate::error::Result;

/// Progress kept in a map for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, i32>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records (not counted as writes)
    pub fn with_records<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: Into<String>,
    {
        Self {
            records: records.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            writes: 0,
        }
    }

    /// Number of `write_index` calls so far
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn records(&self) -> Vec<ProgressRecord> {
        self.records
            .iter()
            .map(|(category, &index)| ProgressRecord {
                category: category.clone(),
                index,
            })
            .collect()
    }
}

impl ProgressStore for MemoryStore {
    fn read_index(&self, category: &str) -> Option<i32> {
        self.records.get(category).copied()
    }

    fn write_index(&mut self, category: &str, index: i32) -> Result<()> {
        self.records.insert(category.to_string(), index);
        self.writes += 1;
        Ok(())
    }
}
