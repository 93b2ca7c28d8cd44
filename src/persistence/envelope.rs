//! JSON file progress store
//!
//! File layout: `{ "version": 1, "records": { "<category>": <index>, ... } }`.
//! Every write replaces the file atomically (tmp file, then rename). A file
//! that fails to parse is moved aside to `<name>.corrupt` and the store
//! starts empty. Earlier backups are never overwritten: later ones get a
//! numeric suffix (`<name>.corrupt.1`, `<name>.corrupt.2`, ...).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ProgressRecord, ProgressStore};
use crate::error::Result;

/// Current envelope version
pub const ENVELOPE_VERSION: u32 = 1;

/// Versioned on-disk wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    #[serde(default)]
    records: BTreeMap<String, i32>,
}

/// Progress persisted to a JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    records: BTreeMap<String, i32>,
}

impl JsonFileStore {
    /// Open (or lazily create) the store at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = match std::fs::read_to_string(&path) {
            Ok(json) => Self::parse(&path, &json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No progress file at {}, starting fresh", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, records })
    }

    fn parse(path: &Path, json: &str) -> Result<BTreeMap<String, i32>> {
        match serde_json::from_str::<Envelope>(json) {
            Ok(envelope) if envelope.version == ENVELOPE_VERSION => {
                log::info!(
                    "Loaded progress for {} categories from {}",
                    envelope.records.len(),
                    path.display()
                );
                Ok(envelope.records)
            }
            Ok(envelope) => {
                log::warn!(
                    "Unsupported progress file version {} in {}",
                    envelope.version,
                    path.display()
                );
                Self::quarantine(path)?;
                Ok(BTreeMap::new())
            }
            Err(e) => {
                log::warn!("Corrupt progress file {}: {}", path.display(), e);
                Self::quarantine(path)?;
                Ok(BTreeMap::new())
            }
        }
    }

    /// Move an unreadable file out of the way so it is not overwritten
    fn quarantine(path: &Path) -> Result<()> {
        let backup = (0u32..)
            .map(|n| match n {
                0 => path.with_extension("corrupt"),
                n => path.with_extension(format!("corrupt.{}", n)),
            })
            .find(|candidate| !candidate.exists())
            .unwrap_or_else(|| path.with_extension("corrupt"));
        std::fs::rename(path, &backup)?;
        log::warn!("Moved unreadable progress file to {}", backup.display());
        Ok(())
    }

    fn persist(&self, records: &BTreeMap<String, i32>) -> Result<()> {
        let envelope = Envelope {
            version: ENVELOPE_VERSION,
            records: records.clone(),
        };
        let json = serde_json::to_string_pretty(&envelope)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
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

impl ProgressStore for JsonFileStore {
    fn read_index(&self, category: &str) -> Option<i32> {
        self.records.get(category).copied()
    }

    fn write_index(&mut self, category: &str, index: i32) -> Result<()> {
        // Memory only changes once the file write went through
        let mut records = self.records.clone();
        records.insert(category.to_string(), index);
        self.persist(&records)?;
        self.records = records;
        log::debug!("Saved progress {} = {}", category, index);
        Ok(())
    }
}
