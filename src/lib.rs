//! Word Search - board catalog and category progression
//!
//! Core modules:
//! - `board`: Letter grids, search words and authoring operations
//! - `catalog`: Ordered, immutable categories of boards
//! - `persistence`: Per-category progress stores
//! - `progression`: Unlock rules, board selection and publishing
//! - `settings`: Paths and RNG seeding

pub mod board;
pub mod catalog;
pub mod error;
pub mod persistence;
pub mod progression;
pub mod settings;

pub use board::{BoardDefinition, SearchWord};
pub use catalog::{BoardCatalog, Category};
pub use error::{Error, Result};
pub use persistence::{JsonFileStore, MemoryStore, ProgressRecord, ProgressStore};
pub use progression::{
    CategoryStatus, IndexSource, Resolution, SelectionPublisher, SelectionResult,
};
pub use settings::Settings;
