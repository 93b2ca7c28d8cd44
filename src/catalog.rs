//! Board catalog: ordered categories of boards
//!
//! Loaded once per session and never mutated afterwards. Category order is
//! significant: a category's ordinal decides which category gates it.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::BoardDefinition;
use crate::error::{Error, Result};

/// A named, ordered set of boards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub boards: Vec<BoardDefinition>,
}

impl Category {
    pub fn new(name: impl Into<String>, boards: Vec<BoardDefinition>) -> Self {
        Self {
            name: name.into(),
            boards,
        }
    }

    pub fn board_count(&self) -> usize {
        self.boards.len()
    }

    /// A category without boards can never be completed
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Board at `index`, which must satisfy `0 <= index < board_count()`
    pub fn board_at(&self, index: usize) -> Result<&BoardDefinition> {
        self.boards.get(index).ok_or_else(|| Error::BoardOutOfRange {
            category: self.name.clone(),
            index,
            count: self.boards.len(),
        })
    }
}

/// On-disk catalog layout
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    categories: Vec<Category>,
}

/// Immutable ordered collection of categories
#[derive(Debug, Clone, Default)]
pub struct BoardCatalog {
    categories: Vec<Category>,
}

impl BoardCatalog {
    /// Build a catalog, rejecting duplicate names and malformed boards
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.name.as_str()) {
                return Err(Error::DuplicateCategory(category.name.clone()));
            }
            for (board, definition) in category.boards.iter().enumerate() {
                definition.validate().map_err(|defect| Error::InvalidBoard {
                    category: category.name.clone(),
                    board,
                    message: defect.to_string(),
                })?;
            }
        }

        let boards: usize = categories.iter().map(Category::board_count).sum();
        log::info!(
            "Catalog loaded: {} categories, {} boards",
            categories.len(),
            boards
        );
        Ok(Self { categories })
    }

    /// Parse a catalog from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.categories)
    }

    /// Read and parse a catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize back to the JSON form accepted by [`BoardCatalog::from_json`]
    pub fn to_json(&self) -> Result<String> {
        let file = CatalogFile {
            categories: self.categories.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Exact-match lookup by name
    pub fn find_category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Ordinal of the named category
    pub fn position(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.name == name)
    }

    pub fn category_at(&self, ordinal: usize) -> Option<&Category> {
        self.categories.get(ordinal)
    }

    pub fn board_count(&self, name: &str) -> Result<usize> {
        self.require(name).map(Category::board_count)
    }

    pub fn board_at(&self, name: &str, index: usize) -> Result<&BoardDefinition> {
        self.require(name)?.board_at(index)
    }

    fn require(&self, name: &str) -> Result<&Category> {
        self.find_category(name)
            .ok_or_else(|| Error::CategoryNotFound(name.to_string()))
    }
}
