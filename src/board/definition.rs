//! Board grid definition and authoring operations
//!
//! Cells are stored column-major (`x * rows + y`), one glyph per cell.
//! Every alphabetic glyph is kept upper-case.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::word::SearchWord;
use crate::error::{Error, Result};

/// Glyph stored in an empty cell
pub const BLANK: char = ' ';

/// Largest column or row count a board may have
pub const MAX_DIMENSION: usize = 256;

/// Structural problem found by [`BoardDefinition::validate`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridDefect {
    #[error("{columns}x{rows} grid exceeds the {max}x{max} limit", max = MAX_DIMENSION)]
    TooLarge { columns: usize, rows: usize },
    #[error("expected {expected} cells for a {columns}x{rows} grid, found {found}")]
    CellCount {
        columns: usize,
        rows: usize,
        expected: usize,
        found: usize,
    },
    #[error("lower-case letter '{glyph}' at ({x}, {y})")]
    LowerCaseCell { x: usize, y: usize, glyph: char },
    #[error("search word '{0}' is not upper-case")]
    LowerCaseWord(String),
}

/// One puzzle: a letter grid plus the words hidden in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardDefinition {
    columns: usize,
    rows: usize,
    cells: Vec<char>,
    #[serde(default)]
    words: Vec<SearchWord>,
    /// Max game time in seconds (0 = unlimited)
    #[serde(default)]
    time_limit_secs: f32,
}

impl Default for BoardDefinition {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl BoardDefinition {
    /// Create a blank grid with no words
    ///
    /// Dimensions above [`MAX_DIMENSION`] are clamped.
    pub fn new(columns: usize, rows: usize) -> Self {
        let (columns, rows) = clamp_dimensions(columns, rows);
        Self {
            columns,
            rows,
            cells: vec![BLANK; columns * rows],
            words: Vec::new(),
            time_limit_secs: 0.0,
        }
    }

    /// Build a board from row strings (`rows[y]` holds the glyphs of row `y`)
    ///
    /// Rows shorter than the widest one are padded with blanks.
    pub fn from_rows(rows: &[&str]) -> Self {
        let columns = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut board = Self::new(columns, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                if let Some(i) = board.offset(x, y) {
                    board.cells[i] = normalize_glyph(glyph);
                }
            }
        }
        board
    }

    /// Builder-style word list
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for word in words {
            self.add_word(word);
        }
        self
    }

    /// Builder-style time limit
    pub fn with_time_limit(mut self, secs: f32) -> Self {
        self.time_limit_secs = secs.max(0.0);
        self
    }

    /// Max game time in seconds (0 = unlimited)
    pub fn time_limit_secs(&self) -> f32 {
        self.time_limit_secs
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn words(&self) -> &[SearchWord] {
        &self.words
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.columns || y >= self.rows {
            return None;
        }
        x.checked_mul(self.rows)?.checked_add(y)
    }

    /// Glyph at column `x`, row `y`
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        self.offset(x, y).and_then(|i| self.cells.get(i).copied())
    }

    /// Write a cell from user input
    ///
    /// Only the first glyph is kept and it is upper-cased; empty input
    /// stores a blank.
    pub fn set_cell(&mut self, x: usize, y: usize, input: &str) -> Result<()> {
        let Some(i) = self.offset(x, y) else {
            return Err(Error::CellOutOfBounds {
                x,
                y,
                columns: self.columns,
                rows: self.rows,
            });
        };
        let glyph = input.chars().next().map(normalize_glyph).unwrap_or(BLANK);
        self.cells[i] = glyph;
        Ok(())
    }

    /// Change grid dimensions
    ///
    /// Cells inside both the old and new bounds keep their glyph, new cells
    /// are blank and cells outside the new bounds are dropped. Dimensions
    /// above [`MAX_DIMENSION`] are clamped.
    pub fn resize(&mut self, columns: usize, rows: usize) {
        let (columns, rows) = clamp_dimensions(columns, rows);
        if columns == self.columns && rows == self.rows && self.cells.len() == columns * rows {
            return;
        }

        let mut cells = vec![BLANK; columns * rows];
        for x in 0..columns.min(self.columns) {
            for y in 0..rows.min(self.rows) {
                if let Some(&glyph) = self.offset(x, y).and_then(|i| self.cells.get(i)) {
                    cells[x * rows + y] = glyph;
                }
            }
        }

        log::debug!(
            "Resized board {}x{} -> {}x{}",
            self.columns,
            self.rows,
            columns,
            rows
        );
        self.columns = columns;
        self.rows = rows;
        self.cells = cells;
    }

    /// Upper-case every cell and every search word
    pub fn to_upper(&mut self) {
        for glyph in &mut self.cells {
            *glyph = normalize_glyph(*glyph);
        }
        for word in &mut self.words {
            word.to_upper();
        }
    }

    /// Blank every cell (words are kept)
    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    /// Fill every non-letter cell with a random `A`-`Z` letter
    ///
    /// Letters already placed (the hidden words) are left untouched.
    pub fn fill_random<R: Rng>(&mut self, rng: &mut R) {
        for glyph in &mut self.cells {
            if !glyph.is_alphabetic() {
                *glyph = char::from(rng.random_range(b'A'..=b'Z'));
            }
        }
    }

    /// Append a search word (stored upper-case)
    pub fn add_word(&mut self, text: impl Into<String>) {
        let mut word = SearchWord::new(text);
        word.to_upper();
        self.words.push(word);
    }

    /// Check grid shape and letter case
    pub fn validate(&self) -> std::result::Result<(), GridDefect> {
        if self.columns > MAX_DIMENSION || self.rows > MAX_DIMENSION {
            return Err(GridDefect::TooLarge {
                columns: self.columns,
                rows: self.rows,
            });
        }

        let expected = self.columns * self.rows;
        if self.cells.len() != expected {
            return Err(GridDefect::CellCount {
                columns: self.columns,
                rows: self.rows,
                expected,
                found: self.cells.len(),
            });
        }

        if let Some(i) = self.cells.iter().position(|&c| normalize_glyph(c) != c) {
            return Err(GridDefect::LowerCaseCell {
                x: i / self.rows,
                y: i % self.rows,
                glyph: self.cells[i],
            });
        }

        if let Some(word) = self.words.iter().find(|w| !w.is_upper()) {
            return Err(GridDefect::LowerCaseWord(word.text.clone()));
        }

        Ok(())
    }
}

fn clamp_dimensions(columns: usize, rows: usize) -> (usize, usize) {
    if columns > MAX_DIMENSION || rows > MAX_DIMENSION {
        log::warn!(
            "Board size {}x{} clamped to {}x{} limit",
            columns,
            rows,
            MAX_DIMENSION,
            MAX_DIMENSION
        );
    }
    (columns.min(MAX_DIMENSION), rows.min(MAX_DIMENSION))
}

/// Upper-case a single glyph, keeping one character
///
/// Lower-case glyphs without an upper-case form come back unchanged.
fn normalize_glyph(glyph: char) -> char {
    if glyph.is_lowercase() {
        glyph.to_uppercase().next().unwrap_or(glyph)
    } else {
        glyph
    }
}

impl fmt::Display for BoardDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows {
            let row: Vec<String> = (0..self.columns)
                .map(|x| self.cell(x, y).unwrap_or(BLANK).to_string())
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
