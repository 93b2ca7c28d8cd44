//! Error types for catalog loading, board editing and progression

use thiserror::Error;

/// Crate result type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the catalog, the resolver and the progress stores.
///
/// Out-of-range stored indices and first-run (unset) indices are not errors:
/// the resolver recovers from both on its own.
#[derive(Debug, Error)]
pub enum Error {
    #[error("category not found: {0}")]
    CategoryNotFound(String),

    #[error("category '{0}' has no playable boards")]
    NoContent(String),

    #[error("no unlocked category has playable boards")]
    NothingToPlay,

    #[error("category '{0}' is locked")]
    Locked(String),

    #[error("board index {index} out of range for category '{category}' ({count} boards)")]
    BoardOutOfRange {
        category: String,
        index: usize,
        count: usize,
    },

    #[error("duplicate category name in catalog: {0}")]
    DuplicateCategory(String),

    #[error("invalid board #{board} in category '{category}': {message}")]
    InvalidBoard {
        category: String,
        board: usize,
        message: String,
    },

    #[error("cell ({x}, {y}) is outside the {columns}x{rows} grid")]
    CellOutOfBounds {
        x: usize,
        y: usize,
        columns: usize,
        rows: usize,
    },

    #[error("progress store error: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
