//! Puzzle board content
//!
//! A board is a column-major letter grid plus the words hidden in it.
//! Boards are authored ahead of time and are read-only during play; the
//! editing operations here exist for content tooling.

pub mod definition;
pub mod word;

pub use definition::{BLANK, BoardDefinition, GridDefect, MAX_DIMENSION};
pub use word::SearchWord;
