//! Category progression and board selection
//!
//! Everything here is a function of the catalog and the progress store that
//! are passed in. Nothing is cached between calls:
//! - `resolver`: lock state, board selection, first-visit init, completion
//! - `publisher`: active selection and progress display values

pub mod publisher;
pub mod resolver;

pub use publisher::{SelectionPublisher, progress_fraction, progress_label};
pub use resolver::{
    CategoryStatus, IndexSource, Resolution, SelectionResult, category_status, enter,
    first_playable, is_locked, menu, record_completion, resolve,
};
