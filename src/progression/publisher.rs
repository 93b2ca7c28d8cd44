//! Selection publisher
//!
//! Holds the board handed to gameplay and the category the player picked,
//! and formats progress for menus.

use crate::board::BoardDefinition;
use crate::progression::resolver::SelectionResult;

/// Completion fraction `current / total`, clamped to `[0, 1]` (0 when empty)
pub fn progress_fraction(current: usize, total: usize) -> f32 {
    if total == 0 {
        return 0.0;
    }
    (current as f32 / total as f32).clamp(0.0, 1.0)
}

/// `"current/total"`, or an empty string while the category is locked
pub fn progress_label(current: usize, total: usize, locked: bool) -> String {
    if locked {
        String::new()
    } else {
        format!("{}/{}", current, total)
    }
}

impl SelectionResult {
    pub fn progress_fraction(&self) -> f32 {
        progress_fraction(self.index, self.total)
    }

    pub fn progress_label(&self, locked: bool) -> String {
        progress_label(self.index, self.total, locked)
    }
}

/// Active selection shared with the gameplay side
#[derive(Debug, Clone, Default)]
pub struct SelectionPublisher {
    selected_category: Option<String>,
    current: Option<SelectionResult>,
}

impl SelectionPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the category the player chose
    pub fn select_category(&mut self, name: impl Into<String>) {
        let name = name.into();
        log::info!("Category selected: {}", name);
        self.selected_category = Some(name);
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    /// Make `result` the active board
    ///
    /// Returns `false` when `result` was already published.
    pub fn publish(&mut self, result: SelectionResult) -> bool {
        if self.current.as_ref() == Some(&result) {
            return false;
        }
        log::info!(
            "Publishing {} board {}/{}",
            result.category,
            result.index,
            result.total
        );
        self.selected_category = Some(result.category.clone());
        self.current = Some(result);
        true
    }

    pub fn current(&self) -> Option<&SelectionResult> {
        self.current.as_ref()
    }

    pub fn selected_board(&self) -> Option<&BoardDefinition> {
        self.current.as_ref().map(|r| &r.board)
    }

    pub fn clear(&mut self) {
        self.selected_category = None;
        self.current = None;
    }
}
