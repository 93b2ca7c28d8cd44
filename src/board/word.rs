//! Target words listed alongside a board

use serde::{Deserialize, Serialize};

/// A word the player has to find in the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchWord {
    pub text: String,
}

impl SearchWord {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Upper-case the word in place
    pub fn to_upper(&mut self) {
        if !self.is_upper() {
            self.text = self.text.to_uppercase();
        }
    }

    /// True when upper-casing would not change the word
    pub fn is_upper(&self) -> bool {
        self.text.to_uppercase() == self.text
    }
}
