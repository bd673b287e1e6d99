use serde::{Deserialize, Serialize};

use crate::search::is_searching;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Open,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Browsing,
    Searching,
}

impl Mode {
    pub fn for_query(query: &str) -> Self {
        if is_searching(query) {
            Self::Searching
        } else {
            Self::Browsing
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayState {
    open: bool,
}

impl OverlayState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Shortcut and trigger both toggle; re-triggering while open closes.
    pub fn on_trigger(&mut self) -> ToggleAction {
        self.open = !self.open;
        if self.open {
            ToggleAction::Open
        } else {
            ToggleAction::Close
        }
    }

    /// Any dismissal (cancel key, outside click, completed activation).
    /// Returns false when already closed.
    pub fn dismiss(&mut self) -> bool {
        if self.open {
            self.open = false;
            return true;
        }
        false
    }
}
