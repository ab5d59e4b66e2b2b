//! Observable draw state.

use serde::{Deserialize, Serialize};

use super::range::Range;

/// Phase of the draw state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawState {
    /// Waiting for a draw request.
    #[default]
    Idle,
    /// A spin is in flight; the commit has not happened yet.
    Spinning,
}

/// Point-in-time view of everything a presenter renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawSnapshot {
    /// Range as currently entered.
    pub range: Range,
    /// Current phase.
    pub state: DrawState,
    /// Displayed number: spin noise, the last commit, or nothing.
    pub current: Option<i32>,
    /// Committed draws, most recent first.
    pub history: Vec<i32>,
    /// Numbers still eligible in the current range.
    pub available: u64,
}

impl DrawSnapshot {
    /// Returns `true` while a spin is in flight.
    #[must_use]
    pub fn is_spinning(&self) -> bool {
        self.state == DrawState::Spinning
    }
}
