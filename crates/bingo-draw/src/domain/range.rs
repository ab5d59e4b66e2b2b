//! Inclusive draw ranges.

use bingo_core::error::DrawError;
use serde::{Deserialize, Serialize};

/// Inclusive integer interval, kept in the order the user entered it.
///
/// The engine tolerates either order and always works on
/// `[min(from, to), max(from, to)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    /// Bound entered as "From".
    pub from: i32,
    /// Bound entered as "To".
    pub to: i32,
}

impl Range {
    /// Creates a range without validation.
    #[must_use]
    pub const fn new(from: i32, to: i32) -> Self {
        Self { from, to }
    }

    /// Lower bound after normalization.
    #[must_use]
    pub fn min(&self) -> i32 {
        self.from.min(self.to)
    }

    /// Upper bound after normalization.
    #[must_use]
    pub fn max(&self) -> i32 {
        self.from.max(self.to)
    }

    /// Number of integers in the normalized interval.
    #[must_use]
    pub fn span(&self) -> u64 {
        u64::from(self.max().abs_diff(self.min())) + 1
    }

    /// Returns `true` if `value` lies inside the normalized interval.
    #[must_use]
    pub fn contains(&self, value: i32) -> bool {
        (self.min()..=self.max()).contains(&value)
    }
}

/// Validates raw user input.
///
/// The comparison uses the raw bounds: `(75, 1)` is rejected even though
/// it would normalize to `1..=75`, and equal bounds are rejected even
/// though a single-number draw is computable.
///
/// # Errors
///
/// Returns `DrawError::InvalidRange` when `from >= to`.
pub fn validate_range(from: i32, to: i32) -> Result<Range, DrawError> {
    if from >= to {
        return Err(DrawError::InvalidRange { from, to });
    }
    Ok(Range::new(from, to))
}
