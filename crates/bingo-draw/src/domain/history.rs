//! Record of committed draws.

use std::collections::VecDeque;

use serde::Serialize;

/// Previously drawn numbers, most recent first.
///
/// Only the sequencer mutates a `History`; values arrive from
/// `pick_random` over the available set, so no value is recorded twice
/// while the range stays the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct History {
    entries: VecDeque<i32>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends a committed value.
    pub fn record(&mut self, value: i32) {
        debug_assert!(
            !self.entries.contains(&value),
            "value {value} recorded twice"
        );
        self.entries.push_front(value);
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of recorded draws.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates from most recent to oldest.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.entries.iter().copied()
    }

    /// Copies the entries into a `Vec`, most recent first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<i32> {
        self.entries.iter().copied().collect()
    }
}

impl FromIterator<i32> for History {
    /// Builds a history from values ordered most recent first.
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_prepends() {
        let mut history = History::new();
        history.record(7);
        history.record(3);
        history.record(12);
        assert_eq!(history.to_vec(), vec![12, 3, 7]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_clear_empties_history() {
        let mut history: History = [4, 5, 6].into_iter().collect();
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let history: History = [9, 1].into_iter().collect();
        assert_eq!(serde_json::to_value(&history).unwrap(), serde_json::json!([9, 1]));
    }
}
