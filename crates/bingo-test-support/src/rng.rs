//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use bingo_core::rng::DeterministicRng;

/// A no-op RNG that always returns `min` for `next_i32_range` and `0.0` for
/// `next_f64`. With it every pick takes the lowest available number.
#[derive(Debug, Default)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_i32_range(&mut self, min: i32, _max: i32) -> i32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that replays predetermined sequences. Panics if a sequence is
/// exhausted. `values` feed `next_i32_range` (spin noise) and `fractions`
/// feed `next_f64` (picks).
#[derive(Debug, Default)]
pub struct SequenceRng {
    values: Vec<i32>,
    fractions: Vec<f64>,
    value_index: usize,
    fraction_index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` replaying `values` for range requests.
    #[must_use]
    pub fn new(values: Vec<i32>) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    /// Replays `fractions` for `next_f64`.
    #[must_use]
    pub fn with_fractions(mut self, fractions: Vec<f64>) -> Self {
        self.fractions = fractions;
        self
    }
}

impl DeterministicRng for SequenceRng {
    fn next_i32_range(&mut self, _min: i32, _max: i32) -> i32 {
        let val = self.values[self.value_index];
        self.value_index += 1;
        val
    }

    fn next_f64(&mut self) -> f64 {
        let val = self.fractions[self.fraction_index];
        self.fraction_index += 1;
        val
    }
}
