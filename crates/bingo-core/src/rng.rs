//! Random number generator abstraction for determinism.
//!
//! In production, this wraps `rand`'s standard generator. In tests a
//! scripted implementation is injected so picks and spin noise are
//! reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `i32` in the range `[min, max]` inclusive.
    ///
    /// Callers must pass `min <= max`.
    fn next_i32_range(&mut self, min: i32, max: i32) -> i32;

    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;
}

/// Production RNG backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct StdRngSource {
    inner: StdRng,
}

impl StdRngSource {
    /// Creates a generator seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_os_rng(),
        }
    }

    /// Creates a generator with a fixed seed, for reproducible sessions.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl DeterministicRng for StdRngSource {
    fn next_i32_range(&mut self, min: i32, max: i32) -> i32 {
        self.inner.random_range(min..=max)
    }

    fn next_f64(&mut self) -> f64 {
        self.inner.random::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_i32_range_stays_within_bounds() {
        let mut rng = StdRngSource::seeded(7);
        for _ in 0..500 {
            let value = rng.next_i32_range(-3, 4);
            assert!((-3..=4).contains(&value), "value {value} out of range");
        }
    }

    #[test]
    fn test_next_i32_range_single_value() {
        let mut rng = StdRngSource::from_entropy();
        assert_eq!(rng.next_i32_range(9, 9), 9);
    }

    #[test]
    fn test_next_f64_is_half_open_unit_interval() {
        let mut rng = StdRngSource::seeded(42);
        for _ in 0..500 {
            let value = rng.next_f64();
            assert!((0.0..1.0).contains(&value), "value {value} out of range");
        }
    }

    #[test]
    fn test_same_seed_produces_same_sequence() {
        let mut a = StdRngSource::seeded(1234);
        let mut b = StdRngSource::seeded(1234);
        let left: Vec<i32> = (0..16).map(|_| a.next_i32_range(1, 75)).collect();
        let right: Vec<i32> = (0..16).map(|_| b.next_i32_range(1, 75)).collect();
        assert_eq!(left, right);
    }
}
