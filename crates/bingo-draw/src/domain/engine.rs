//! Draw engine — eligible numbers and unbiased selection.
//!
//! Everything here is a free function over borrowed state; the engine
//! holds nothing between calls.

use std::collections::HashSet;

use bingo_core::error::DrawError;
use bingo_core::rng::DeterministicRng;

use super::history::History;
use super::range::Range;

/// Returns every integer in the normalized `range` that is not in
/// `history`, in ascending order.
#[must_use]
pub fn compute_available(range: &Range, history: &History) -> Vec<i32> {
    let drawn: HashSet<i32> = history.iter().collect();
    (range.min()..=range.max())
        .filter(|n| !drawn.contains(n))
        .collect()
}

/// Number of entries `compute_available` would return, without
/// materializing them.
#[must_use]
pub fn count_available(range: &Range, history: &History) -> u64 {
    let drawn_in_range = history.iter().filter(|n| range.contains(*n)).count() as u64;
    range.span().saturating_sub(drawn_in_range)
}

/// Picks one element of `available` uniformly at random.
///
/// The index is `floor(rng.next_f64() * len)`, clamped to the last slot.
/// `available` is left untouched.
///
/// # Errors
///
/// Returns `DrawError::Exhausted` if `available` is empty.
pub fn pick_random(available: &[i32], rng: &mut dyn DeterministicRng) -> Result<i32, DrawError> {
    let len = available.len() as u64;
    if len == 0 {
        return Err(DrawError::Exhausted);
    }
    let index = scaled_index(rng.next_f64(), len);
    usize::try_from(index)
        .ok()
        .and_then(|index| available.get(index).copied())
        .ok_or(DrawError::Exhausted)
}

/// Same pick as `pick_random(&compute_available(range, history), rng)`,
/// without materializing the eligible numbers.
///
/// Finds the `k`-th undrawn integer by walking the drawn values that fall
/// inside the range in ascending order, so the cost depends on the history
/// length rather than the width of the range.
///
/// # Errors
///
/// Returns `DrawError::Exhausted` if every number in `range` is drawn.
pub fn pick_available(
    range: &Range,
    history: &History,
    rng: &mut dyn DeterministicRng,
) -> Result<i32, DrawError> {
    let count = count_available(range, history);
    if count == 0 {
        return Err(DrawError::Exhausted);
    }
    let index = scaled_index(rng.next_f64(), count);

    let mut drawn: Vec<i32> = history.iter().filter(|n| range.contains(*n)).collect();
    drawn.sort_unstable();
    drawn.dedup();

    let offset = i64::try_from(index).map_err(|_| DrawError::Exhausted)?;
    let mut candidate = i64::from(range.min()) + offset;
    for value in drawn {
        if i64::from(value) > candidate {
            break;
        }
        candidate += 1;
    }
    i32::try_from(candidate).map_err(|_| DrawError::Exhausted)
}

/// `floor(fraction * len)`, clamped to `len - 1`. `len` must be non-zero.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn scaled_index(fraction: f64, len: u64) -> u64 {
    ((fraction * len as f64).floor() as u64).min(len - 1)
}

/// Cosmetic value shown during a spin: uniform over the normalized range,
/// drawn numbers included.
pub fn spin_noise(range: &Range, rng: &mut dyn DeterministicRng) -> i32 {
    rng.next_i32_range(range.min(), range.max())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bingo_core::rng::StdRngSource;
    use bingo_test_support::{MockRng, SequenceRng};

    // --- compute_available tests ---

    #[test]
    fn test_compute_available_without_history_is_whole_range() {
        let available = compute_available(&Range::new(1, 5), &History::new());
        assert_eq!(available, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_compute_available_excludes_history_in_ascending_order() {
        let history: History = [4, 1].into_iter().collect();
        let available = compute_available(&Range::new(1, 6), &history);
        assert_eq!(available, vec![2, 3, 5, 6]);
    }

    #[test]
    fn test_compute_available_normalizes_reversed_range() {
        let history: History = [0].into_iter().collect();
        let available = compute_available(&Range::new(2, -2), &history);
        assert_eq!(available, vec![-2, -1, 1, 2]);
    }

    #[test]
    fn test_compute_available_ignores_history_outside_range() {
        let history: History = [100, 3].into_iter().collect();
        let range = Range::new(1, 4);
        assert_eq!(compute_available(&range, &history), vec![1, 2, 4]);
        assert_eq!(count_available(&range, &history), 3);
    }

    #[test]
    fn test_compute_available_size_matches_span_minus_history() {
        let mut rng = StdRngSource::seeded(99);
        for (a, b) in [(1, 75), (-10, 10), (-9999, -9000), (0, 1)] {
            let range = Range::new(a, b);
            let mut history = History::new();
            for _ in 0..(b - a) / 2 {
                let available = compute_available(&range, &history);
                history.record(pick_random(&available, &mut rng).unwrap());
            }

            let available = compute_available(&range, &history);
            let expected = usize::try_from(b - a + 1).unwrap() - history.len();
            assert_eq!(available.len(), expected);
            assert_eq!(count_available(&range, &history), expected as u64);
            assert!(available.windows(2).all(|w| w[0] < w[1]));
            assert!(available.iter().all(|n| (a..=b).contains(n)));
            assert!(history.iter().all(|n| !available.contains(&n)));
        }
    }

    // --- pick_random tests ---

    #[test]
    fn test_pick_random_empty_is_exhausted() {
        assert_eq!(pick_random(&[], &mut MockRng), Err(DrawError::Exhausted));
    }

    #[test]
    fn test_pick_random_uses_floor_of_scaled_fraction() {
        let available = [10, 20, 30, 40];
        let mut rng = SequenceRng::default().with_fractions(vec![0.0, 0.49, 0.5, 0.999]);
        let picks: Vec<i32> = (0..4)
            .map(|_| pick_random(&available, &mut rng).unwrap())
            .collect();
        assert_eq!(picks, vec![10, 20, 30, 40]);
    }

    #[test]
    fn test_pick_random_clamps_fraction_of_one() {
        let mut rng = SequenceRng::default().with_fractions(vec![1.0]);
        assert_eq!(pick_random(&[1, 2, 3], &mut rng), Ok(3));
    }

    #[test]
    fn test_pick_random_returns_member_and_leaves_input_intact() {
        let available = vec![3, 8, 13, 21];
        let mut rng = StdRngSource::seeded(5);
        for _ in 0..200 {
            let pick = pick_random(&available, &mut rng).unwrap();
            assert!(available.contains(&pick));
        }
        assert_eq!(available, vec![3, 8, 13, 21]);
    }

    // --- pick_available tests ---

    #[test]
    fn test_pick_available_matches_pick_random_on_materialized_list() {
        let history: History = [7, 2, 3, 40, 10].into_iter().collect();
        for range in [Range::new(1, 10), Range::new(10, 1), Range::new(-3, 12)] {
            let available = compute_available(&range, &history);
            for fraction in [0.0, 0.1, 0.25, 0.5, 0.77, 0.999, 1.0] {
                let mut listed = SequenceRng::default().with_fractions(vec![fraction]);
                let mut walked = SequenceRng::default().with_fractions(vec![fraction]);
                assert_eq!(
                    pick_available(&range, &history, &mut walked),
                    pick_random(&available, &mut listed),
                    "range {range:?}, fraction {fraction}"
                );
            }
        }
    }

    #[test]
    fn test_pick_available_when_all_drawn_is_exhausted() {
        let history: History = [2, 1].into_iter().collect();
        assert_eq!(
            pick_available(&Range::new(1, 2), &history, &mut MockRng),
            Err(DrawError::Exhausted)
        );
    }

    #[test]
    fn test_pick_available_on_full_width_range() {
        let range = Range::new(i32::MIN, i32::MAX);
        let history: History = [i32::MIN, i32::MIN + 1, i32::MAX].into_iter().collect();
        assert_eq!(
            pick_available(&range, &history, &mut MockRng),
            Ok(i32::MIN + 2)
        );
        let mut rng = SequenceRng::default().with_fractions(vec![1.0]);
        assert_eq!(
            pick_available(&range, &history, &mut rng),
            Ok(i32::MAX - 1)
        );
    }

    // --- spin_noise tests ---

    #[test]
    fn test_spin_noise_stays_in_normalized_range() {
        let range = Range::new(20, 11);
        let mut rng = StdRngSource::seeded(3);
        for _ in 0..200 {
            assert!(range.contains(spin_noise(&range, &mut rng)));
        }
    }

    #[test]
    fn test_spin_noise_passes_normalized_bounds() {
        let mut rng = MockRng;
        assert_eq!(spin_noise(&Range::new(9, 4), &mut rng), 4);
    }
}
