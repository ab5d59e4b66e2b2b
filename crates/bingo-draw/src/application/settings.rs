//! Tunables for the draw sequencer.

use std::time::Duration;

use bingo_core::surface::PunchEffect;

use crate::domain::range::Range;

/// Lowest bound accepted from the input surface by default.
pub const DEFAULT_FLOOR: i32 = -9999;

/// Timing and input limits for a [`DrawSequencer`](super::sequencer::DrawSequencer).
#[derive(Debug, Clone, PartialEq)]
pub struct SequencerSettings {
    /// Range in effect before the user edits anything.
    pub initial_range: Range,
    /// Minimum value either bound may take.
    pub floor: i32,
    /// How long a spin lasts before the commit.
    pub spin_duration: Duration,
    /// Period of the cosmetic noise tick.
    pub tick_interval: Duration,
    /// Effect requested after each commit.
    pub punch: PunchEffect,
    /// Buffer size of the event broadcast channel.
    pub event_capacity: usize,
}

impl Default for SequencerSettings {
    fn default() -> Self {
        Self {
            initial_range: Range::new(1, 75),
            floor: DEFAULT_FLOOR,
            spin_duration: Duration::from_millis(2000),
            tick_interval: Duration::from_millis(50),
            punch: PunchEffect::default(),
            event_capacity: 256,
        }
    }
}
