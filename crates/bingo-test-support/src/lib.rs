//! Shared test doubles for the bingo number caller.

mod clock;
mod rng;
mod surface;

pub use clock::FixedClock;
pub use rng::{MockRng, SequenceRng};
pub use surface::{FailingAnimator, RecordingAnimator, RecordingNotifier};
