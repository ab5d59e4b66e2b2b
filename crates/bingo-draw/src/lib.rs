//! Bingo caller — draw engine and spin sequencer.
//!
//! The `domain` layer is pure: it computes which numbers are still
//! eligible and picks one. The `application` layer owns the timed spin
//! that precedes every committed pick, plus its cancellation.

pub mod application;
pub mod domain;
