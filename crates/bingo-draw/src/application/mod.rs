//! Timed orchestration around the draw engine.

pub mod sequencer;
pub mod settings;
