//! Bingo Core — shared abstractions.
//!
//! This crate defines the traits and types the draw engine, the
//! sequencer and the terminal front end all depend on. It contains no
//! timers and no terminal code.

pub mod clock;
pub mod error;
pub mod event;
pub mod rng;
pub mod surface;
