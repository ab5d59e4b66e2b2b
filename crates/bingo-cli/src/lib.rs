//! Terminal front end for the bingo number caller.
//!
//! Exposes the pieces `main.rs` wires together so integration tests can
//! drive the same application with scripted input.

pub mod app;
pub mod backdrop;
pub mod config;
pub mod error;
pub mod input;
pub mod terminal;
