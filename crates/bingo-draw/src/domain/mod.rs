//! Pure draw logic: ranges, history, and the selection engine.

pub mod engine;
pub mod events;
pub mod history;
pub mod range;
pub mod state;
