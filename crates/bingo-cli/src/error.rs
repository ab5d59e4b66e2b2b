//! Bingo caller — application error types.

use thiserror::Error;

/// Startup and runtime errors for the terminal front end.
#[derive(Debug, Error)]
pub enum AppError {
    /// A configuration variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading input or writing to the terminal failed.
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}
