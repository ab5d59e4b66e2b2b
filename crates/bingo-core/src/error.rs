//! Advisory error types.
//!
//! None of these are fatal: every variant is reported to the user (or
//! silently dropped) and the caller stays interactive.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of a rejected draw or range edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DrawError {
    /// `from` was not strictly less than `to`.
    #[error("From must be less than To")]
    InvalidRange {
        /// Raw lower bound as entered.
        from: i32,
        /// Raw upper bound as entered.
        to: i32,
    },

    /// Every number in the range has already been drawn.
    #[error("All numbers generated")]
    Exhausted,

    /// A spin is in flight; the request was ignored.
    #[error("a draw is already in progress")]
    Busy,

    /// A range bound is below the configured input floor.
    #[error("{value} is below the minimum of {floor}")]
    BelowFloor {
        /// The rejected bound.
        value: i32,
        /// The configured floor.
        floor: i32,
    },
}

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Something the user must correct.
    Error,
    /// A positive or terminal condition.
    Success,
}

impl DrawError {
    /// Returns the notification kind this error is surfaced as, or `None`
    /// when it is dropped without telling the user.
    #[must_use]
    pub fn notice_kind(&self) -> Option<NoticeKind> {
        match self {
            Self::InvalidRange { .. } | Self::BelowFloor { .. } => Some(NoticeKind::Error),
            Self::Exhausted => Some(NoticeKind::Success),
            Self::Busy => None,
        }
    }
}

/// Failure of a cosmetic animation. Logged, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
    /// The target surface is gone (closed terminal, detached element).
    #[error("animation target unavailable: {0}")]
    TargetUnavailable(String),
}
