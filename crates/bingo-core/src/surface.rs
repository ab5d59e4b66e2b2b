//! Presentation seams the sequencer reports through.
//!
//! A presenter implements [`Notifier`] for toast-style messages and
//! [`Animator`] for the punch played after each committed number. Both
//! are fire-and-forget: nothing they do feeds back into draw state.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AnimationError, DrawError, NoticeKind};

/// A user-facing advisory message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Presentation style.
    pub kind: NoticeKind,
    /// Literal text shown to the user.
    pub message: String,
}

impl Notice {
    /// Builds the notice for `error`, or `None` when it is not surfaced.
    #[must_use]
    pub fn from_error(error: &DrawError) -> Option<Self> {
        error.notice_kind().map(|kind| Self {
            kind,
            message: error.to_string(),
        })
    }
}

/// Receives advisory notifications.
pub trait Notifier: Send + Sync {
    /// Shows `notice` to the user.
    fn notify(&self, notice: Notice);
}

/// Keyframes and duration of the scale punch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PunchEffect {
    /// Scale factors played in order.
    pub keyframes: [f32; 3],
    /// Total duration of the effect.
    pub duration: Duration,
}

impl Default for PunchEffect {
    fn default() -> Self {
        Self {
            keyframes: [1.0, 1.15, 1.0],
            duration: Duration::from_millis(350),
        }
    }
}

/// Plays the cosmetic effect for a freshly committed number.
#[async_trait]
pub trait Animator: Send + Sync {
    /// Plays `effect` on the displayed `value`.
    ///
    /// # Errors
    ///
    /// Returns `AnimationError` if the effect could not be played. Callers
    /// log it and move on.
    async fn punch(&self, value: i32, effect: PunchEffect) -> Result<(), AnimationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_from_invalid_range_is_error() {
        let notice = Notice::from_error(&DrawError::InvalidRange { from: 2, to: 1 }).unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "From must be less than To");
    }

    #[test]
    fn test_notice_from_exhausted_is_success() {
        let notice = Notice::from_error(&DrawError::Exhausted).unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.message, "All numbers generated");
    }

    #[test]
    fn test_busy_produces_no_notice() {
        assert!(Notice::from_error(&DrawError::Busy).is_none());
    }

    #[test]
    fn test_default_punch_effect() {
        let effect = PunchEffect::default();
        assert_eq!(effect.keyframes, [1.0, 1.15, 1.0]);
        assert_eq!(effect.duration, Duration::from_millis(350));
    }
}
