//! Test surfaces — recording `Notifier` and `Animator` doubles.

use std::sync::Mutex;

use async_trait::async_trait;
use bingo_core::error::AnimationError;
use bingo_core::surface::{Animator, Notice, Notifier, PunchEffect};

/// A notifier that records every notice it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    /// Returns a snapshot of all notices received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// An animator that records the values it was asked to punch and always
/// succeeds.
#[derive(Debug, Default)]
pub struct RecordingAnimator {
    punched: Mutex<Vec<i32>>,
}

impl RecordingAnimator {
    /// Returns a snapshot of all punched values, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn punched(&self) -> Vec<i32> {
        self.punched.lock().unwrap().clone()
    }
}

#[async_trait]
impl Animator for RecordingAnimator {
    async fn punch(&self, value: i32, _effect: PunchEffect) -> Result<(), AnimationError> {
        self.punched.lock().unwrap().push(value);
        Ok(())
    }
}

/// An animator that always fails. Useful for checking that a broken
/// animation never disturbs committed state.
#[derive(Debug, Default)]
pub struct FailingAnimator;

#[async_trait]
impl Animator for FailingAnimator {
    async fn punch(&self, _value: i32, _effect: PunchEffect) -> Result<(), AnimationError> {
        Err(AnimationError::TargetUnavailable("display detached".into()))
    }
}
