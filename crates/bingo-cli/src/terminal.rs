//! Terminal presentation: notices, the punch, and board rendering.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use bingo_core::error::{AnimationError, NoticeKind};
use bingo_core::surface::{Animator, Notice, Notifier, PunchEffect};
use bingo_draw::domain::state::DrawSnapshot;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::warn;

/// Width of the number column at scale 1.0.
const NUMBER_WIDTH: usize = 8;

/// Serialized writer shared by every presenter.
pub struct Console {
    out: Mutex<Box<dyn Write + Send>>,
}

impl Console {
    /// Wraps an arbitrary writer.
    #[must_use]
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Console over standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Writes `text` followed by a newline and flushes.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    pub fn write_line(&self, text: &str) -> io::Result<()> {
        self.write_raw(&format!("{text}\n"))
    }

    /// Writes `text` as-is and flushes.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    pub fn write_raw(&self, text: &str) -> io::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.write_all(text.as_bytes())?;
        out.flush()
    }
}

impl Notifier for Console {
    fn notify(&self, notice: Notice) {
        if let Err(error) = self.write_line(&format_notice(&notice)) {
            warn!(%error, "failed to write notice");
        }
    }
}

#[async_trait]
impl Animator for Console {
    async fn punch(&self, value: i32, effect: PunchEffect) -> Result<(), AnimationError> {
        let frames = u32::try_from(effect.keyframes.len()).unwrap_or(1).max(1);
        let frame_time = effect.duration / frames;
        for scale in effect.keyframes {
            self.write_raw(&format!("\r{}", punch_frame(value, scale)))
                .map_err(|e| AnimationError::TargetUnavailable(e.to_string()))?;
            time::sleep(frame_time).await;
        }
        self.write_raw("\n")
            .map_err(|e| AnimationError::TargetUnavailable(e.to_string()))
    }
}

/// Formats a notice as a single toast line.
#[must_use]
pub fn format_notice(notice: &Notice) -> String {
    match notice.kind {
        NoticeKind::Error => format!("[error] {}", notice.message),
        NoticeKind::Success => format!("[done] {}", notice.message),
    }
}

/// The displayed number, right-aligned, or blank when there is none.
#[must_use]
pub fn render_current(current: Option<i32>) -> String {
    match current {
        Some(value) => format!("{value:>width$}", width = NUMBER_WIDTH),
        None => " ".repeat(NUMBER_WIDTH),
    }
}

/// One punch keyframe: the number centered in a column scaled by `scale`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn punch_frame(value: i32, scale: f32) -> String {
    let width = (NUMBER_WIDTH as f32 * scale.max(0.0)).round() as usize;
    let marker = if scale > 1.0 { "*" } else { " " };
    format!("{marker}{value:^width$}{marker}")
}

/// History line, most recent first.
#[must_use]
pub fn render_history(history: &[i32]) -> String {
    if history.is_empty() {
        return "History: No numbers yet.".to_owned();
    }
    let mut line = String::from("History:");
    for value in history {
        let _ = write!(line, " {value}");
    }
    line
}

/// Full board: range summary, number, and history.
#[must_use]
pub fn render_board(snapshot: &DrawSnapshot) -> String {
    let range = snapshot.range;
    format!(
        "From {} To {} ({} left)\n{}\n{}",
        range.from,
        range.to,
        snapshot.available,
        render_current(snapshot.current),
        render_history(&snapshot.history),
    )
}

/// Re-renders on every snapshot change: a rolling number line while
/// spinning, the full board otherwise.
pub fn spawn_renderer(
    console: Arc<Console>,
    mut snapshots: watch::Receiver<DrawSnapshot>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            let text = if snapshot.is_spinning() {
                format!("\r{}", render_current(snapshot.current))
            } else {
                format!("\n{}\n", render_board(&snapshot))
            };
            if let Err(error) = console.write_raw(&text) {
                warn!(%error, "renderer stopped");
                return;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bingo_draw::domain::range::Range;
    use bingo_draw::domain::state::DrawState;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn snapshot(current: Option<i32>, history: Vec<i32>) -> DrawSnapshot {
        DrawSnapshot {
            range: Range::new(1, 75),
            state: DrawState::Idle,
            current,
            available: 75 - history.len() as u64,
            history,
        }
    }

    #[test]
    fn test_format_notice_by_kind() {
        let error = Notice {
            kind: NoticeKind::Error,
            message: "From must be less than To".into(),
        };
        let success = Notice {
            kind: NoticeKind::Success,
            message: "All numbers generated".into(),
        };
        assert_eq!(format_notice(&error), "[error] From must be less than To");
        assert_eq!(format_notice(&success), "[done] All numbers generated");
    }

    #[test]
    fn test_render_current_placeholder_is_blank() {
        assert_eq!(render_current(None), "        ");
        assert_eq!(render_current(Some(42)), "      42");
    }

    #[test]
    fn test_render_history() {
        assert_eq!(render_history(&[]), "History: No numbers yet.");
        assert_eq!(render_history(&[12, 3, 40]), "History: 12 3 40");
    }

    #[test]
    fn test_render_board() {
        let board = render_board(&snapshot(Some(7), vec![7, 19]));
        assert_eq!(board, "From 1 To 75 (73 left)\n       7\nHistory: 7 19");
    }

    #[test]
    fn test_punch_frame_grows_at_peak() {
        assert!(punch_frame(5, 1.15).len() > punch_frame(5, 1.0).len());
        assert!(punch_frame(5, 1.15).starts_with('*'));
    }

    #[test]
    fn test_notifier_writes_line() {
        let buffer = Buffer::default();
        let console = Console::new(Box::new(buffer.clone()));
        console.notify(Notice {
            kind: NoticeKind::Success,
            message: "All numbers generated".into(),
        });
        assert_eq!(buffer.contents(), "[done] All numbers generated\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_punch_plays_every_keyframe() {
        let buffer = Buffer::default();
        let console = Console::new(Box::new(buffer.clone()));
        console.punch(42, PunchEffect::default()).await.unwrap();
        let output = buffer.contents();
        assert_eq!(output.matches('\r').count(), 3);
        assert!(output.ends_with('\n'));
        assert!(output.contains("42"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_punch_on_closed_output_fails() {
        let console = Console::new(Box::new(BrokenPipe));
        let result = console.punch(1, PunchEffect::default()).await;
        assert!(matches!(result, Err(AnimationError::TargetUnavailable(_))));
    }
}
