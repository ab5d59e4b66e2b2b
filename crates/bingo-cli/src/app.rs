//! Application wiring: one sequencer, one console, one input loop.

use std::sync::Arc;

use bingo_core::clock::SystemClock;
use bingo_core::rng::{DeterministicRng, StdRngSource};
use bingo_draw::application::sequencer::{Collaborators, DrawSequencer};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, instrument, warn};

use crate::backdrop::Backdrop;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::input::{Action, HELP, parse_line};
use crate::terminal::{Console, render_board, spawn_renderer};

/// Whether the input loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// Stop reading.
    Quit,
}

/// The interactive caller.
pub struct App {
    sequencer: DrawSequencer,
    backdrop: Backdrop,
    console: Arc<Console>,
}

impl App {
    /// Builds the caller, seeding the RNG from `config.seed` when set.
    #[must_use]
    pub fn new(config: &AppConfig, console: Arc<Console>) -> Self {
        let rng: Box<dyn DeterministicRng> = match config.seed {
            Some(seed) => Box::new(StdRngSource::seeded(seed)),
            None => Box::new(StdRngSource::from_entropy()),
        };
        Self::with_rng(config, console, rng)
    }

    /// Builds the caller with an injected RNG.
    #[must_use]
    pub fn with_rng(
        config: &AppConfig,
        console: Arc<Console>,
        rng: Box<dyn DeterministicRng>,
    ) -> Self {
        let collaborators = Collaborators {
            clock: Arc::new(SystemClock),
            notifier: console.clone(),
            animator: console.clone(),
        };
        Self {
            sequencer: DrawSequencer::new(config.sequencer_settings(), rng, collaborators),
            backdrop: Backdrop::default(),
            console,
        }
    }

    /// The sequencer driven by this app.
    #[must_use]
    pub fn sequencer(&self) -> &DrawSequencer {
        &self.sequencer
    }

    /// The backdrop cycler.
    #[must_use]
    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    /// Decodes and applies one input line. Parse errors are printed and
    /// the loop continues.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        match parse_line(line) {
            Ok(action) => self.handle(action),
            Err(error) => {
                self.say(&format!("[error] {error}"));
                Flow::Continue
            }
        }
    }

    /// Applies one action.
    #[instrument(skip(self))]
    pub fn handle(&mut self, action: Action) -> Flow {
        match action {
            Action::Draw => {
                if let Err(error) = self.sequencer.request() {
                    debug!(%error, "draw not started");
                }
            }
            Action::Reset => self.sequencer.reset(),
            Action::SetFrom(from) => {
                let to = self.sequencer.snapshot().range.to;
                self.edit_range(from, to);
            }
            Action::SetTo(to) => {
                let from = self.sequencer.snapshot().range.from;
                self.edit_range(from, to);
            }
            Action::SetRange(from, to) => self.edit_range(from, to),
            Action::NextMood => {
                let mood = self.backdrop.advance();
                info!(mood = mood.label, "backdrop changed");
                self.say(&format!("Mood: {} ({})", mood.label, mood.url));
            }
            Action::State => match serde_json::to_string(&self.sequencer.snapshot()) {
                Ok(json) => self.say(&json),
                Err(error) => warn!(%error, "failed to serialize snapshot"),
            },
            Action::Help => self.say(HELP),
            Action::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn edit_range(&self, from: i32, to: i32) {
        if let Err(error) = self.sequencer.set_range(from, to) {
            debug!(%error, "range edit refused");
        }
    }

    fn say(&self, text: &str) {
        if let Err(error) = self.console.write_line(text) {
            warn!(%error, "failed to write to console");
        }
    }

    /// Runs the input loop until `quit` or end of input. The renderer is
    /// stopped on every exit path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if reading input or writing the greeting
    /// fails.
    pub async fn run<R>(mut self, input: R) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
    {
        let renderer = spawn_renderer(self.console.clone(), self.sequencer.watch());
        let outcome = self.drive(input).await;
        renderer.abort();
        match &outcome {
            Ok(()) => info!("input closed, shutting down"),
            Err(error) => warn!(%error, "input loop failed"),
        }
        outcome
    }

    async fn drive<R>(&mut self, input: R) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
    {
        self.console.write_line(&format!(
            "Bingo number generator. Mood: {}. Type `help` for commands.",
            self.backdrop.current().label
        ))?;
        self.console
            .write_line(&render_board(&self.sequencer.snapshot()))?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if self.handle_line(&line) == Flow::Quit {
                break;
            }
        }
        Ok(())
    }
}
