//! Draw sequencer — the timed `Idle`/`Spinning` state machine.
//!
//! A valid request spawns two tokio tasks: a repeating tick that puts
//! noise on the display and a one-shot completion that commits the real
//! pick. Both tasks hold a `Weak` handle and the spin generation they
//! were started for, and re-check that generation under the state lock
//! before touching anything. `reset` and teardown abort both tasks and
//! bump the generation, so a callback that already woke up finds itself
//! stale and does nothing.
//!
//! The state lock is a `std::sync::Mutex` and is never held across an
//! `.await`. Notifications and the punch animation run after the lock is
//! released.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use bingo_core::clock::Clock;
use bingo_core::error::DrawError;
use bingo_core::event::EventMetadata;
use bingo_core::rng::DeterministicRng;
use bingo_core::surface::{Animator, Notice, Notifier};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::settings::SequencerSettings;
use crate::domain::engine::{count_available, pick_available, spin_noise};
use crate::domain::events::{DrawEvent, DrawEventKind};
use crate::domain::history::History;
use crate::domain::range::{Range, validate_range};
use crate::domain::state::{DrawSnapshot, DrawState};

/// Surfaces the sequencer reports to.
#[derive(Clone)]
pub struct Collaborators {
    /// Stamps published events.
    pub clock: Arc<dyn Clock>,
    /// Receives advisory notices.
    pub notifier: Arc<dyn Notifier>,
    /// Plays the punch after each commit.
    pub animator: Arc<dyn Animator>,
}

/// Handles of the two tasks driving one spin.
struct SpinTimers {
    generation: u64,
    tick: JoinHandle<()>,
    completion: JoinHandle<()>,
}

impl SpinTimers {
    fn abort(self) {
        self.tick.abort();
        self.completion.abort();
    }
}

struct SequencerState {
    range: Range,
    history: History,
    current: Option<i32>,
    phase: DrawState,
    rng: Box<dyn DeterministicRng>,
    spin: Option<SpinTimers>,
    generation: u64,
    next_sequence: u64,
}

impl SequencerState {
    fn snapshot(&self) -> DrawSnapshot {
        DrawSnapshot {
            range: self.range,
            state: self.phase,
            current: self.current,
            history: self.history.to_vec(),
            available: count_available(&self.range, &self.history),
        }
    }

    /// Returns `true` if `generation` is the spin currently in flight.
    fn is_live(&self, generation: u64) -> bool {
        self.phase == DrawState::Spinning
            && self
                .spin
                .as_ref()
                .is_some_and(|timers| timers.generation == generation)
    }

    /// Aborts the in-flight spin, if any, and invalidates its generation.
    fn cancel_spin(&mut self) -> bool {
        self.generation += 1;
        match self.spin.take() {
            Some(timers) => {
                timers.abort();
                true
            }
            None => false,
        }
    }
}

struct Shared {
    state: Mutex<SequencerState>,
    settings: SequencerSettings,
    collaborators: Collaborators,
    events: broadcast::Sender<DrawEvent>,
    snapshots: watch::Sender<DrawSnapshot>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, SequencerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publishes `kind` followed by the resulting snapshot. Runs with the
    /// lock held so observers see events in mutation order.
    fn publish(&self, state: &mut SequencerState, kind: DrawEventKind) {
        state.next_sequence += 1;
        let metadata = EventMetadata::new(
            kind.type_name(),
            state.next_sequence,
            self.collaborators.clock.as_ref(),
        );
        // Having no subscribers is not an error.
        let _ = self.events.send(DrawEvent { metadata, kind });
        self.snapshots.send_replace(state.snapshot());
    }

    /// Publishes a rejection, releases the lock, then notifies.
    fn settle(
        &self,
        mut guard: MutexGuard<'_, SequencerState>,
        outcome: Result<(), DrawError>,
    ) -> Result<(), DrawError> {
        if let Err(error) = outcome {
            self.publish(&mut guard, DrawEventKind::DrawRejected { error });
            drop(guard);
            self.notify(&error);
        }
        outcome
    }

    fn notify(&self, error: &DrawError) {
        debug!(%error, "draw rejected");
        if let Some(notice) = Notice::from_error(error) {
            self.collaborators.notifier.notify(notice);
        }
    }

    fn try_start(
        &self,
        state: &mut SequencerState,
        weak: &Weak<Self>,
    ) -> Result<(), DrawError> {
        if state.phase == DrawState::Spinning {
            return Err(DrawError::Busy);
        }
        let range = validate_range(state.range.from, state.range.to)?;
        if count_available(&range, &state.history) == 0 {
            return Err(DrawError::Exhausted);
        }

        state.generation += 1;
        let generation = state.generation;
        state.phase = DrawState::Spinning;
        state.spin = Some(SpinTimers {
            generation,
            tick: tokio::spawn(run_ticks(
                weak.clone(),
                generation,
                self.settings.tick_interval,
            )),
            completion: tokio::spawn(run_completion(
                weak.clone(),
                generation,
                self.settings.spin_duration,
            )),
        });

        info!(generation, min = range.min(), max = range.max(), "spin started");
        self.publish(
            state,
            DrawEventKind::SpinStarted {
                min: range.min(),
                max: range.max(),
            },
        );
        Ok(())
    }

    fn try_set_range(
        &self,
        state: &mut SequencerState,
        from: i32,
        to: i32,
    ) -> Result<(), DrawError> {
        if state.phase == DrawState::Spinning {
            return Err(DrawError::Busy);
        }
        let floor = self.settings.floor;
        if let Some(value) = [from, to].into_iter().find(|value| *value < floor) {
            return Err(DrawError::BelowFloor { value, floor });
        }

        state.range = Range::new(from, to);
        debug!(from, to, "range changed");
        self.publish(state, DrawEventKind::RangeChanged { from, to });
        Ok(())
    }

    /// Replaces the displayed number with noise. Returns `false` once the
    /// spin for `generation` is over.
    fn tick(&self, generation: u64) -> bool {
        let mut guard = self.lock();
        let state = &mut *guard;
        if !state.is_live(generation) {
            debug!(generation, "stale tick ignored");
            return false;
        }
        let value = spin_noise(&state.range, state.rng.as_mut());
        state.current = Some(value);
        self.publish(state, DrawEventKind::SpinTick { value });
        true
    }

    /// Ends the spin for `generation`: cancels the tick, commits a pick,
    /// and only then requests the punch.
    fn complete(&self, generation: u64) {
        let mut guard = self.lock();
        let state = &mut *guard;
        let Some(timers) = state.spin.take_if(|timers| timers.generation == generation) else {
            debug!(generation, "stale completion ignored");
            return;
        };
        // The completion handle is this task; only the tick is aborted.
        timers.tick.abort();
        state.phase = DrawState::Idle;

        let outcome = pick_available(&state.range, &state.history, state.rng.as_mut());
        match outcome {
            Ok(value) => {
                state.current = Some(value);
                state.history.record(value);
                let drawn = state.history.len();
                info!(generation, value, drawn, "number committed");
                self.publish(state, DrawEventKind::NumberCommitted { value, drawn });
            }
            Err(error) => {
                warn!(generation, %error, "spin ended without a pick");
                self.publish(state, DrawEventKind::DrawRejected { error });
            }
        }
        drop(guard);

        match outcome {
            Ok(value) => self.spawn_punch(value),
            Err(error) => self.notify(&error),
        }
    }

    fn spawn_punch(&self, value: i32) {
        let animator = Arc::clone(&self.collaborators.animator);
        let effect = self.settings.punch;
        tokio::spawn(async move {
            if let Err(error) = animator.punch(value, effect).await {
                warn!(value, %error, "punch animation failed");
            }
        });
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        if state.cancel_spin() {
            debug!("sequencer dropped mid-spin, timers aborted");
        }
    }
}

async fn run_ticks(weak: Weak<Shared>, generation: u64, period: Duration) {
    let period = period.max(Duration::from_millis(1));
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        let Some(shared) = weak.upgrade() else {
            return;
        };
        if !shared.tick(generation) {
            return;
        }
    }
}

async fn run_completion(weak: Weak<Shared>, generation: u64, after: Duration) {
    time::sleep(after).await;
    if let Some(shared) = weak.upgrade() {
        shared.complete(generation);
    }
}

/// Owner of `History`, `CurrentNumber` and the draw phase.
///
/// Cloning yields another handle to the same sequencer. Dropping the last
/// handle aborts any spin in flight.
#[derive(Clone)]
pub struct DrawSequencer {
    shared: Arc<Shared>,
}

impl DrawSequencer {
    /// Creates an idle sequencer over `settings.initial_range`.
    #[must_use]
    pub fn new(
        settings: SequencerSettings,
        rng: Box<dyn DeterministicRng>,
        collaborators: Collaborators,
    ) -> Self {
        let state = SequencerState {
            range: settings.initial_range,
            history: History::new(),
            current: None,
            phase: DrawState::Idle,
            rng,
            spin: None,
            generation: 0,
            next_sequence: 0,
        };
        let (events, _) = broadcast::channel(settings.event_capacity.max(1));
        let (snapshots, _) = watch::channel(state.snapshot());
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                settings,
                collaborators,
                events,
                snapshots,
            }),
        }
    }

    /// Starts a spin over the current range.
    ///
    /// Ignored while a spin is in flight. Otherwise the raw range must
    /// satisfy `from < to` and at least one number must remain; failures
    /// are also sent to the notifier.
    ///
    /// # Errors
    ///
    /// Returns `DrawError::Busy`, `DrawError::InvalidRange` or
    /// `DrawError::Exhausted`. None of them change state.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn request(&self) -> Result<(), DrawError> {
        let weak = Arc::downgrade(&self.shared);
        let mut guard = self.shared.lock();
        let outcome = self.shared.try_start(&mut guard, &weak);
        self.shared.settle(guard, outcome)
    }

    /// Edits the range. Only allowed while idle; history is kept.
    ///
    /// # Errors
    ///
    /// Returns `DrawError::Busy` during a spin and `DrawError::BelowFloor`
    /// when a bound is under the configured floor.
    pub fn set_range(&self, from: i32, to: i32) -> Result<(), DrawError> {
        let mut guard = self.shared.lock();
        let outcome = self.shared.try_set_range(&mut guard, from, to);
        self.shared.settle(guard, outcome)
    }

    /// Clears history and the displayed number, cancels any spin in
    /// flight, and returns to `Idle`. Valid in either state.
    pub fn reset(&self) {
        let mut guard = self.shared.lock();
        let state = &mut *guard;
        let cancelled_spin = state.cancel_spin();
        state.history.clear();
        state.current = None;
        state.phase = DrawState::Idle;
        info!(cancelled_spin, "history cleared");
        self.shared
            .publish(state, DrawEventKind::HistoryCleared { cancelled_spin });
    }

    /// Returns the current state.
    #[must_use]
    pub fn snapshot(&self) -> DrawSnapshot {
        self.shared.lock().snapshot()
    }

    /// Subscribes to every published event from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DrawEvent> {
        self.shared.events.subscribe()
    }

    /// Watches the latest snapshot.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<DrawSnapshot> {
        self.shared.snapshots.subscribe()
    }
}
