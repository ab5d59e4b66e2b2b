//! Events published by the draw sequencer.

use bingo_core::error::DrawError;
use bingo_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawEventKind {
    /// A valid request moved the sequencer into `Spinning`.
    SpinStarted {
        /// Lower bound of the spin.
        min: i32,
        /// Upper bound of the spin.
        max: i32,
    },
    /// A spin tick replaced the displayed number with noise.
    SpinTick {
        /// Cosmetic value now displayed.
        value: i32,
    },
    /// The spin finished and a number was committed to history.
    NumberCommitted {
        /// The committed number.
        value: i32,
        /// History length after the commit.
        drawn: usize,
    },
    /// The range was edited while idle.
    RangeChanged {
        /// New "From" bound.
        from: i32,
        /// New "To" bound.
        to: i32,
    },
    /// Reset wiped history and the displayed number.
    HistoryCleared {
        /// Whether a spin was cancelled by the reset.
        cancelled_spin: bool,
    },
    /// A request or edit was refused.
    DrawRejected {
        /// Why it was refused.
        error: DrawError,
    },
}

/// Event envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: DrawEventKind,
}

impl DrawEventKind {
    /// Stable type name used in metadata and logs.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SpinStarted { .. } => "draw.spin_started",
            Self::SpinTick { .. } => "draw.spin_tick",
            Self::NumberCommitted { .. } => "draw.number_committed",
            Self::RangeChanged { .. } => "draw.range_changed",
            Self::HistoryCleared { .. } => "draw.history_cleared",
            Self::DrawRejected { .. } => "draw.rejected",
        }
    }
}

impl DomainEvent for DrawEvent {
    fn event_type(&self) -> &'static str {
        self.kind.type_name()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).unwrap_or(serde_json::Value::Null)
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
