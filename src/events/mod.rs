//! Run events broadcast by the dispatcher
//!
//! Observers (the control socket status, logs) learn what each hotkey press
//! did without reaching into the pipeline.

use serde::{Deserialize, Serialize};

use crate::translit::Direction;

/// How a single run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The selection was replaced with its transliteration
    Replaced {
        direction: Direction,
        /// Number of characters in the replaced text
        chars: usize,
    },

    /// No new clipboard content appeared, or it was empty
    NothingSelected,

    /// Injection or a clipboard write failed; the clipboard was still restored
    Failed { reason: String },
}

impl RunOutcome {
    /// True when converted text was staged and pasted
    pub fn is_replaced(&self) -> bool {
        matches!(self, RunOutcome::Replaced { .. })
    }
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunOutcome::Replaced { direction, chars } => {
                write!(f, "replaced {} chars ({})", chars, direction)
            }
            RunOutcome::NothingSelected => write!(f, "nothing selected"),
            RunOutcome::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}

/// Events emitted over the lifetime of hotkey presses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunEvent {
    /// A press was accepted and a run scheduled
    Triggered,

    /// A press arrived while a run was still in flight and was discarded
    Dropped,

    /// A run finished and the clipboard has been restored
    Finished {
        outcome: RunOutcome,
        /// Time from the start of the run to the end of the restore
        duration_ms: u64,
    },
}

impl std::fmt::Display for RunEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunEvent::Triggered => write!(f, "RUN_TRIGGERED"),
            RunEvent::Dropped => write!(f, "RUN_DROPPED"),
            RunEvent::Finished {
                outcome,
                duration_ms,
            } => write!(f, "RUN_FINISHED {} ({}ms)", outcome, duration_ms),
        }
    }
}
