//! Control socket message definitions
//!
//! All messages are JSON-encoded, prefixed with a 4-byte little-endian length.

use serde::{Deserialize, Serialize};

use crate::events::{RunEvent, RunOutcome};

/// Requests from the status-bar app to the daemon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Request current daemon status
    GetStatus,

    /// Ping to check connectivity
    Ping,

    /// Quit action: shut the daemon down
    Quit,
}

/// Responses from daemon to the status-bar app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Current daemon status
    Status(DaemonStatus),

    /// Pong response to ping
    Pong,

    /// Shutdown has been requested
    Stopping,

    /// Error response
    Error { code: String, message: String },
}

/// Full daemon status snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaemonStatus {
    /// Daemon version
    pub version: String,

    /// Trigger chord, e.g. "Control+Shift+T"
    pub hotkey: String,

    /// Whether the hotkey tap is installed
    pub hotkey_registered: bool,

    /// Whether a run currently holds the clipboard
    pub run_in_flight: bool,

    /// Runs that reached the restore step
    pub runs_completed: u64,

    /// Presses discarded because a run was in flight
    pub runs_dropped: u64,

    /// How the most recent run ended
    pub last_outcome: Option<RunOutcome>,

    /// Uptime in seconds
    pub uptime_secs: u64,
}

impl Default for DaemonStatus {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            hotkey: String::new(),
            hotkey_registered: false,
            run_in_flight: false,
            runs_completed: 0,
            runs_dropped: 0,
            last_outcome: None,
            uptime_secs: 0,
        }
    }
}

impl DaemonStatus {
    /// Fold a run event into the counters
    pub fn apply(&mut self, event: &RunEvent) {
        match event {
            RunEvent::Triggered => self.run_in_flight = true,
            RunEvent::Dropped => self.runs_dropped += 1,
            RunEvent::Finished { outcome, .. } => {
                self.run_in_flight = false;
                self.runs_completed += 1;
                self.last_outcome = Some(outcome.clone());
            }
        }
    }
}
