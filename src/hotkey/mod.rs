//! Hotkey module for global keyboard event listening
//!
//! Uses macOS CGEventTap to catch the configured chord system-wide and
//! forward each press to the run dispatcher.

mod keys;
#[cfg(target_os = "macos")]
mod listener;

pub use keys::{Chord, ChordParseError, ModifierState};
#[cfg(target_os = "macos")]
pub use listener::HotkeyListener;

/// Events sent from the hotkey listener to the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotkeyEvent {
    /// The configured chord was pressed
    Pressed,
    /// Event tap was disabled by macOS and has been re-enabled
    TapDisabled,
}

/// Errors that can occur in the hotkey listener
#[derive(Debug, thiserror::Error)]
pub enum HotkeyError {
    #[error("hotkey listener is already running")]
    AlreadyRunning,

    #[error("failed to create event tap - check Accessibility permissions")]
    EventTapCreation,

    #[error("failed to create run loop source for the event tap")]
    RunLoopSource,

    #[error("failed to spawn listener thread: {0}")]
    ThreadSpawn(String),
}
