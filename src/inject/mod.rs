//! Synthetic key chord injection
//!
//! Injection is fire-and-forget: the pipeline learns whether a copy landed
//! only by watching the clipboard change counter.

#[cfg(target_os = "macos")]
mod cgevent;

#[cfg(target_os = "macos")]
pub use cgevent::CgEventInjector;

use crate::hotkey::Chord;

/// Errors raised when the OS refuses to synthesize input
#[derive(Debug, thiserror::Error)]
pub enum InjectError {
    #[error("failed to create keyboard event source")]
    EventSource,

    #[error("failed to create keyboard event for {0}")]
    EventCreation(Chord),
}

/// Posts key chords into the system input stream
pub trait KeyInjector: Send + Sync {
    /// Post key-down then key-up for `chord`, carrying its modifier flags
    fn send_chord(&self, chord: &Chord) -> Result<(), InjectError>;
}
