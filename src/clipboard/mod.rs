//! System clipboard access and the save/replace/restore protocol
//!
//! The clipboard is shared with every other application, so a run only
//! borrows it: whatever was there before the run is put back afterwards.

mod coordinator;
#[cfg(target_os = "macos")]
mod pasteboard;

pub use coordinator::{ClipboardCoordinator, ClipboardSnapshot};
#[cfg(target_os = "macos")]
pub use pasteboard::Pasteboard;

/// Errors from clipboard access
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard refused the new string content")]
    WriteRejected,

    #[error("clipboard is unavailable")]
    Unavailable,
}

/// A string clipboard with a change counter
///
/// The counter increases on every write by any process, which lets the
/// coordinator notice an external copy without re-reading content.
pub trait Clipboard: Send + Sync {
    /// Current value of the change counter
    fn change_count(&self) -> Result<i64, ClipboardError>;

    /// Current string content, `None` when there is no string on the clipboard
    fn read_text(&self) -> Option<String>;

    /// Clear the clipboard and write `text` as its only content
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;

    /// Clear the clipboard, leaving no string content
    fn clear(&self) -> Result<(), ClipboardError>;

    /// Content and counter together
    fn read(&self) -> Result<(Option<String>, i64), ClipboardError> {
        Ok((self.read_text(), self.change_count()?))
    }
}
