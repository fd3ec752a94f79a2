//! Clipboard save / await-copy / stage / restore protocol

use std::sync::Arc;

use tokio::time::sleep;
use tracing::{debug, trace, warn};

use super::{Clipboard, ClipboardError};
use crate::config::Timings;

/// Clipboard state captured at the start of a run
///
/// Not `Clone`; `ClipboardCoordinator::restore` consumes it, so a run can
/// restore only once.
#[derive(Debug, PartialEq, Eq)]
pub struct ClipboardSnapshot {
    content: Option<String>,
    change_count: i64,
}

impl ClipboardSnapshot {
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn change_count(&self) -> i64 {
        self.change_count
    }
}

/// Drives one run's use of the shared clipboard
pub struct ClipboardCoordinator<C> {
    clipboard: Arc<C>,
    timings: Timings,
}

impl<C: Clipboard> ClipboardCoordinator<C> {
    pub fn new(clipboard: Arc<C>, timings: Timings) -> Self {
        Self { clipboard, timings }
    }

    /// Record what must be put back at the end of the run
    pub fn capture(&self) -> Result<ClipboardSnapshot, ClipboardError> {
        let (content, change_count) = self.clipboard.read()?;
        debug!(
            change_count,
            has_content = content.is_some(),
            "clipboard captured"
        );
        Ok(ClipboardSnapshot {
            content,
            change_count,
        })
    }

    /// Wait for another process to write the clipboard after a copy chord
    ///
    /// Polls the change counter every `poll_interval`, at most
    /// `poll_attempts` times. Returns the new text as soon as the counter
    /// moves, or `None` when it never moves or the new content is empty.
    pub async fn await_external_copy(&self, snapshot: &ClipboardSnapshot) -> Option<String> {
        for attempt in 1..=self.timings.poll_attempts {
            sleep(self.timings.poll_interval).await;

            let count = match self.clipboard.change_count() {
                Ok(count) => count,
                Err(e) => {
                    trace!(attempt, error = %e, "clipboard unreadable, polling again");
                    continue;
                }
            };
            if count != snapshot.change_count {
                let text = self.clipboard.read_text();
                trace!(attempt, "clipboard changed");
                return text.filter(|t| !t.is_empty());
            }
        }

        debug!(
            attempts = self.timings.poll_attempts,
            "clipboard unchanged, nothing selected"
        );
        None
    }

    /// Replace the clipboard content with the converted text
    pub fn stage(&self, text: &str) -> Result<(), ClipboardError> {
        self.clipboard.write_text(text)
    }

    /// Put the captured content back
    ///
    /// Does nothing when the counter has not moved since capture, so content
    /// that is not a string (images, files) survives a run that never wrote.
    /// Otherwise a snapshot without content clears the clipboard instead of
    /// writing an empty string.
    pub fn restore(&self, snapshot: ClipboardSnapshot) -> Result<(), ClipboardError> {
        match self.clipboard.change_count() {
            Ok(count) if count == snapshot.change_count => {
                debug!(change_count = count, "clipboard untouched, nothing to restore");
                return Ok(());
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "clipboard counter unreadable, restoring anyway"),
        }

        let result = match &snapshot.content {
            Some(text) => self.clipboard.write_text(text),
            None => self.clipboard.clear(),
        };
        debug!(
            restored_content = snapshot.content.is_some(),
            ok = result.is_ok(),
            "clipboard restored"
        );
        result
    }
}
