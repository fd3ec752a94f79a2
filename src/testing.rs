//! In-memory stand-ins for the clipboard and the focused application

use std::sync::{Arc, Mutex};

use tokio::time::Instant;

use crate::clipboard::{Clipboard, ClipboardError};
use crate::hotkey::Chord;
use crate::inject::{InjectError, KeyInjector};

#[derive(Debug, Default)]
struct ClipboardState {
    content: Option<String>,
    /// Data with no string representation, such as an image
    non_text: bool,
    change_count: i64,
    writes: Vec<(Instant, Option<String>)>,
    rejected: Vec<String>,
    unavailable: bool,
}

/// Clipboard with a change counter, recording every write
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    state: Mutex<ClipboardState>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        let clipboard = Self::new();
        clipboard.state.lock().unwrap().content = Some(text.to_string());
        clipboard
    }

    /// A clipboard holding only non-string data
    pub fn with_non_text() -> Self {
        let clipboard = Self::new();
        {
            let mut state = clipboard.state.lock().unwrap();
            state.non_text = true;
            state.change_count = 7;
        }
        clipboard
    }

    pub fn has_non_text(&self) -> bool {
        self.state.lock().unwrap().non_text
    }

    /// Every write and clear, with the (virtual) time it happened
    pub fn writes(&self) -> Vec<(Instant, Option<String>)> {
        self.state.lock().unwrap().writes.clone()
    }

    /// Make `write_text(text)` fail as if the pasteboard refused it
    pub fn fail_writes_of(&self, text: &str) {
        self.state.lock().unwrap().rejected.push(text.to_string());
    }

    /// Toggle whether the pasteboard can be reached at all
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().unwrap().unavailable = unavailable;
    }

    fn set(&self, content: Option<String>) {
        let mut state = self.state.lock().unwrap();
        state.change_count += 1;
        state.non_text = false;
        state.content = content.clone();
        state.writes.push((Instant::now(), content));
    }
}

impl Clipboard for MemoryClipboard {
    fn change_count(&self) -> Result<i64, ClipboardError> {
        let state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(ClipboardError::Unavailable);
        }
        Ok(state.change_count)
    }

    fn read_text(&self) -> Option<String> {
        self.state.lock().unwrap().content.clone()
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        {
            let state = self.state.lock().unwrap();
            if state.unavailable {
                return Err(ClipboardError::Unavailable);
            }
            if state.rejected.iter().any(|r| r == text) {
                return Err(ClipboardError::WriteRejected);
            }
        }
        self.set(Some(text.to_string()));
        Ok(())
    }

    fn clear(&self) -> Result<(), ClipboardError> {
        if self.state.lock().unwrap().unavailable {
            return Err(ClipboardError::Unavailable);
        }
        self.set(None);
        Ok(())
    }
}

/// Simulates the frontmost application reacting to copy and paste chords
///
/// Copy writes the current selection (if any) to the clipboard; paste
/// records what the clipboard held at that moment.
pub struct FakeDesktop {
    clipboard: Arc<MemoryClipboard>,
    selection: Mutex<Option<String>>,
    chords: Mutex<Vec<(Instant, Chord)>>,
    pasted: Mutex<Vec<Option<String>>>,
    failing: Mutex<Vec<Chord>>,
}

impl FakeDesktop {
    pub fn new(clipboard: Arc<MemoryClipboard>) -> Self {
        Self {
            clipboard,
            selection: Mutex::new(None),
            chords: Mutex::new(Vec::new()),
            pasted: Mutex::new(Vec::new()),
            failing: Mutex::new(Vec::new()),
        }
    }

    pub fn select(&self, text: &str) {
        *self.selection.lock().unwrap() = Some(text.to_string());
    }

    /// Make injection of `chord` fail as if the OS refused synthetic input
    pub fn fail_on(&self, chord: Chord) {
        self.failing.lock().unwrap().push(chord);
    }

    pub fn chords(&self) -> Vec<Chord> {
        self.chords.lock().unwrap().iter().map(|(_, c)| *c).collect()
    }

    pub fn chord_times(&self) -> Vec<(Instant, Chord)> {
        self.chords.lock().unwrap().clone()
    }

    pub fn pasted(&self) -> Vec<Option<String>> {
        self.pasted.lock().unwrap().clone()
    }
}

impl KeyInjector for FakeDesktop {
    fn send_chord(&self, chord: &Chord) -> Result<(), InjectError> {
        if self.failing.lock().unwrap().contains(chord) {
            return Err(InjectError::EventSource);
        }
        self.chords.lock().unwrap().push((Instant::now(), *chord));

        if *chord == Chord::COPY {
            if let Some(text) = self.selection.lock().unwrap().clone() {
                self.clipboard.set(Some(text));
            }
        } else if *chord == Chord::PASTE {
            self.pasted.lock().unwrap().push(self.clipboard.read_text());
        }
        Ok(())
    }
}
