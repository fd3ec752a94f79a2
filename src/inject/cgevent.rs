//! Key injection through Quartz keyboard events

use core_graphics::event::{CGEvent, CGEventTapLocation};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use tracing::trace;

use super::{InjectError, KeyInjector};
use crate::hotkey::Chord;

/// Posts chords at the HID tap, where the frontmost app sees them as typed
#[derive(Debug, Default, Clone, Copy)]
pub struct CgEventInjector;

impl CgEventInjector {
    pub fn new() -> Self {
        Self
    }
}

impl KeyInjector for CgEventInjector {
    fn send_chord(&self, chord: &Chord) -> Result<(), InjectError> {
        let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState)
            .map_err(|_| InjectError::EventSource)?;

        // Create both events before posting either, so a key-down is never
        // left without its key-up
        let key_down = CGEvent::new_keyboard_event(source.clone(), chord.key_code(), true)
            .map_err(|_| InjectError::EventCreation(*chord))?;
        let key_up = CGEvent::new_keyboard_event(source, chord.key_code(), false)
            .map_err(|_| InjectError::EventCreation(*chord))?;

        let flags = chord.modifiers().to_flags();
        key_down.set_flags(flags);
        key_up.set_flags(flags);

        key_down.post(CGEventTapLocation::HID);
        key_up.post(CGEventTapLocation::HID);

        trace!(%chord, "chord posted");
        Ok(())
    }
}
