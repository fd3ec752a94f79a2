//! Global hotkey listener using macOS CGEventTap
//!
//! Watches system-wide key-down events for the configured chord.
//! Runs on a dedicated thread with its own CFRunLoop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use core_foundation::runloop::{kCFRunLoopCommonModes, kCFRunLoopDefaultMode, CFRunLoop};
use core_graphics::event::{
    CGEvent, CGEventTap, CGEventTapLocation, CGEventTapOptions, CGEventTapPlacement,
    CGEventTapProxy, CGEventType, EventField,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::keys::{Chord, ModifierState};
use super::{HotkeyError, HotkeyEvent};

/// What the tap callback hands to the listener loop
enum TapSignal {
    Pressed,
    Disabled,
}

/// Global hotkey listener that reports presses of a single chord
pub struct HotkeyListener {
    chord: Chord,
    event_tx: mpsc::Sender<HotkeyEvent>,
    running: Arc<AtomicBool>,
}

impl HotkeyListener {
    /// Create a new hotkey listener
    pub fn new(chord: Chord, event_tx: mpsc::Sender<HotkeyEvent>) -> Self {
        Self {
            chord,
            event_tx,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start the hotkey listener
    ///
    /// This spawns a dedicated thread that runs a CFRunLoop to receive
    /// CGEventTap callbacks. The listener runs until `stop()` is called
    /// or the program exits.
    pub fn start(&self) -> Result<(), HotkeyError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(HotkeyError::AlreadyRunning);
        }

        let chord = self.chord;
        let event_tx = self.event_tx.clone();
        let running = Arc::clone(&self.running);

        thread::Builder::new()
            .name("hotkey-listener".to_string())
            .spawn(move || {
                info!(%chord, "hotkey listener thread started");

                if let Err(e) = run_event_loop(chord, event_tx, running.clone()) {
                    error!(?e, "hotkey listener error");
                }

                running.store(false, Ordering::SeqCst);
                info!("hotkey listener thread stopped");
            })
            .map_err(|e| {
                self.running.store(false, Ordering::SeqCst);
                HotkeyError::ThreadSpawn(e.to_string())
            })?;

        Ok(())
    }

    /// Stop the hotkey listener
    ///
    /// The run loop notices on its next slice and tears the tap down.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Check if the listener is currently running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Run the CFRunLoop with the event tap
fn run_event_loop(
    chord: Chord,
    event_tx: mpsc::Sender<HotkeyEvent>,
    running: Arc<AtomicBool>,
) -> Result<(), HotkeyError> {
    let (callback_tx, callback_rx) = std::sync::mpsc::channel::<TapSignal>();

    // CGEventTap callback - must be fast and non-blocking
    let callback = move |_proxy: CGEventTapProxy,
                         event_type: CGEventType,
                         event: &CGEvent|
                         -> Option<CGEvent> {
        match event_type {
            CGEventType::KeyDown => {
                let repeat = event.get_integer_value_field(EventField::KEYBOARD_EVENT_AUTOREPEAT);
                let code = event.get_integer_value_field(EventField::KEYBOARD_EVENT_KEYCODE);
                let modifiers = ModifierState::from_flags(event.get_flags());

                if u16::try_from(code).map_or(false, |code| chord.matches(code, modifiers)) {
                    if repeat == 0 {
                        let _ = callback_tx.send(TapSignal::Pressed);
                    }
                    // Swallow the chord so the focused app never sees it
                    return None;
                }
            }
            CGEventType::TapDisabledByTimeout | CGEventType::TapDisabledByUserInput => {
                let _ = callback_tx.send(TapSignal::Disabled);
            }
            _ => {}
        }
        Some(event.clone())
    };

    let tap = CGEventTap::new(
        CGEventTapLocation::Session,
        CGEventTapPlacement::HeadInsertEventTap,
        CGEventTapOptions::Default,
        vec![CGEventType::KeyDown],
        callback,
    )
    .map_err(|_| {
        error!("failed to create event tap - is Accessibility permission granted?");
        HotkeyError::EventTapCreation
    })?;

    tap.enable();

    let run_loop_source = tap
        .mach_port
        .create_runloop_source(0)
        .map_err(|_| HotkeyError::RunLoopSource)?;
    let run_loop = CFRunLoop::get_current();

    unsafe {
        run_loop.add_source(&run_loop_source, kCFRunLoopCommonModes);
    }

    info!("event tap created and enabled");

    while running.load(Ordering::SeqCst) {
        // Run the loop for a short interval, then check for new events
        unsafe {
            CFRunLoop::run_in_mode(
                kCFRunLoopDefaultMode,
                std::time::Duration::from_millis(100),
                true,
            );
        }

        while let Ok(signal) = callback_rx.try_recv() {
            let event = match signal {
                TapSignal::Pressed => {
                    debug!(%chord, "hotkey pressed");
                    HotkeyEvent::Pressed
                }
                TapSignal::Disabled => {
                    warn!("event tap disabled by the system, re-enabling");
                    tap.enable();
                    HotkeyEvent::TapDisabled
                }
            };

            // Not in an async context, so block until the dispatcher has room
            if event_tx.blocking_send(event).is_err() {
                warn!("failed to send hotkey event - channel closed?");
                running.store(false, Ordering::SeqCst);
                break;
            }
        }
    }

    Ok(())
}
