//! Turns hotkey presses into pipeline runs
//!
//! Only one run may borrow the clipboard at a time. A press that arrives
//! while a run is in flight (including its delayed restore) is dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::guard::RunGuard;
use super::runner::Pipeline;
use crate::clipboard::Clipboard;
use crate::events::{RunEvent, RunOutcome};
use crate::hotkey::HotkeyEvent;
use crate::inject::KeyInjector;

const IDLE_POLL: Duration = Duration::from_millis(10);

/// Consumes hotkey events and schedules runs on the current runtime
pub struct Dispatcher<C, K> {
    pipeline: Arc<Pipeline<C, K>>,
    in_flight: Arc<AtomicBool>,
    event_tx: broadcast::Sender<RunEvent>,
}

impl<C, K> Dispatcher<C, K>
where
    C: Clipboard + 'static,
    K: KeyInjector + 'static,
{
    pub fn new(pipeline: Pipeline<C, K>, event_tx: broadcast::Sender<RunEvent>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            in_flight: Arc::new(AtomicBool::new(false)),
            event_tx,
        }
    }

    /// True while a run holds the clipboard
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Wait until no run holds the clipboard
    ///
    /// Used at shutdown so an in-flight run still gets to restore.
    pub async fn wait_idle(&self) {
        while self.is_busy() {
            sleep(IDLE_POLL).await;
        }
    }

    /// Process hotkey events until the listener side of the channel closes
    pub async fn run(&self, mut hotkey_rx: mpsc::Receiver<HotkeyEvent>) {
        info!("dispatcher started");

        while let Some(event) = hotkey_rx.recv().await {
            match event {
                HotkeyEvent::Pressed => {
                    self.trigger();
                }
                HotkeyEvent::TapDisabled => {
                    warn!("hotkey tap was disabled, presses may have been missed");
                }
            }
        }

        info!("dispatcher stopped");
    }

    /// Start a run after the debounce delay, unless one is already in flight
    pub fn trigger(&self) -> Option<JoinHandle<RunOutcome>> {
        let Some(guard) = RunGuard::try_acquire(&self.in_flight) else {
            debug!("run in flight, dropping hotkey press");
            let _ = self.event_tx.send(RunEvent::Dropped);
            return None;
        };

        let _ = self.event_tx.send(RunEvent::Triggered);

        let pipeline = Arc::clone(&self.pipeline);
        let event_tx = self.event_tx.clone();

        Some(tokio::spawn(async move {
            // Let the hotkey's own key-up settle before the copy chord
            sleep(pipeline.timings().debounce).await;

            let started = Instant::now();
            let outcome = pipeline.run().await;
            let duration_ms = started.elapsed().as_millis() as u64;

            drop(guard);
            let _ = event_tx.send(RunEvent::Finished {
                outcome: outcome.clone(),
                duration_ms,
            });
            outcome
        }))
    }
}
