//! One hotkey-triggered run: copy, convert, paste, restore

use std::sync::Arc;
use std::time::Instant;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::clipboard::{Clipboard, ClipboardCoordinator, ClipboardError, ClipboardSnapshot};
use crate::config::Timings;
use crate::events::RunOutcome;
use crate::hotkey::Chord;
use crate::inject::{InjectError, KeyInjector};
use crate::translit::Transliterator;

/// Failures that end a run early
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("input injection unavailable: {0}")]
    Injection(#[from] InjectError),

    #[error("clipboard access failed: {0}")]
    Clipboard(#[from] ClipboardError),
}

/// Replaces the current selection with its transliteration
pub struct Pipeline<C, K> {
    translit: Transliterator,
    clipboard: ClipboardCoordinator<C>,
    injector: Arc<K>,
    timings: Timings,
}

impl<C: Clipboard, K: KeyInjector> Pipeline<C, K> {
    pub fn new(
        translit: Transliterator,
        clipboard: Arc<C>,
        injector: Arc<K>,
        timings: Timings,
    ) -> Self {
        Self {
            translit,
            clipboard: ClipboardCoordinator::new(clipboard, timings),
            injector,
            timings,
        }
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    /// Execute one run and restore the clipboard on every path
    ///
    /// When converted text was pasted, the restore waits `restore_delay` so
    /// the target application reads the clipboard first. Every other path
    /// restores immediately. A clipboard that cannot be read at capture
    /// ends the run before anything is injected or written.
    pub async fn run(&self) -> RunOutcome {
        let started = Instant::now();
        let snapshot = match self.clipboard.capture() {
            Ok(snapshot) => snapshot,
            Err(e) => return failed(PipelineError::from(e)),
        };

        let outcome = match self.replace_selection(&snapshot).await {
            Ok(outcome) => outcome,
            Err(e) => failed(e),
        };

        if outcome.is_replaced() {
            sleep(self.timings.restore_delay).await;
        }

        if let Err(e) = self.clipboard.restore(snapshot) {
            warn!(error = %e, "failed to restore clipboard");
        }

        info!(
            %outcome,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "run complete"
        );
        outcome
    }

    async fn replace_selection(
        &self,
        snapshot: &ClipboardSnapshot,
    ) -> Result<RunOutcome, PipelineError> {
        self.injector.send_chord(&Chord::COPY)?;

        let Some(text) = self.clipboard.await_external_copy(snapshot).await else {
            return Ok(RunOutcome::NothingSelected);
        };

        let (direction, converted) = self.translit.convert(&text);
        let chars = converted.chars().count();
        debug!(%direction, chars, "selection converted");

        self.clipboard.stage(&converted)?;
        self.injector.send_chord(&Chord::PASTE)?;

        Ok(RunOutcome::Replaced { direction, chars })
    }
}

fn failed(error: PipelineError) -> RunOutcome {
    warn!(error = %error, "run aborted");
    RunOutcome::Failed {
        reason: error.to_string(),
    }
}
