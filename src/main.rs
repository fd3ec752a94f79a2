//! keyboard-translit: retype the selected text in the other keyboard layout
//!
//! Runs in the background on macOS and, on a global hotkey, converts the
//! current selection between the Latin (US) and Ukrainian layouts:
//! - Global hotkey detection via CGEventTap
//! - Copy/paste chords injected as Quartz keyboard events
//! - The user's clipboard saved before each run and restored after it
//! - Control socket for the status-bar app (status and quit)

#![cfg_attr(not(target_os = "macos"), allow(dead_code))]

mod clipboard;
mod config;
mod events;
mod hotkey;
mod inject;
mod ipc;
mod lifecycle;
mod pipeline;
#[cfg(test)]
mod testing;
mod translit;

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::translit::CharMap;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "keyboard-translit starting"
    );

    let config = Config::load()?;
    info!(hotkey = %config.hotkey, ?config.socket_path, "configuration loaded");

    // Fails only if the built-in table is not a bijection
    let table = Arc::new(CharMap::ukrainian()?);
    debug!(pairs = table.len(), "transliteration table built");

    run(config, table).await
}

#[cfg(target_os = "macos")]
async fn run(config: Config, table: Arc<CharMap>) -> Result<()> {
    use std::time::Duration;

    use tokio::sync::{broadcast, mpsc};
    use tracing::{error, warn};

    use crate::clipboard::Pasteboard;
    use crate::events::RunEvent;
    use crate::hotkey::HotkeyListener;
    use crate::inject::CgEventInjector;
    use crate::ipc::Server;
    use crate::lifecycle::{permissions, ShutdownSignal};
    use crate::pipeline::{Dispatcher, Pipeline};
    use crate::translit::Transliterator;

    permissions::ensure_accessibility()?;
    config.ensure_dirs()?;

    let shutdown = ShutdownSignal::new();

    // Hotkey listener -> dispatcher
    let (hotkey_tx, hotkey_rx) = mpsc::channel(32);
    // Dispatcher -> observers
    let (event_tx, _event_rx) = broadcast::channel::<RunEvent>(64);

    let pipeline = Pipeline::new(
        Transliterator::new(table),
        Arc::new(Pasteboard::new()),
        Arc::new(CgEventInjector::new()),
        config.timings,
    );
    let dispatcher = Dispatcher::new(pipeline, event_tx.clone());

    // Start the hotkey listener (runs on dedicated thread)
    let hotkey_listener = HotkeyListener::new(config.hotkey, hotkey_tx);
    let hotkey_registered = match hotkey_listener.start() {
        Ok(()) => {
            info!(hotkey = %config.hotkey, "hotkey listener started");
            true
        }
        Err(e) => {
            error!(?e, "failed to start hotkey listener");
            warn!("continuing without hotkey support - check Accessibility permissions");
            false
        }
    };

    let server = Server::new(&config.socket_path)?;
    server
        .set_hotkey(config.hotkey.to_string(), hotkey_registered)
        .await;

    let mut run_events = event_tx.subscribe();

    info!("daemon initialized, entering main loop");

    tokio::select! {
        _ = dispatcher.run(hotkey_rx) => {
            info!("dispatcher exited");
        }

        result = server.run() => {
            if let Err(e) = result {
                error!(?e, "IPC server error");
            }
        }

        // Keep the control socket status in step with runs
        _ = async {
            loop {
                match run_events.recv().await {
                    Ok(event) => {
                        info!(%event, "run event");
                        server.record_event(&event).await;
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!(skipped = n, "run event receiver lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        break;
                    }
                }
            }
        } => {
            info!("run event handler exited");
        }

        _ = server.quit_requested() => {
            info!("quit requested");
        }

        _ = shutdown.wait() => {
            info!("shutdown signal received");
        }
    }

    info!("shutting down...");

    hotkey_listener.stop();

    // Let an in-flight run restore the clipboard
    if tokio::time::timeout(Duration::from_secs(2), dispatcher.wait_idle())
        .await
        .is_err()
    {
        warn!("run still in flight at shutdown, clipboard may not be restored");
    }

    server.shutdown().await;

    info!("keyboard-translit stopped");

    Ok(())
}

#[cfg(not(target_os = "macos"))]
async fn run(_config: Config, _table: Arc<CharMap>) -> Result<()> {
    anyhow::bail!(
        "keyboard-translit requires macOS: the hotkey tap, key injection and clipboard backends are macOS-only"
    )
}
