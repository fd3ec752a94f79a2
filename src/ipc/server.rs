//! Unix domain socket server for the status-bar control channel
//!
//! Serves status queries and the quit action. Run events are folded into
//! the status by the main loop through `record_event`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::UnixListener;
use tokio::sync::{broadcast, Notify, RwLock};
use tracing::{debug, error, info, warn};

use crate::events::RunEvent;

use super::protocol::{DaemonStatus, Request, Response};

/// Largest accepted request body
const MAX_MESSAGE_LEN: usize = 1024 * 1024;

/// IPC Server handling client connections
pub struct Server {
    socket_path: PathBuf,
    listener: Option<UnixListener>,
    shared: Arc<Shared>,
    shutdown_tx: broadcast::Sender<()>,
}

/// State shared with client handlers
struct Shared {
    state: RwLock<ServerState>,
    quit: Notify,
}

struct ServerState {
    status: DaemonStatus,
    start_time: std::time::Instant,
}

impl Server {
    /// Create a new IPC server
    pub fn new(socket_path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent).context("failed to create socket directory")?;
        }

        // Remove stale socket if it exists
        if socket_path.exists() {
            std::fs::remove_file(socket_path).context("failed to remove stale socket")?;
        }

        let listener = UnixListener::bind(socket_path).context("failed to bind Unix socket")?;

        // Set socket permissions to owner-only (0600)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(socket_path, std::fs::Permissions::from_mode(0o600))?;
        }

        let (shutdown_tx, _) = broadcast::channel(1);

        info!(?socket_path, "IPC server listening");

        Ok(Self {
            socket_path: socket_path.to_owned(),
            listener: Some(listener),
            shared: Shared::new(),
            shutdown_tx,
        })
    }

    /// Record the trigger chord and whether its tap is installed
    pub async fn set_hotkey(&self, hotkey: String, registered: bool) {
        let mut state = self.shared.state.write().await;
        state.status.hotkey = hotkey;
        state.status.hotkey_registered = registered;
    }

    /// Update status counters from a run event
    pub async fn record_event(&self, event: &RunEvent) {
        self.shared.state.write().await.status.apply(event);
    }

    /// Resolves once a client has sent `quit`
    pub async fn quit_requested(&self) {
        self.shared.quit.notified().await;
    }

    /// Run the server, accepting connections
    pub async fn run(&self) -> Result<()> {
        let listener = self.listener.as_ref().context("server not initialized")?;

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    debug!("client connected");
                    let shared = Arc::clone(&self.shared);
                    let mut shutdown_rx = self.shutdown_tx.subscribe();

                    tokio::spawn(async move {
                        tokio::select! {
                            result = handle_client(stream, shared) => {
                                if let Err(e) = result {
                                    warn!(?e, "client handler error");
                                }
                            }
                            _ = shutdown_rx.recv() => {
                                debug!("client handler shutting down");
                            }
                        }
                    });
                }
                Err(e) => {
                    error!(?e, "accept error");
                }
            }
        }
    }

    /// Gracefully shutdown the server
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());

        // Remove socket file
        if self.socket_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.socket_path) {
                warn!(?e, "failed to remove socket file");
            }
        }

        info!("IPC server shutdown complete");
    }
}

impl Shared {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(ServerState {
                status: DaemonStatus::default(),
                start_time: std::time::Instant::now(),
            }),
            quit: Notify::new(),
        })
    }

    /// Process a request and return a response
    async fn process_request(&self, request: Request) -> Response {
        match request {
            Request::Ping => Response::Pong,

            Request::GetStatus => {
                let mut state = self.state.write().await;
                state.status.uptime_secs = state.start_time.elapsed().as_secs();
                Response::Status(state.status.clone())
            }

            Request::Quit => {
                info!("quit requested via IPC");
                self.quit.notify_one();
                Response::Stopping
            }
        }
    }
}

/// Handle a single client connection
async fn handle_client<S>(mut stream: S, shared: Arc<Shared>) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut len_buf = [0u8; 4];

    loop {
        // Read message length (4-byte little-endian)
        match stream.read_exact(&mut len_buf).await {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                debug!("client disconnected");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        let len = u32::from_le_bytes(len_buf) as usize;
        if len > MAX_MESSAGE_LEN {
            warn!(len, "message too large, disconnecting");
            return Ok(());
        }

        let mut msg_buf = vec![0u8; len];
        stream.read_exact(&mut msg_buf).await?;

        let response = match serde_json::from_slice::<Request>(&msg_buf) {
            Ok(request) => {
                debug!(?request, "received request");
                shared.process_request(request).await
            }
            Err(e) => Response::Error {
                code: "bad_request".to_string(),
                message: e.to_string(),
            },
        };

        send_message(&mut stream, &response).await?;
    }
}

/// Send a length-prefixed JSON message
async fn send_message<S, T>(stream: &mut S, msg: &T) -> Result<()>
where
    S: AsyncWrite + Unpin,
    T: serde::Serialize,
{
    let msg_bytes = serde_json::to_vec(msg)?;
    let msg_len = (msg_bytes.len() as u32).to_le_bytes();

    stream.write_all(&msg_len).await?;
    stream.write_all(&msg_bytes).await?;

    Ok(())
}
