//! Process lifecycle: shutdown signals and the startup permission gate

#[cfg(target_os = "macos")]
pub mod permissions;
mod shutdown;

pub use shutdown::ShutdownSignal;
