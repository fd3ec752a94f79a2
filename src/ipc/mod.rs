//! Control socket for the status-bar app

mod protocol;
mod server;

pub use server::Server;
