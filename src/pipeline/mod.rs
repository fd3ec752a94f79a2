//! The hotkey-triggered transform pipeline
//!
//! `Dispatcher` turns hotkey presses into runs, one at a time; `Pipeline`
//! performs a single run against the clipboard and the input stream.

mod dispatcher;
mod guard;
mod runner;

pub use dispatcher::Dispatcher;
pub use runner::Pipeline;
