//! Errors reported by the run loop.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no root component set")]
    NoRoot,
    #[error("application is already running")]
    AlreadyRunning,
    #[error("failed to initialize terminal: {0}")]
    TerminalInit(#[source] io::Error),
    #[error("failed to resume terminal after suspend: {0}")]
    TerminalResume(#[source] io::Error),
    #[error("failed to restore terminal: {0}")]
    TerminalRestore(#[source] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
