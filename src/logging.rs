//! Log sink installation.
//!
//! The UI owns the terminal, so logs go to a file. Nothing is installed unless the
//! embedding program asks for it.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::EnvConfig;

/// Environment variable holding an `EnvFilter` directive, e.g. `tile_tui=trace`.
pub const LOG_FILTER_ENV: &str = "TILE_LOG";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to open log file: {0}")]
    Open(#[from] io::Error),
    #[error("a global tracing subscriber is already installed: {0}")]
    AlreadyInstalled(String),
}

/// Install a global `tracing` subscriber appending to `path`.
///
/// The filter comes from `TILE_LOG` when set, otherwise `info` (or `debug`).
pub fn init_file_logging(path: &Path, debug: bool) -> Result<(), LoggingError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .map_err(|err| LoggingError::AlreadyInstalled(err.to_string()))
}

/// Install file logging if `TILE_LOG_FILE` is set. Returns whether a sink was installed.
pub fn init_from_env(env: &EnvConfig) -> Result<bool, LoggingError> {
    match env.log_file.as_deref() {
        Some(path) => init_file_logging(path, env.debug).map(|()| true),
        None => Ok(false),
    }
}
