//! Platform terminal integrations.

pub mod crossterm_terminal;
#[cfg(unix)]
pub mod signals;

pub use crossterm_terminal::CrosstermTerminal;
#[cfg(unix)]
pub use signals::{install_signal_handlers, SignalHookGuard};
