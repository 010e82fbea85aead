//! SIGINT/SIGTERM handling.

use std::io;
use std::thread::{self, JoinHandle};

use signal_hook::iterator::{Handle, Signals};

use crate::runtime::AppHandle;

/// Keeps the signal thread alive; dropping it unregisters the handlers.
pub struct SignalHookGuard {
    handle: Handle,
    thread: Option<JoinHandle<()>>,
}

impl Drop for SignalHookGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Request a graceful loop stop on SIGINT/SIGTERM, so the terminal is restored by the
/// normal exit path.
pub fn install_signal_handlers(app: AppHandle) -> io::Result<SignalHookGuard> {
    let mut signals = Signals::new([libc::SIGINT, libc::SIGTERM])?;
    let handle = signals.handle();
    let thread = thread::Builder::new()
        .name("tile-signals".into())
        .spawn(move || {
            for signal in signals.forever() {
                tracing::info!(signal, "stop requested by signal");
                app.request_stop();
            }
        })?;

    Ok(SignalHookGuard {
        handle,
        thread: Some(thread),
    })
}
