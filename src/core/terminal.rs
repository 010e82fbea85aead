//! Terminal trait and lifecycle helpers.

use std::io;

use crate::core::buffer::CellBuffer;
use crate::runtime::wake::EventSink;

/// The physical terminal, as seen by the run loop.
///
/// Implementations own raw-mode entry/exit, escape-sequence decoding and cell output.
/// `start` acquires the terminal and spawns the producer that feeds decoded events into
/// `events`; `stop` joins that producer and restores the terminal.
pub trait Terminal {
    fn start(&mut self, events: EventSink) -> io::Result<()>;

    fn stop(&mut self) -> io::Result<()>;

    /// Terminal dimensions as `(columns, rows)`.
    fn size(&self) -> (u16, u16);

    /// Present a finished frame.
    fn flush(&mut self, frame: &CellBuffer) -> io::Result<()>;
}

/// Tracks whether a terminal is acquired and releases it exactly once.
///
/// A failed `start` is torn down before the error is returned, and a guard dropped while
/// still attached stops the terminal.
pub struct TerminalGuard<T: Terminal> {
    terminal: T,
    attached: bool,
}

impl<T: Terminal> TerminalGuard<T> {
    pub fn new(terminal: T) -> Self {
        Self {
            terminal,
            attached: false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn start(&mut self, events: EventSink) -> io::Result<()> {
        self.attached = true;
        if let Err(err) = self.terminal.start(events) {
            let _ = self.stop();
            return Err(err);
        }
        Ok(())
    }

    /// Restore the terminal if it is attached; a no-op otherwise.
    pub fn stop(&mut self) -> io::Result<()> {
        if !self.attached {
            return Ok(());
        }
        self.attached = false;
        self.terminal.stop()
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }
}

impl<T: Terminal> Drop for TerminalGuard<T> {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::{Terminal, TerminalGuard};
    use crate::core::buffer::CellBuffer;
    use crate::runtime::wake::EventSink;
    use std::cell::Cell;
    use std::io;
    use std::rc::Rc;

    struct CountingTerminal {
        fail_start: bool,
        stops: Rc<Cell<usize>>,
    }

    impl Terminal for CountingTerminal {
        fn start(&mut self, _events: EventSink) -> io::Result<()> {
            if self.fail_start {
                return Err(io::Error::new(io::ErrorKind::Other, "no tty"));
            }
            Ok(())
        }

        fn stop(&mut self) -> io::Result<()> {
            self.stops.set(self.stops.get() + 1);
            Ok(())
        }

        fn size(&self) -> (u16, u16) {
            (80, 24)
        }

        fn flush(&mut self, _frame: &CellBuffer) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn stop_runs_once() {
        let stops = Rc::new(Cell::new(0));
        let mut guard = TerminalGuard::new(CountingTerminal {
            fail_start: false,
            stops: Rc::clone(&stops),
        });
        guard.start(EventSink::detached()).expect("start");
        assert!(guard.is_attached());
        guard.stop().expect("stop");
        guard.stop().expect("second stop");
        drop(guard);
        assert_eq!(stops.get(), 1);
    }

    #[test]
    fn failed_start_is_torn_down() {
        let stops = Rc::new(Cell::new(0));
        let mut guard = TerminalGuard::new(CountingTerminal {
            fail_start: true,
            stops: Rc::clone(&stops),
        });
        assert!(guard.start(EventSink::detached()).is_err());
        assert!(!guard.is_attached());
        assert_eq!(stops.get(), 1);
    }

    #[test]
    fn drop_stops_attached_terminal() {
        let stops = Rc::new(Cell::new(0));
        {
            let mut guard = TerminalGuard::new(CountingTerminal {
                fail_start: false,
                stops: Rc::clone(&stops),
            });
            guard.start(EventSink::detached()).expect("start");
        }
        assert_eq!(stops.get(), 1);
    }
}
