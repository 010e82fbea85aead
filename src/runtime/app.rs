//! Application run loop.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::core::buffer::CellBuffer;
use crate::core::component::{self, Component};
use crate::core::event::{PasteEvent, TerminalEvent};
use crate::core::screen::Screen;
use crate::core::terminal::{Terminal, TerminalGuard};
use crate::error::{Error, Result};
use crate::runtime::wake::{AppHandle, EventSink, Next, Phase, Shared, SuspendFn, Update};

/// Owns the cell buffer and the component tree, and serializes terminal events,
/// programmatic updates and the redraw ticker into one ordered sequence of redraws.
///
/// Everything that touches the tree runs on the thread that called
/// [`Application::start`]. Other threads go through an [`AppHandle`].
pub struct Application<T: Terminal> {
    terminal: TerminalGuard<T>,
    buffer: CellBuffer,
    root: Option<Box<dyn Component>>,
    config: AppConfig,
    shared: Arc<Shared>,
    paste: Option<String>,
    clear_next: bool,
}

impl<T: Terminal> Application<T> {
    pub fn new(terminal: T) -> Self {
        Self::with_config(terminal, AppConfig::default())
    }

    pub fn with_config(terminal: T, config: AppConfig) -> Self {
        Self {
            terminal: TerminalGuard::new(terminal),
            buffer: CellBuffer::default(),
            root: None,
            shared: Shared::new(config.queue_capacity),
            config,
            paste: None,
            clear_next: true,
        }
    }

    pub fn handle(&self) -> AppHandle {
        AppHandle::new(Arc::clone(&self.shared))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn set_redraw_interval(&mut self, interval: Duration) {
        self.config.redraw_interval = interval;
    }

    pub fn set_clear_always(&mut self, clear_always: bool) {
        self.config.clear_always = clear_always;
    }

    /// Install `root`, focusing it and forcing a full clear on the next redraw.
    pub fn set_root(&mut self, mut root: Box<dyn Component>) {
        component::focus(root.as_mut());
        self.root = Some(root);
        self.clear_next = true;
    }

    pub fn root_mut(&mut self) -> Option<&mut (dyn Component + 'static)> {
        self.root.as_deref_mut()
    }

    /// The most recently drawn frame.
    pub fn buffer(&self) -> &CellBuffer {
        &self.buffer
    }

    pub fn terminal(&self) -> &T {
        self.terminal.terminal()
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        self.terminal.terminal_mut()
    }

    /// Acquire the terminal and run the loop until stopped.
    ///
    /// Fails without starting when no root is set or the loop is already running.
    /// The terminal is released on every exit path before this returns.
    pub fn start(&mut self) -> Result<()> {
        if self.root.is_none() {
            return Err(Error::NoRoot);
        }
        self.shared.begin()?;
        info!("application starting");

        #[cfg(unix)]
        let _signals = if self.config.handle_signals {
            match crate::platform::install_signal_handlers(self.handle()) {
                Ok(guard) => Some(guard),
                Err(err) => {
                    warn!(%err, "failed to install signal handlers");
                    None
                }
            }
        } else {
            None
        };

        if let Err(err) = self
            .terminal
            .start(EventSink::new(Arc::clone(&self.shared)))
        {
            error!(%err, "terminal initialization failed");
            self.shared.finish();
            return Err(Error::TerminalInit(err));
        }
        self.shared.set_attached(true);
        self.sync_size();
        self.redraw();

        let outcome = self.run();

        self.shared.close_events();
        let restored = self.terminal.stop();
        self.paste = None;
        self.shared.finish();
        info!("application stopped");

        outcome?;
        restored.map_err(|err| {
            error!(%err, "terminal teardown failed");
            Error::TerminalRestore(err)
        })
    }

    /// Next ticker deadline; `None` when the interval is too large to represent.
    fn next_tick(&self) -> Option<Instant> {
        Instant::now().checked_add(self.config.redraw_interval)
    }

    fn run(&mut self) -> Result<()> {
        let mut deadline = self.next_tick();
        loop {
            match self.shared.next(deadline) {
                Next::Stop => return Ok(()),
                Next::Tick => {
                    deadline = self.next_tick();
                    self.redraw();
                }
                Next::Event(event) => {
                    if !self.handle_event(event) {
                        return Ok(());
                    }
                }
                Next::Update(update) => self.apply_update(update)?,
            }
        }
    }

    /// Dispatch one terminal event. Returns `false` when the source has closed.
    fn handle_event(&mut self, event: TerminalEvent) -> bool {
        let handled = match event {
            TerminalEvent::Key(key) => {
                if let Some(paste) = self.paste.as_mut() {
                    if let Some(ch) = key.text() {
                        paste.push(ch);
                    }
                    return true;
                }
                self.root
                    .as_mut()
                    .is_some_and(|root| root.on_key_event(&key))
            }
            TerminalEvent::PasteStart => {
                self.paste = Some(String::new());
                false
            }
            TerminalEvent::PasteEnd => match self.paste.take() {
                Some(text) => {
                    let event = PasteEvent::new(text);
                    self.root
                        .as_mut()
                        .is_some_and(|root| root.on_paste_event(&event))
                }
                None => {
                    debug!("paste end without paste start ignored");
                    false
                }
            },
            TerminalEvent::Mouse(mouse) => self
                .root
                .as_mut()
                .is_some_and(|root| root.on_mouse_event(&mouse)),
            TerminalEvent::Resize { width, height } => {
                debug!(width, height, "terminal resized");
                self.buffer.resize(width, height);
                self.clear_next = true;
                true
            }
            TerminalEvent::Closed => {
                info!("event source closed");
                return false;
            }
        };
        if handled {
            self.redraw();
        }
        true
    }

    fn apply_update(&mut self, update: Update) -> Result<()> {
        match update {
            Update::Redraw => self.redraw(),
            Update::SetRoot(factory) => {
                self.set_root(factory());
                info!("root component replaced");
                self.redraw();
            }
            Update::Apply { apply, redraw } => {
                if let Some(root) = self.root.as_mut() {
                    apply(root.as_mut());
                }
                if redraw {
                    self.redraw();
                }
            }
            Update::Suspend { action, done } => match self.suspend(action) {
                Ok(()) => {
                    let _ = done.send(Ok(()));
                }
                Err(err) => {
                    error!(%err, "failed to resume terminal");
                    let copy = io::Error::new(err.kind(), err.to_string());
                    let _ = done.send(Err(Error::TerminalResume(copy)));
                    return Err(Error::TerminalResume(err));
                }
            },
        }
        Ok(())
    }

    fn suspend(&mut self, action: SuspendFn) -> io::Result<()> {
        self.shared.set_phase(Phase::Suspended);
        self.shared.close_events();
        self.paste = None;
        if let Err(err) = self.terminal.stop() {
            warn!(%err, "terminal teardown before suspend failed");
        }
        self.shared.set_attached(false);
        info!("suspended");

        action();

        self.shared.open_events();
        self.terminal
            .start(EventSink::new(Arc::clone(&self.shared)))?;
        self.shared.set_attached(true);
        self.shared.set_phase(Phase::Running);
        info!("resumed");
        self.sync_size();
        self.redraw();
        Ok(())
    }

    fn sync_size(&mut self) {
        let (width, height) = self.terminal.terminal().size();
        self.buffer.resize(width, height);
        self.clear_next = true;
    }

    fn redraw(&mut self) {
        let Some(root) = self.root.as_mut() else {
            return;
        };
        self.buffer.hide_cursor();
        if self.clear_next || self.config.clear_always {
            self.buffer.clear();
            self.clear_next = false;
        }
        root.draw(&mut self.buffer);
        if let Err(err) = self.terminal.terminal_mut().flush(&self.buffer) {
            warn!(%err, "flush failed");
        }
    }
}

impl<T: Terminal> Drop for Application<T> {
    fn drop(&mut self) {
        if self.shared.phase() != Phase::Stopped {
            self.shared.close_events();
            let _ = self.terminal.stop();
            self.shared.finish();
        }
    }
}
