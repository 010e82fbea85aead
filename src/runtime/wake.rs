//! Queues and handles shared between the run loop and other threads.
//!
//! Two bounded FIFO queues feed the loop: decoded terminal events and programmatic
//! updates. Producers block while their queue is full; nothing is ever dropped while
//! the loop is running. The loop waits on a condition variable with a timeout that
//! doubles as the redraw ticker.
//!
//! Lock order: `state` before `inbox`.

use std::collections::VecDeque;
use std::sync::mpsc::{self, SyncSender};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, ThreadId};
use std::time::Instant;

use crate::core::component::Component;
use crate::core::event::TerminalEvent;
use crate::error::{Error, Result};

pub type RootFactory = Box<dyn FnOnce() -> Box<dyn Component> + Send>;
pub type ApplyFn = Box<dyn FnOnce(&mut dyn Component) + Send>;
pub type SuspendFn = Box<dyn FnOnce() + Send>;

/// A request applied by the loop on its own turn.
pub(crate) enum Update {
    Redraw,
    SetRoot(RootFactory),
    Apply {
        apply: ApplyFn,
        redraw: bool,
    },
    Suspend {
        action: SuspendFn,
        done: SyncSender<Result<()>>,
    },
}

/// What the loop should do next.
pub(crate) enum Next {
    Event(TerminalEvent),
    Update(Update),
    Tick,
    Stop,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    Stopped,
    Running,
    Suspended,
}

#[derive(Default)]
struct Inbox {
    events: VecDeque<TerminalEvent>,
    updates: VecDeque<Update>,
    updates_turn: bool,
    open: bool,
    /// Event intake; closed while the terminal is released.
    events_open: bool,
    stop_requested: bool,
}

impl Inbox {
    fn pop(&mut self) -> Option<Next> {
        let next = if self.updates_turn {
            self.pop_update().or_else(|| self.pop_event())
        } else {
            self.pop_event().or_else(|| self.pop_update())
        };
        if let Some(item) = &next {
            self.updates_turn = matches!(item, Next::Event(_));
        }
        next
    }

    fn pop_event(&mut self) -> Option<Next> {
        self.events.pop_front().map(Next::Event)
    }

    fn pop_update(&mut self) -> Option<Next> {
        self.updates.pop_front().map(Next::Update)
    }
}

struct RunState {
    phase: Phase,
    attached: bool,
    loop_thread: Option<ThreadId>,
}

pub(crate) struct Shared {
    capacity: usize,
    inbox: Mutex<Inbox>,
    wake: Condvar,
    space: Condvar,
    state: Mutex<RunState>,
    exited: Condvar,
}

impl Shared {
    pub(crate) fn new(capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            capacity: capacity.max(1),
            inbox: Mutex::new(Inbox::default()),
            wake: Condvar::new(),
            space: Condvar::new(),
            state: Mutex::new(RunState {
                phase: Phase::Stopped,
                attached: false,
                loop_thread: None,
            }),
            exited: Condvar::new(),
        })
    }

    fn inbox(&self) -> MutexGuard<'_, Inbox> {
        match self.inbox.lock() {
            Ok(inbox) => inbox,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn state(&self) -> MutexGuard<'_, RunState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn on_loop_thread(&self) -> bool {
        self.state().loop_thread == Some(thread::current().id())
    }

    /// Mark the loop as running on the current thread and open the queues.
    pub(crate) fn begin(&self) -> Result<()> {
        let mut state = self.state();
        if state.phase != Phase::Stopped {
            return Err(Error::AlreadyRunning);
        }
        {
            let mut inbox = self.inbox();
            inbox.open = true;
            inbox.events_open = true;
            inbox.stop_requested = false;
            inbox.updates_turn = false;
        }
        state.phase = Phase::Running;
        state.loop_thread = Some(thread::current().id());
        Ok(())
    }

    /// Close the queues, drop anything still pending and wake every waiter.
    pub(crate) fn finish(&self) {
        let (events, updates) = {
            let mut inbox = self.inbox();
            inbox.open = false;
            inbox.events_open = false;
            (
                std::mem::take(&mut inbox.events),
                std::mem::take(&mut inbox.updates),
            )
        };
        self.space.notify_all();
        if !events.is_empty() || !updates.is_empty() {
            tracing::debug!(
                events = events.len(),
                updates = updates.len(),
                "dropping queued work after stop"
            );
        }
        drop(updates);

        let mut state = self.state();
        state.phase = Phase::Stopped;
        state.attached = false;
        state.loop_thread = None;
        self.exited.notify_all();
    }

    pub(crate) fn set_phase(&self, phase: Phase) {
        self.state().phase = phase;
    }

    pub(crate) fn phase(&self) -> Phase {
        self.state().phase
    }

    pub(crate) fn set_attached(&self, attached: bool) {
        self.state().attached = attached;
    }

    pub(crate) fn is_attached(&self) -> bool {
        self.state().attached
    }

    pub(crate) fn push_event(&self, event: TerminalEvent) -> bool {
        let mut inbox = self.inbox();
        while inbox.events_open && inbox.events.len() >= self.capacity {
            inbox = self
                .space
                .wait(inbox)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        if !inbox.events_open {
            return false;
        }
        inbox.events.push_back(event);
        self.wake.notify_one();
        true
    }

    pub(crate) fn push_update(&self, update: Update) -> bool {
        let on_loop = self.on_loop_thread();
        let mut inbox = self.inbox();
        while !on_loop && inbox.open && inbox.updates.len() >= self.capacity {
            inbox = self
                .space
                .wait(inbox)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        if !inbox.open {
            return false;
        }
        inbox.updates.push_back(update);
        self.wake.notify_one();
        true
    }

    /// Refuse further events, drop queued ones and release blocked producers.
    ///
    /// Must precede [`Terminal::stop`](crate::core::terminal::Terminal::stop), which
    /// joins the producer.
    pub(crate) fn close_events(&self) {
        let dropped = {
            let mut inbox = self.inbox();
            inbox.events_open = false;
            std::mem::take(&mut inbox.events).len()
        };
        self.space.notify_all();
        if dropped > 0 {
            tracing::debug!(dropped, "dropping queued events on terminal release");
        }
    }

    /// Accept events again after the terminal has been re-acquired.
    pub(crate) fn open_events(&self) {
        let mut inbox = self.inbox();
        inbox.events_open = inbox.open;
    }

    /// Ask the loop to exit without waiting for it.
    pub(crate) fn request_stop(&self) {
        let state = self.state();
        if state.phase == Phase::Stopped {
            return;
        }
        self.inbox().stop_requested = true;
        self.wake.notify_all();
    }

    /// Ask the loop to exit and wait until it has, unless called from the loop itself.
    pub(crate) fn stop(&self) {
        let mut state = self.state();
        if state.phase == Phase::Stopped {
            return;
        }
        self.inbox().stop_requested = true;
        self.wake.notify_all();

        if state.loop_thread == Some(thread::current().id()) {
            return;
        }
        while state.phase != Phase::Stopped {
            state = self
                .exited
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
    }

    /// Block until there is work, a stop request, or `deadline` passes.
    ///
    /// Without a deadline the wait only ends on work or a stop request.
    pub(crate) fn next(&self, deadline: Option<Instant>) -> Next {
        let mut inbox = self.inbox();
        loop {
            if inbox.stop_requested {
                return Next::Stop;
            }
            if let Some(next) = inbox.pop() {
                self.space.notify_all();
                return next;
            }
            let Some(deadline) = deadline else {
                inbox = self
                    .wake
                    .wait(inbox)
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                continue;
            };
            let now = Instant::now();
            if now >= deadline {
                return Next::Tick;
            }
            inbox = match self.wake.wait_timeout(inbox, deadline - now) {
                Ok((inbox, _)) => inbox,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
    }
}

/// Producer side of the event queue, handed to [`Terminal::start`].
///
/// [`Terminal::start`]: crate::core::terminal::Terminal::start
#[derive(Clone)]
pub struct EventSink {
    shared: Arc<Shared>,
}

impl EventSink {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// A sink not connected to any loop; every send is refused.
    pub fn detached() -> Self {
        Self::new(Shared::new(1))
    }

    /// Queue an event, blocking while the queue is full.
    ///
    /// Returns `false` once the loop has stopped; the producer should exit then.
    pub fn send(&self, event: TerminalEvent) -> bool {
        self.shared.push_event(event)
    }
}

/// Thread-safe handle for controlling a running [`Application`](crate::runtime::Application).
///
/// Requests are queued and applied by the loop on its own turn.
#[derive(Clone)]
pub struct AppHandle {
    shared: Arc<Shared>,
}

impl AppHandle {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// Request a redraw. Returns `false` if the loop is not running.
    pub fn redraw(&self) -> bool {
        self.shared.push_update(Update::Redraw)
    }

    /// Run `apply` against the root component on the loop thread.
    pub fn queue_update(&self, apply: impl FnOnce(&mut dyn Component) + Send + 'static) -> bool {
        self.shared.push_update(Update::Apply {
            apply: Box::new(apply),
            redraw: false,
        })
    }

    /// Like [`AppHandle::queue_update`], followed by a redraw.
    pub fn queue_update_draw(
        &self,
        apply: impl FnOnce(&mut dyn Component) + Send + 'static,
    ) -> bool {
        self.shared.push_update(Update::Apply {
            apply: Box::new(apply),
            redraw: true,
        })
    }

    /// Replace the root with the component built by `factory` on the loop thread.
    pub fn set_root(&self, factory: impl FnOnce() -> Box<dyn Component> + Send + 'static) -> bool {
        self.shared.push_update(Update::SetRoot(Box::new(factory)))
    }

    /// Release the terminal, run `action`, then re-acquire the terminal.
    ///
    /// Returns `Ok(false)` when no terminal is attached. Failing to re-acquire is
    /// fatal: the loop exits and the error is returned here as well as from
    /// [`Application::start`](crate::runtime::Application::start). Called from the
    /// loop thread, the suspend is queued and this returns without waiting.
    pub fn suspend(&self, action: impl FnOnce() + Send + 'static) -> Result<bool> {
        if !self.shared.is_attached() {
            return Ok(false);
        }
        let (done, result) = mpsc::sync_channel(1);
        let queued = self.shared.push_update(Update::Suspend {
            action: Box::new(action),
            done,
        });
        if !queued {
            return Ok(false);
        }
        if self.shared.on_loop_thread() {
            return Ok(true);
        }
        match result.recv() {
            Ok(Ok(())) => Ok(true),
            Ok(Err(err)) => Err(err),
            Err(_) => Ok(false),
        }
    }

    /// Stop the loop and wait until it has exited and released the terminal.
    ///
    /// Safe to call repeatedly and from several threads. From the loop thread this
    /// only requests the stop.
    pub fn stop(&self) {
        self.shared.stop();
    }

    /// Ask the loop to stop without waiting.
    pub fn request_stop(&self) {
        self.shared.request_stop();
    }

    pub fn is_attached(&self) -> bool {
        self.shared.is_attached()
    }

    pub fn phase(&self) -> Phase {
        self.shared.phase()
    }

    pub fn is_running(&self) -> bool {
        self.shared.phase() != Phase::Stopped
    }
}
