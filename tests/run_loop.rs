use std::io;
use std::sync::{Arc, Barrier, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use pretty_assertions::assert_eq;
use tile_tui::{
    AppConfig, AppHandle, Application, CellBuffer, Component, Error, EventSink, KeyEvent,
    PasteEvent, Phase, Screen, Terminal, TerminalEvent,
};

#[derive(Default)]
struct Counters {
    starts: usize,
    stops: usize,
    flushes: usize,
}

struct FakeTerminal {
    counters: Arc<Mutex<Counters>>,
    script: Vec<TerminalEvent>,
    close_after_script: bool,
    fail_start: Option<usize>,
    size: (u16, u16),
}

impl FakeTerminal {
    fn new(counters: &Arc<Mutex<Counters>>) -> Self {
        Self {
            counters: Arc::clone(counters),
            script: Vec::new(),
            close_after_script: false,
            fail_start: None,
            size: (6, 2),
        }
    }

    fn scripted(counters: &Arc<Mutex<Counters>>, script: Vec<TerminalEvent>) -> Self {
        Self {
            script,
            close_after_script: true,
            ..Self::new(counters)
        }
    }
}

impl Terminal for FakeTerminal {
    fn start(&mut self, events: EventSink) -> io::Result<()> {
        let starts = {
            let mut counters = self.counters.lock().expect("counters");
            counters.starts += 1;
            counters.starts
        };
        if self.fail_start == Some(starts) {
            return Err(io::Error::other("no terminal"));
        }
        for event in self.script.drain(..) {
            events.send(event);
        }
        if self.close_after_script {
            events.send(TerminalEvent::Closed);
        }
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        self.counters.lock().expect("counters").stops += 1;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        self.size
    }

    fn flush(&mut self, _frame: &CellBuffer) -> io::Result<()> {
        self.counters.lock().expect("counters").flushes += 1;
        Ok(())
    }
}

/// Starts a reader thread that sends keys as fast as the queue accepts them.
struct FloodTerminal {
    counters: Arc<Mutex<Counters>>,
    refused: Arc<Mutex<usize>>,
    reader: Option<JoinHandle<()>>,
}

impl FloodTerminal {
    fn new(counters: &Arc<Mutex<Counters>>) -> Self {
        Self {
            counters: Arc::clone(counters),
            refused: Arc::default(),
            reader: None,
        }
    }
}

impl Terminal for FloodTerminal {
    fn start(&mut self, events: EventSink) -> io::Result<()> {
        self.counters.lock().expect("counters").starts += 1;
        let refused = Arc::clone(&self.refused);
        self.reader = Some(thread::spawn(move || {
            while events.send(TerminalEvent::Key(KeyEvent::char('k'))) {}
            *refused.lock().expect("refused") += 1;
        }));
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        if let Some(reader) = self.reader.take() {
            reader
                .join()
                .map_err(|_| io::Error::other("reader panicked"))?;
        }
        self.counters.lock().expect("counters").stops += 1;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        (6, 2)
    }

    fn flush(&mut self, _frame: &CellBuffer) -> io::Result<()> {
        self.counters.lock().expect("counters").flushes += 1;
        Ok(())
    }
}

/// Requests a stop from inside its key handler.
struct StopOnKey {
    handle: AppHandle,
}

impl Component for StopOnKey {
    fn draw(&mut self, screen: &mut dyn Screen) {
        screen.set_cell(0, 0, Default::default(), 'q');
    }

    fn on_key_event(&mut self, _event: &KeyEvent) -> bool {
        self.handle.request_stop();
        false
    }
}

/// Draws `label` at the origin and records the events it receives.
struct Label {
    label: char,
    keys: Arc<Mutex<Vec<KeyEvent>>>,
    pastes: Arc<Mutex<Vec<String>>>,
}

impl Label {
    fn new(label: char) -> Self {
        Self {
            label,
            keys: Arc::default(),
            pastes: Arc::default(),
        }
    }
}

impl Component for Label {
    fn draw(&mut self, screen: &mut dyn Screen) {
        screen.set_cell(0, 0, Default::default(), self.label);
    }

    fn on_key_event(&mut self, event: &KeyEvent) -> bool {
        self.keys.lock().expect("keys").push(*event);
        true
    }

    fn on_paste_event(&mut self, event: &PasteEvent) -> bool {
        self.pastes.lock().expect("pastes").push(event.text.clone());
        true
    }
}

fn quiet() -> AppConfig {
    AppConfig::default().handle_signals(false)
}

fn wait_until(mut ready: impl FnMut() -> bool) {
    for _ in 0..5_000 {
        if ready() {
            return;
        }
        thread::sleep(Duration::from_millis(1));
    }
    panic!("condition not reached in time");
}

fn counts(counters: &Arc<Mutex<Counters>>) -> (usize, usize) {
    let counters = counters.lock().expect("counters");
    (counters.starts, counters.stops)
}

#[test]
fn start_without_root_fails_before_touching_terminal() {
    let counters = Arc::new(Mutex::new(Counters::default()));
    let mut app = Application::with_config(FakeTerminal::new(&counters), quiet());
    assert!(matches!(app.start(), Err(Error::NoRoot)));
    assert_eq!(counts(&counters), (0, 0));
    assert_eq!(app.handle().phase(), Phase::Stopped);
}

#[test]
fn stop_from_two_threads_tears_down_once() {
    let counters = Arc::new(Mutex::new(Counters::default()));
    let mut app = Application::with_config(FakeTerminal::new(&counters), quiet());
    app.set_root(Box::new(Label::new('x')));

    let barrier = Arc::new(Barrier::new(2));
    let stoppers: Vec<_> = (0..2)
        .map(|_| {
            let handle = app.handle();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                wait_until(|| handle.is_running());
                barrier.wait();
                handle.stop();
                handle.phase()
            })
        })
        .collect();

    app.start().expect("run");
    for stopper in stoppers {
        assert_eq!(stopper.join().expect("stopper"), Phase::Stopped);
    }
    assert_eq!(counts(&counters), (1, 1));

    drop(app);
    assert_eq!(counts(&counters), (1, 1));
}

#[test]
fn closed_event_source_ends_the_loop() {
    let counters = Arc::new(Mutex::new(Counters::default()));
    let terminal = FakeTerminal::scripted(
        &counters,
        vec![
            TerminalEvent::Key(KeyEvent::char('a')),
            TerminalEvent::PasteEnd,
            TerminalEvent::PasteStart,
            TerminalEvent::Key(KeyEvent::char('o')),
            TerminalEvent::Key(KeyEvent::char('k')),
            TerminalEvent::PasteEnd,
        ],
    );
    let mut app = Application::with_config(terminal, quiet());
    let root = Label::new('x');
    let keys = Arc::clone(&root.keys);
    let pastes = Arc::clone(&root.pastes);
    app.set_root(Box::new(root));

    app.start().expect("run");

    assert_eq!(*keys.lock().expect("keys"), vec![KeyEvent::char('a')]);
    assert_eq!(*pastes.lock().expect("pastes"), vec!["ok".to_string()]);
    assert_eq!(counts(&counters), (1, 1));
    // Initial frame, the key and the paste.
    assert_eq!(counters.lock().expect("counters").flushes, 3);
    assert!(!app.handle().is_running());
}

#[test]
fn resize_reallocates_and_clears_the_buffer() {
    let counters = Arc::new(Mutex::new(Counters::default()));
    let terminal = FakeTerminal::scripted(
        &counters,
        vec![TerminalEvent::Resize {
            width: 3,
            height: 2,
        }],
    );
    let mut app = Application::with_config(terminal, quiet());
    app.set_root(Box::new(Label::new('r')));
    app.start().expect("run");
    assert_eq!(app.buffer().lines(), vec!["r  ", "   "]);
}

#[test]
fn updates_run_on_the_loop_in_order() {
    let counters = Arc::new(Mutex::new(Counters::default()));
    let mut app = Application::with_config(FakeTerminal::new(&counters), quiet());
    let root = Label::new('x');
    let keys = Arc::clone(&root.keys);
    app.set_root(Box::new(root));

    let handle = app.handle();
    let driver = thread::spawn(move || {
        wait_until(|| handle.is_running());
        assert!(handle.queue_update(|root| {
            root.on_key_event(&KeyEvent::char('1'));
        }));
        assert!(handle.set_root(|| Box::new(Label::new('N')) as Box<dyn Component>));
        let stopper: AppHandle = handle.clone();
        assert!(handle.queue_update_draw(move |root| {
            root.on_key_event(&KeyEvent::char('2'));
            stopper.request_stop();
        }));
    });

    app.start().expect("run");
    driver.join().expect("driver");

    // The second key went to the replacement root.
    assert_eq!(*keys.lock().expect("keys"), vec![KeyEvent::char('1')]);
    assert_eq!(app.buffer().line(0), "N     ");
}

#[test]
fn suspend_releases_and_reacquires_the_terminal() {
    let counters = Arc::new(Mutex::new(Counters::default()));
    let mut app = Application::with_config(FakeTerminal::new(&counters), quiet());
    app.set_root(Box::new(Label::new('s')));

    let handle = app.handle();
    let observed = Arc::new(Mutex::new(None));
    let seen = Arc::clone(&observed);
    let tally = Arc::clone(&counters);
    let driver = thread::spawn(move || {
        wait_until(|| handle.is_attached());
        let resumed = handle.suspend(move || {
            *seen.lock().expect("seen") = Some(counts(&tally));
        });
        let attached = handle.is_attached();
        handle.stop();
        (resumed.ok(), attached)
    });

    app.start().expect("run");
    let (resumed, attached) = driver.join().expect("driver");

    assert_eq!(resumed, Some(true));
    assert!(attached);
    // While suspended the terminal had been started once and stopped once.
    assert_eq!(*observed.lock().expect("observed"), Some((1, 1)));
    assert_eq!(counts(&counters), (2, 2));
}

#[test]
fn failed_resume_is_reported_to_both_sides() {
    let counters = Arc::new(Mutex::new(Counters::default()));
    let mut terminal = FakeTerminal::new(&counters);
    terminal.fail_start = Some(2);
    let mut app = Application::with_config(terminal, quiet());
    app.set_root(Box::new(Label::new('s')));

    let handle = app.handle();
    let driver = thread::spawn(move || {
        wait_until(|| handle.is_attached());
        matches!(handle.suspend(|| {}), Err(Error::TerminalResume(_)))
    });

    let outcome = app.start();
    assert!(driver.join().expect("driver"));
    assert!(matches!(outcome, Err(Error::TerminalResume(_))));
    assert!(!app.handle().is_running());
    assert!(!app.handle().is_attached());
}

#[test]
fn terminal_init_failure_is_torn_down_and_reported() {
    let counters = Arc::new(Mutex::new(Counters::default()));
    let mut terminal = FakeTerminal::new(&counters);
    terminal.fail_start = Some(1);
    let mut app = Application::with_config(terminal, quiet());
    app.set_root(Box::new(Label::new('x')));

    assert!(matches!(app.start(), Err(Error::TerminalInit(_))));
    assert_eq!(counts(&counters), (1, 1));
    assert_eq!(app.handle().phase(), Phase::Stopped);
}

#[test]
fn ticker_redraws_periodically() {
    let counters = Arc::new(Mutex::new(Counters::default()));
    let config = quiet().redraw_interval(Duration::from_millis(5));
    let mut app = Application::with_config(FakeTerminal::new(&counters), config);
    app.set_root(Box::new(Label::new('t')));

    let handle = app.handle();
    let tally = Arc::clone(&counters);
    let driver = thread::spawn(move || {
        wait_until(|| tally.lock().expect("counters").flushes >= 4);
        handle.stop();
    });

    app.start().expect("run");
    driver.join().expect("driver");
    assert!(counters.lock().expect("counters").flushes >= 4);
}

#[test]
fn stop_from_a_handler_releases_a_blocked_reader() {
    let counters = Arc::new(Mutex::new(Counters::default()));
    let terminal = FloodTerminal::new(&counters);
    let refused = Arc::clone(&terminal.refused);
    let mut app = Application::with_config(terminal, quiet().queue_capacity(2));
    let handle = app.handle();
    app.set_root(Box::new(StopOnKey { handle }));

    app.start().expect("run");

    assert_eq!(counts(&counters), (1, 1));
    assert_eq!(*refused.lock().expect("refused"), 1);
    assert_eq!(app.handle().phase(), Phase::Stopped);
}

#[test]
fn suspend_and_stop_with_a_flooding_reader() {
    let counters = Arc::new(Mutex::new(Counters::default()));
    let terminal = FloodTerminal::new(&counters);
    let refused = Arc::clone(&terminal.refused);
    let mut app = Application::with_config(terminal, quiet().queue_capacity(2));
    let root = Label::new('f');
    let keys = Arc::clone(&root.keys);
    app.set_root(Box::new(root));

    let handle = app.handle();
    let seen = Arc::clone(&keys);
    let driver = thread::spawn(move || {
        wait_until(|| !seen.lock().expect("keys").is_empty());
        let resumed = handle.suspend(|| {}).ok();
        handle.stop();
        resumed
    });

    app.start().expect("run");

    assert_eq!(driver.join().expect("driver"), Some(true));
    assert_eq!(counts(&counters), (2, 2));
    assert_eq!(*refused.lock().expect("refused"), 2);
    assert!(!keys.lock().expect("keys").is_empty());
}
