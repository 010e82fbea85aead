//! Crossterm-backed terminal driver.

use std::io::{self, Write};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self as ct, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
    EnableMouseCapture, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use crossterm::style::{
    Attribute, Color as CtColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::terminal::{
    self as ct_terminal, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use tracing::{debug, trace, warn};

use crate::core::buffer::CellBuffer;
use crate::core::event::{Key, KeyEvent, Modifiers, MouseButtons, MouseEvent, TerminalEvent};
use crate::core::screen::Cell;
use crate::core::style::{Attributes, Color, Style};
use crate::core::terminal::Terminal;
use crate::runtime::wake::EventSink;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const FALLBACK_SIZE: (u16, u16) = (80, 24);

static PANIC_HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);
static TERMINAL_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Drives the process terminal: raw mode, alternate screen, mouse capture and
/// bracketed paste while started, with a reader thread decoding input events.
pub struct CrosstermTerminal {
    reader: Option<Reader>,
    previous: Option<CellBuffer>,
}

struct Reader {
    stop: Arc<AtomicBool>,
    thread: JoinHandle<()>,
}

impl CrosstermTerminal {
    pub fn new() -> Self {
        Self {
            reader: None,
            previous: None,
        }
    }
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for CrosstermTerminal {
    fn start(&mut self, events: EventSink) -> io::Result<()> {
        install_panic_hook();
        ct_terminal::enable_raw_mode()?;
        TERMINAL_ACTIVE.store(true, Ordering::SeqCst);
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste,
            Hide,
            Clear(ClearType::All)
        )?;
        self.previous = None;

        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let thread = thread::Builder::new()
            .name("tile-input".to_string())
            .spawn(move || read_events(events, thread_stop))?;
        self.reader = Some(Reader { stop, thread });
        debug!("terminal attached");
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        if let Some(reader) = self.reader.take() {
            reader.stop.store(true, Ordering::SeqCst);
            if reader.thread.join().is_err() {
                warn!("input reader thread panicked");
            }
        }
        self.previous = None;
        let result = restore_terminal();
        debug!("terminal released");
        result
    }

    fn size(&self) -> (u16, u16) {
        ct_terminal::size().unwrap_or(FALLBACK_SIZE)
    }

    fn flush(&mut self, frame: &CellBuffer) -> io::Result<()> {
        let mut out = io::stdout().lock();
        let full = match &self.previous {
            Some(previous) => {
                previous.width() != frame.width() || previous.height() != frame.height()
            }
            None => true,
        };
        if full {
            queue!(out, ResetColor, Clear(ClearType::All))?;
        }

        let mut rows = 0;
        for y in 0..i32::from(frame.height()) {
            let changed = full
                || self
                    .previous
                    .as_ref()
                    .map_or(true, |previous| !rows_equal(previous, frame, y));
            if changed {
                write_row(&mut out, frame, y)?;
                rows += 1;
            }
        }

        match frame.cursor() {
            Some((x, y)) => queue!(out, MoveTo(x.max(0) as u16, y.max(0) as u16), Show)?,
            None => queue!(out, Hide)?,
        }
        out.flush()?;
        trace!(rows, "frame flushed");
        self.previous = Some(frame.clone());
        Ok(())
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        if self.reader.is_some() {
            let _ = Terminal::stop(self);
        }
    }
}

fn read_events(events: EventSink, stop: Arc<AtomicBool>) {
    while !stop.load(Ordering::SeqCst) {
        match ct::poll(POLL_INTERVAL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(err) => {
                warn!(%err, "input poll failed");
                events.send(TerminalEvent::Closed);
                return;
            }
        }
        let event = match ct::read() {
            Ok(event) => event,
            Err(err) => {
                warn!(%err, "input read failed");
                events.send(TerminalEvent::Closed);
                return;
            }
        };
        for event in convert_event(event) {
            if !events.send(event) {
                return;
            }
        }
    }
}

/// Translate one crossterm event into the run loop's event stream.
fn convert_event(event: ct::Event) -> Vec<TerminalEvent> {
    match event {
        ct::Event::Key(key) => convert_key(&key)
            .map(TerminalEvent::Key)
            .into_iter()
            .collect(),
        ct::Event::Mouse(mouse) => vec![TerminalEvent::Mouse(convert_mouse(&mouse))],
        ct::Event::Resize(width, height) => vec![TerminalEvent::Resize { width, height }],
        ct::Event::Paste(text) => {
            let mut out = Vec::with_capacity(text.chars().count() + 2);
            out.push(TerminalEvent::PasteStart);
            out.extend(text.chars().map(|ch| TerminalEvent::Key(KeyEvent::char(ch))));
            out.push(TerminalEvent::PasteEnd);
            out
        }
        ct::Event::FocusGained | ct::Event::FocusLost => Vec::new(),
    }
}

fn convert_modifiers(modifiers: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    if modifiers.contains(KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if modifiers.contains(KeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    if modifiers.contains(KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    if modifiers.intersects(KeyModifiers::META | KeyModifiers::SUPER) {
        out |= Modifiers::META;
    }
    out
}

/// Key releases and keys without a symbolic mapping yield `None`.
fn convert_key(event: &ct::KeyEvent) -> Option<KeyEvent> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let key = match event.code {
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Insert => Key::Insert,
        KeyCode::Esc => Key::Escape,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    };
    Some(KeyEvent::new(key, convert_modifiers(event.modifiers)))
}

fn convert_button(button: MouseButton) -> MouseButtons {
    match button {
        MouseButton::Left => MouseButtons::PRIMARY,
        MouseButton::Right => MouseButtons::SECONDARY,
        MouseButton::Middle => MouseButtons::MIDDLE,
    }
}

fn convert_mouse(event: &ct::MouseEvent) -> MouseEvent {
    let (buttons, motion) = match event.kind {
        MouseEventKind::Down(button) => (convert_button(button), false),
        MouseEventKind::Drag(button) => (convert_button(button), true),
        MouseEventKind::Up(_) => (MouseButtons::empty(), false),
        MouseEventKind::Moved => (MouseButtons::empty(), true),
        MouseEventKind::ScrollUp => (MouseButtons::WHEEL_UP, false),
        MouseEventKind::ScrollDown => (MouseButtons::WHEEL_DOWN, false),
        MouseEventKind::ScrollLeft => (MouseButtons::WHEEL_LEFT, false),
        MouseEventKind::ScrollRight => (MouseButtons::WHEEL_RIGHT, false),
    };
    MouseEvent::new(
        i32::from(event.column),
        i32::from(event.row),
        buttons,
        convert_modifiers(event.modifiers),
        motion,
    )
}

fn convert_color(color: Color) -> CtColor {
    match color {
        Color::Default => CtColor::Reset,
        Color::Indexed(index) => CtColor::AnsiValue(index),
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
    }
}

fn rows_equal(previous: &CellBuffer, frame: &CellBuffer, y: i32) -> bool {
    (0..i32::from(frame.width())).all(|x| previous.cell(x, y) == frame.cell(x, y))
}

fn write_row(out: &mut impl Write, frame: &CellBuffer, y: i32) -> io::Result<()> {
    queue!(out, MoveTo(0, y as u16))?;
    let mut current: Option<Style> = None;
    let mut skip = 0;
    for x in 0..i32::from(frame.width()) {
        let Some(cell) = frame.cell(x, y) else {
            continue;
        };
        if skip > 0 {
            skip -= 1;
            continue;
        }
        if current != Some(cell.style) {
            apply_style(out, cell.style)?;
            current = Some(cell.style);
        }
        queue!(out, Print(cell_text(cell)))?;
        skip = cell.width().saturating_sub(1);
    }
    queue!(out, SetAttribute(Attribute::Reset), ResetColor)
}

fn cell_text(cell: &Cell) -> String {
    let mut text = String::with_capacity(1 + cell.combining.len());
    text.push(if cell.ch.is_control() { ' ' } else { cell.ch });
    text.extend(cell.combining.iter());
    text
}

fn apply_style(out: &mut impl Write, style: Style) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(convert_color(style.fg)),
        SetBackgroundColor(convert_color(style.bg))
    )?;
    let attributes = [
        (Attributes::BOLD, Attribute::Bold),
        (Attributes::DIM, Attribute::Dim),
        (Attributes::ITALIC, Attribute::Italic),
        (Attributes::UNDERLINE, Attribute::Underlined),
        (Attributes::BLINK, Attribute::SlowBlink),
        (Attributes::REVERSE, Attribute::Reverse),
        (Attributes::STRIKETHROUGH, Attribute::CrossedOut),
    ];
    for (flag, attribute) in attributes {
        if style.attributes.contains(flag) {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    Ok(())
}

fn restore_terminal() -> io::Result<()> {
    if !TERMINAL_ACTIVE.swap(false, Ordering::SeqCst) {
        return Ok(());
    }
    let written = execute!(
        io::stdout(),
        ResetColor,
        Show,
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    );
    let raw = ct_terminal::disable_raw_mode();
    written.and(raw)
}

fn install_panic_hook() {
    if PANIC_HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        previous(info);
    }));
}
