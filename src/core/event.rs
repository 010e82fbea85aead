//! Decoded input events.
//!
//! The terminal driver decodes raw bytes; the types here are what the core consumes.
//! `TerminalEvent` is the tagged stream fed into the run loop, and the key/mouse/paste
//! structs are what components receive.

use bitflags::bitflags;

bitflags! {
    /// Keyboard modifiers held during a key or mouse event.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const META = 1 << 3;
    }
}

bitflags! {
    /// Mouse buttons (and wheel directions) pressed during a mouse event.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct MouseButtons: u8 {
        const PRIMARY = 1 << 0;
        const SECONDARY = 1 << 1;
        const MIDDLE = 1 << 2;
        const WHEEL_UP = 1 << 3;
        const WHEEL_DOWN = 1 << 4;
        const WHEEL_LEFT = 1 << 5;
        const WHEEL_RIGHT = 1 << 6;
    }
}

/// Symbolic key identity.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Insert,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::empty())
    }

    pub fn char(ch: char) -> Self {
        Self::plain(Key::Char(ch))
    }

    /// The text this key contributes when it arrives inside a bracketed paste.
    pub fn text(&self) -> Option<char> {
        match self.key {
            Key::Char(ch) => Some(ch),
            Key::Enter => Some('\n'),
            Key::Tab => Some('\t'),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct MouseEvent {
    pub x: i32,
    pub y: i32,
    pub buttons: MouseButtons,
    pub modifiers: Modifiers,
    /// Whether the pointer moved (drag or hover) rather than a button changing state.
    pub motion: bool,
}

impl MouseEvent {
    pub fn new(x: i32, y: i32, buttons: MouseButtons, modifiers: Modifiers, motion: bool) -> Self {
        Self {
            x,
            y,
            buttons,
            modifiers,
            motion,
        }
    }

    /// A stationary primary-button press at `(x, y)`.
    pub fn click(x: i32, y: i32) -> Self {
        Self::new(x, y, MouseButtons::PRIMARY, Modifiers::empty(), false)
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Exactly the primary button, without motion: the gesture that moves focus.
    pub fn is_primary_click(&self) -> bool {
        self.buttons == MouseButtons::PRIMARY && !self.motion
    }

    /// The same event shifted by `(dx, dy)`.
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct PasteEvent {
    pub text: String,
}

impl PasteEvent {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// One item of the decoded terminal event stream.
///
/// Bracketed paste arrives as `PasteStart`, the pasted characters as `Key` events,
/// then `PasteEnd`; the run loop folds these into a single [`PasteEvent`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TerminalEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    PasteStart,
    PasteEnd,
    Resize { width: u16, height: u16 },
    /// The source has shut down; no further events will follow.
    Closed,
}
