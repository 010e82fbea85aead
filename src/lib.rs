//! Composable terminal UI substrate.
//!
//! Invariant: every draw goes through a [`Screen`]; containers hand their children a
//! clipped [`ProxyScreen`] so no child can write outside its assigned rectangle.
//!
//! # Public API Overview
//! - Implement [`Component`] (and optionally [`Focusable`]) for leaf widgets.
//! - Compose them with the containers in [`widgets`]: [`Box`], [`Flex`], [`Grid`],
//!   [`Form`] and [`Center`].
//! - Drive a tree with [`Application`] over a [`Terminal`] such as
//!   [`CrosstermTerminal`], and talk to the running loop from other threads through
//!   an [`AppHandle`].

#![allow(
    clippy::derivable_impls,
    clippy::new_without_default,
    clippy::type_complexity,
    clippy::unnecessary_map_or
)]

pub mod config;
pub mod error;
pub mod logging;

pub mod core;
pub mod platform;
pub mod runtime;
pub mod widgets;

/// Component contract and focus helpers.
pub use crate::core::component::{blur, focus, Component, EventHandler, Focusable, FormItem};
/// Stable identifiers for container children.
pub use crate::core::child::ChildId;
/// Decoded input events.
pub use crate::core::event::{
    Key, KeyEvent, Modifiers, MouseButtons, MouseEvent, PasteEvent, TerminalEvent,
};
/// Cell surfaces and clipping.
pub use crate::core::buffer::CellBuffer;
pub use crate::core::proxy::{ProxyScreen, Region};
pub use crate::core::screen::{Cell, Screen};
/// Layout sizing.
pub use crate::core::sizing::Sizing;
/// Styling and theme.
pub use crate::core::style::{Attributes, Color, Style};
pub use crate::core::theme::{BorderGlyphs, BorderSet, Theme};
/// Text output helpers.
pub use crate::core::text::width::string_width;
pub use crate::core::text::{print, Align};
/// Terminal interfaces and crossterm-backed implementation.
pub use crate::core::terminal::{Terminal, TerminalGuard};
pub use crate::platform::CrosstermTerminal;

/// Run loop.
pub use crate::config::{AppConfig, EnvConfig};
pub use crate::error::{Error, Result};
pub use crate::runtime::{AppHandle, Application, EventSink, Phase};

/// Built-in containers and widgets.
pub use crate::widgets::{
    Box, Button, Center, Direction, Flex, Form, FractionalCenter, Grid, GridCell, ProgressBar,
    ProgressHandle, TextField,
};

/// Returns whether a component exposes focus behavior via [`Focusable`].
pub fn is_focusable(component: &mut dyn Component) -> bool {
    component.as_focusable().is_some()
}
