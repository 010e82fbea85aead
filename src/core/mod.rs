//! Core contracts and primitives: cells, clipping, events, components, layout and focus.

pub mod buffer;
pub mod child;
pub mod component;
pub mod event;
pub mod focus;
pub mod proxy;
pub mod screen;
pub mod sizing;
pub mod style;
pub mod terminal;
pub mod text;
pub mod theme;
