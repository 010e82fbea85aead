//! Cell surface contract.

use unicode_width::UnicodeWidthChar;

use crate::core::style::Style;

/// One character cell: a base character, optional combining characters, and a style.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub combining: Vec<char>,
    pub style: Style,
}

impl Cell {
    pub fn new(ch: char, style: Style) -> Self {
        Self {
            ch,
            combining: Vec::new(),
            style,
        }
    }

    /// Display width of the base character (0 for control characters).
    pub fn width(&self) -> usize {
        UnicodeWidthChar::width(self.ch).unwrap_or(0)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(' ', Style::default())
    }
}

/// A rectangular grid of styled character cells.
///
/// Coordinates are signed so that callers can compute offsets freely; implementations
/// drop writes that fall outside `0 <= x < width, 0 <= y < height` instead of panicking.
pub trait Screen {
    /// Current `(width, height)` in cells.
    fn size(&self) -> (i32, i32);

    fn set_content(&mut self, x: i32, y: i32, ch: char, combining: &[char], style: Style);

    /// Read back a cell, or `None` when the coordinate is outside the surface.
    fn get_content(&self, x: i32, y: i32) -> Option<Cell>;

    /// Fill every cell of the surface with `ch` in `style`.
    fn fill(&mut self, ch: char, style: Style);

    /// Fill with blanks in the current style (see [`Screen::set_style`]).
    fn clear(&mut self);

    /// Set the style used by [`Screen::clear`].
    fn set_style(&mut self, style: Style);

    fn show_cursor(&mut self, x: i32, y: i32);

    fn hide_cursor(&mut self);

    fn set_cell(&mut self, x: i32, y: i32, style: Style, ch: char) {
        self.set_content(x, y, ch, &[], style);
    }
}
