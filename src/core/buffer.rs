//! In-memory cell surface owned by the run loop.

use crate::core::screen::{Cell, Screen};
use crate::core::style::Style;

/// A `width x height` grid of cells plus cursor state.
///
/// The run loop draws the component tree into a `CellBuffer` and hands the finished
/// frame to the [`Terminal`](crate::core::terminal::Terminal) for output.
#[derive(Clone, Debug, Default)]
pub struct CellBuffer {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    style: Style,
    cursor: Option<(i32, i32)>,
}

/// Number of cells in a `width x height` grid.
fn area(width: u16, height: u16) -> usize {
    usize::from(width) * usize::from(height)
}

impl CellBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: i32::from(width),
            height: i32::from(height),
            cells: vec![Cell::default(); area(width, height)],
            style: Style::default(),
            cursor: None,
        }
    }

    /// Replace the grid with a blank one of the new size.
    pub fn resize(&mut self, width: u16, height: u16) {
        let style = self.style;
        *self = Self::new(width, height);
        self.style = style;
    }

    pub fn width(&self) -> u16 {
        self.width as u16
    }

    pub fn height(&self) -> u16 {
        self.height as u16
    }

    /// Cursor position, if a component asked for it to be shown.
    pub fn cursor(&self) -> Option<(i32, i32)> {
        self.cursor
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|idx| &self.cells[idx])
    }

    /// Row `y` as a string of base characters; empty when out of range.
    pub fn line(&self, y: i32) -> String {
        if y < 0 || y >= self.height {
            return String::new();
        }
        let width = self.width as usize;
        let start = y as usize * width;
        let end = start + width;
        self.cells[start..end].iter().map(|cell| cell.ch).collect()
    }

    /// Every row, see [`CellBuffer::line`].
    pub fn lines(&self) -> Vec<String> {
        (0..self.height).map(|y| self.line(y)).collect()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

impl Screen for CellBuffer {
    fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn set_content(&mut self, x: i32, y: i32, ch: char, combining: &[char], style: Style) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let cell = &mut self.cells[idx];
        cell.ch = ch;
        cell.combining.clear();
        cell.combining.extend_from_slice(combining);
        cell.style = style;
    }

    fn get_content(&self, x: i32, y: i32) -> Option<Cell> {
        self.cell(x, y).cloned()
    }

    fn fill(&mut self, ch: char, style: Style) {
        for cell in self.cells.iter_mut() {
            cell.ch = ch;
            cell.combining.clear();
            cell.style = style;
        }
    }

    fn clear(&mut self) {
        self.fill(' ', self.style);
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    fn show_cursor(&mut self, x: i32, y: i32) {
        if self.index(x, y).is_some() {
            self.cursor = Some((x, y));
        }
    }

    fn hide_cursor(&mut self) {
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{area, CellBuffer};
    use crate::core::screen::Screen;
    use crate::core::style::{Color, Style};

    #[test]
    fn area_covers_the_largest_terminal() {
        assert_eq!(area(u16::MAX, u16::MAX), 65_535 * 65_535);
        assert_eq!(area(0, u16::MAX), 0);

        let mut tall = CellBuffer::new(2, u16::MAX);
        tall.set_cell(1, i32::from(u16::MAX) - 1, Style::default(), 'z');
        assert_eq!(tall.line(i32::from(u16::MAX) - 1), " z");
    }

    #[test]
    fn out_of_range_writes_are_dropped() {
        let mut buffer = CellBuffer::new(3, 2);
        buffer.set_cell(-1, 0, Style::default(), 'x');
        buffer.set_cell(3, 0, Style::default(), 'x');
        buffer.set_cell(0, 2, Style::default(), 'x');
        buffer.set_cell(2, 1, Style::default(), 'y');
        assert_eq!(buffer.lines(), vec!["   ", "  y"]);
        assert!(buffer.get_content(5, 5).is_none());
    }

    #[test]
    fn clear_uses_current_style() {
        let mut buffer = CellBuffer::new(2, 1);
        buffer.set_cell(0, 0, Style::default(), 'a');
        let style = Style::new().background(Color::BLUE);
        buffer.set_style(style);
        buffer.clear();
        assert_eq!(buffer.line(0), "  ");
        assert_eq!(buffer.cell(1, 0).map(|cell| cell.style), Some(style));
    }

    #[test]
    fn combining_characters_are_stored() {
        let mut buffer = CellBuffer::new(1, 1);
        buffer.set_content(0, 0, 'e', &['\u{301}'], Style::default());
        let cell = buffer.get_content(0, 0).expect("cell in range");
        assert_eq!(cell.ch, 'e');
        assert_eq!(cell.combining, vec!['\u{301}']);
    }

    #[test]
    fn cursor_is_tracked_and_bounds_checked() {
        let mut buffer = CellBuffer::new(4, 4);
        buffer.show_cursor(1, 2);
        assert_eq!(buffer.cursor(), Some((1, 2)));
        buffer.show_cursor(9, 9);
        assert_eq!(buffer.cursor(), Some((1, 2)));
        buffer.hide_cursor();
        assert_eq!(buffer.cursor(), None);
    }

    #[test]
    fn zero_sized_buffer_accepts_everything() {
        let mut buffer = CellBuffer::new(0, 0);
        buffer.set_cell(0, 0, Style::default(), 'x');
        buffer.clear();
        assert!(buffer.lines().is_empty());
    }
}
