//! Clipping proxy: a translated, bounds-limited view onto a parent surface.
//!
//! Containers keep a [`Region`] per child (it survives between frames and is what mouse
//! hit-testing uses) and wrap their own surface in a [`ProxyScreen`] for that region on
//! every draw pass. Drawing and hit-testing therefore always agree on the rectangle.

use crate::core::event::MouseEvent;
use crate::core::screen::{Cell, Screen};
use crate::core::style::Style;

/// An offset + size rectangle in the parent's coordinate space.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn x_end(&self) -> i32 {
        self.x + self.width
    }

    pub fn y_end(&self) -> i32 {
        self.y + self.height
    }

    /// Whether a parent-space point lies inside the rectangle.
    ///
    /// Lower bounds are inclusive and upper bounds exclusive, so a point on the edge
    /// shared by two adjacent siblings belongs to the right/lower one.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x_end() && y >= self.y && y < self.y_end()
    }

    /// Re-express a parent-space mouse event in this region's local coordinates.
    pub fn to_local(&self, event: &MouseEvent) -> MouseEvent {
        event.offset(-self.x, -self.y)
    }

    fn contains_local(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }
}

/// A [`Screen`] restricted to a [`Region`] of its parent.
///
/// The parent is borrowed for one draw pass only. Every operation is bounds-checked
/// against the region's local rectangle before translation, so nothing outside the
/// region is ever touched.
pub struct ProxyScreen<'a> {
    parent: &'a mut dyn Screen,
    region: Region,
    style: Style,
}

impl<'a> ProxyScreen<'a> {
    pub fn new(parent: &'a mut dyn Screen, region: Region) -> Self {
        Self {
            parent,
            region,
            style: Style::default(),
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    fn to_parent(&self, x: i32, y: i32) -> Option<(i32, i32)> {
        if !self.region.contains_local(x, y) {
            return None;
        }
        Some((x + self.region.x, y + self.region.y))
    }
}

impl Screen for ProxyScreen<'_> {
    /// The configured size, reduced to what actually fits in the parent.
    fn size(&self) -> (i32, i32) {
        let (parent_width, parent_height) = self.parent.size();
        let width = (parent_width - self.region.x).min(self.region.width).max(0);
        let height = (parent_height - self.region.y).min(self.region.height).max(0);
        (width, height)
    }

    fn set_content(&mut self, x: i32, y: i32, ch: char, combining: &[char], style: Style) {
        if let Some((x, y)) = self.to_parent(x, y) {
            self.parent.set_content(x, y, ch, combining, style);
        }
    }

    fn get_content(&self, x: i32, y: i32) -> Option<Cell> {
        let (x, y) = self.to_parent(x, y)?;
        self.parent.get_content(x, y)
    }

    fn fill(&mut self, ch: char, style: Style) {
        let (width, height) = self.size();
        for y in 0..height {
            for x in 0..width {
                self.parent
                    .set_content(x + self.region.x, y + self.region.y, ch, &[], style);
            }
        }
    }

    fn clear(&mut self) {
        self.fill(' ', self.style);
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    fn show_cursor(&mut self, x: i32, y: i32) {
        if let Some((x, y)) = self.to_parent(x, y) {
            self.parent.show_cursor(x, y);
        }
    }

    fn hide_cursor(&mut self) {
        self.parent.hide_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::{ProxyScreen, Region};
    use crate::core::buffer::CellBuffer;
    use crate::core::event::{Modifiers, MouseButtons, MouseEvent};
    use crate::core::screen::Screen;
    use crate::core::style::Style;

    #[test]
    fn writes_translate_by_offset() {
        let mut buffer = CellBuffer::new(6, 4);
        let mut proxy = ProxyScreen::new(&mut buffer, Region::new(2, 1, 3, 2));
        proxy.set_cell(0, 0, Style::default(), 'a');
        proxy.set_cell(2, 1, Style::default(), 'b');
        assert_eq!(buffer.lines(), vec!["      ", "  a   ", "    b ", "      "]);
    }

    #[test]
    fn writes_outside_region_are_dropped() {
        let mut buffer = CellBuffer::new(6, 4);
        let mut proxy = ProxyScreen::new(&mut buffer, Region::new(2, 1, 3, 2));
        for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 2), (10, 10)] {
            proxy.set_cell(x, y, Style::default(), 'x');
        }
        assert!(buffer.lines().iter().all(|line| line.trim().is_empty()));
    }

    #[test]
    fn size_never_exceeds_parent() {
        let mut buffer = CellBuffer::new(10, 5);
        let proxy = ProxyScreen::new(&mut buffer, Region::new(7, 3, 8, 8));
        assert_eq!(proxy.size(), (3, 2));

        let mut buffer = CellBuffer::new(4, 4);
        let proxy = ProxyScreen::new(&mut buffer, Region::new(6, 6, 2, 2));
        assert_eq!(proxy.size(), (0, 0));
    }

    #[test]
    fn fill_and_clear_stay_inside_rectangle() {
        let mut buffer = CellBuffer::new(5, 3);
        buffer.fill('.', Style::default());
        let mut proxy = ProxyScreen::new(&mut buffer, Region::new(1, 1, 3, 1));
        proxy.fill('#', Style::default());
        assert_eq!(buffer.lines(), vec![".....", ".###.", "....."]);

        let mut proxy = ProxyScreen::new(&mut buffer, Region::new(2, 0, 1, 3));
        proxy.clear();
        assert_eq!(buffer.lines(), vec![".. ..", ".# #.", ".. .."]);
    }

    #[test]
    fn nested_proxies_compose_offsets_and_clip() {
        let mut buffer = CellBuffer::new(8, 6);
        {
            let mut outer = ProxyScreen::new(&mut buffer, Region::new(1, 1, 6, 4));
            let mut inner = ProxyScreen::new(&mut outer, Region::new(2, 1, 10, 10));
            assert_eq!(inner.size(), (4, 3));
            inner.set_cell(0, 0, Style::default(), 'a');
            inner.set_cell(3, 2, Style::default(), 'b');
            // Inside the inner rectangle but outside the outer one.
            inner.set_cell(4, 0, Style::default(), 'x');
            inner.set_cell(0, 3, Style::default(), 'x');
        }
        assert_eq!(buffer.line(2), "   a    ");
        assert_eq!(buffer.line(4), "      b ");
        assert!(!buffer.lines().concat().contains('x'));
    }

    #[test]
    fn cursor_and_reads_translate() {
        let mut buffer = CellBuffer::new(5, 5);
        buffer.set_cell(3, 2, Style::default(), 'q');
        let mut proxy = ProxyScreen::new(&mut buffer, Region::new(2, 2, 2, 2));
        assert_eq!(proxy.get_content(1, 0).map(|cell| cell.ch), Some('q'));
        assert!(proxy.get_content(2, 0).is_none());
        proxy.show_cursor(1, 1);
        proxy.show_cursor(5, 5);
        assert_eq!(buffer.cursor(), Some((3, 3)));
    }

    #[test]
    fn contains_is_inclusive_lower_exclusive_upper() {
        let region = Region::new(2, 3, 4, 2);
        assert!(region.contains(2, 3));
        assert!(region.contains(5, 4));
        assert!(!region.contains(6, 4));
        assert!(!region.contains(5, 5));
        assert!(!region.contains(1, 3));
        assert!(!Region::new(0, 0, 0, 0).contains(0, 0));
    }

    #[test]
    fn mouse_events_are_remapped_to_local() {
        let region = Region::new(4, 2, 5, 5);
        let event = MouseEvent::new(6, 3, MouseButtons::PRIMARY, Modifiers::empty(), false);
        let local = region.to_local(&event);
        assert_eq!(local.position(), (2, 1));
        assert_eq!(local.buttons, MouseButtons::PRIMARY);
    }
}
