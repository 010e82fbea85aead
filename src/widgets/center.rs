//! Centering containers.

use std::boxed::Box as StdBox;

use crate::core::component::{self, Component, Focusable};
use crate::core::event::{KeyEvent, MouseEvent, PasteEvent};
use crate::core::proxy::{ProxyScreen, Region};
use crate::core::screen::Screen;

/// Draws one child at a fixed size, centered in the available area.
///
/// When the child is larger than the area it is placed at offset 0 on that axis and
/// overflows instead of being shifted off-screen.
///
/// Focus handling depends on [`Center::set_always_focus_child`]:
/// - off: the child is focused by a click inside it and blurred by a click outside;
/// - on: focusing the center focuses the child, and clicks outside are swallowed
///   without changing focus.
pub struct Center {
    target: StdBox<dyn Component>,
    width: i32,
    height: i32,
    region: Region,
    always_focus_child: bool,
    child_focused: bool,
}

impl Center {
    pub fn new(target: StdBox<dyn Component>, width: i32, height: i32) -> Self {
        Self {
            target,
            width,
            height,
            region: Region::new(0, 0, width, height),
            always_focus_child: false,
            child_focused: false,
        }
    }

    pub fn set_size(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    pub fn set_width(&mut self, width: i32) {
        self.width = width;
    }

    pub fn set_height(&mut self, height: i32) {
        self.height = height;
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn set_always_focus_child(&mut self, always: bool) {
        self.always_focus_child = always;
    }

    pub fn always_focus_child(&self) -> bool {
        self.always_focus_child
    }

    pub fn is_child_focused(&self) -> bool {
        self.child_focused
    }

    /// The child rectangle from the most recent draw.
    pub fn region(&self) -> Region {
        self.region
    }

    pub fn target_mut(&mut self) -> &mut dyn Component {
        self.target.as_mut()
    }

    fn focus_child(&mut self) {
        self.child_focused = true;
        component::focus(self.target.as_mut());
    }
}

impl Component for Center {
    fn draw(&mut self, screen: &mut dyn Screen) {
        let (total_width, total_height) = screen.size();
        let padding_x = (total_width - self.width) / 2;
        let padding_y = (total_height - self.height) / 2;
        self.region = Region::new(
            padding_x.max(0),
            padding_y.max(0),
            self.width,
            self.height,
        );
        let mut proxy = ProxyScreen::new(screen, self.region);
        self.target.draw(&mut proxy);
    }

    fn on_key_event(&mut self, event: &KeyEvent) -> bool {
        self.target.on_key_event(event)
    }

    fn on_paste_event(&mut self, event: &PasteEvent) -> bool {
        self.target.on_paste_event(event)
    }

    fn on_mouse_event(&mut self, event: &MouseEvent) -> bool {
        let focusable = self.target.as_focusable().is_some();
        if !self.region.contains(event.x, event.y) {
            if focusable && event.is_primary_click() {
                if !self.always_focus_child && self.child_focused {
                    self.blur();
                }
                return true;
            }
            return false;
        }

        let mut focus_changed = false;
        if focusable && !self.child_focused && event.is_primary_click() {
            self.focus_child();
            focus_changed = true;
        }
        let local = self.region.to_local(event);
        self.target.on_mouse_event(&local) || focus_changed
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }
}

impl Focusable for Center {
    fn focus(&mut self) {
        if self.always_focus_child {
            self.focus_child();
        }
    }

    fn blur(&mut self) {
        self.child_focused = false;
        component::blur(self.target.as_mut());
    }
}

/// A [`Center`] sized as a fraction of the available area, but never below a minimum.
pub struct FractionalCenter {
    center: Center,
    min_width: i32,
    min_height: i32,
    fraction_width: f64,
    fraction_height: f64,
}

impl FractionalCenter {
    pub fn new(
        target: StdBox<dyn Component>,
        min_width: i32,
        min_height: i32,
        fraction_width: f64,
        fraction_height: f64,
    ) -> Self {
        Self {
            center: Center::new(target, 0, 0),
            min_width,
            min_height,
            fraction_width,
            fraction_height,
        }
    }

    pub fn set_always_focus_child(&mut self, always: bool) {
        self.center.set_always_focus_child(always);
    }

    pub fn center(&self) -> &Center {
        &self.center
    }

    pub fn center_mut(&mut self) -> &mut Center {
        &mut self.center
    }
}

impl Component for FractionalCenter {
    fn draw(&mut self, screen: &mut dyn Screen) {
        let (width, height) = screen.size();
        let width = ((f64::from(width) * self.fraction_width) as i32).max(self.min_width);
        let height = ((f64::from(height) * self.fraction_height) as i32).max(self.min_height);
        self.center.set_size(width, height);
        self.center.draw(screen);
    }

    fn on_key_event(&mut self, event: &KeyEvent) -> bool {
        self.center.on_key_event(event)
    }

    fn on_paste_event(&mut self, event: &PasteEvent) -> bool {
        self.center.on_paste_event(event)
    }

    fn on_mouse_event(&mut self, event: &MouseEvent) -> bool {
        self.center.on_mouse_event(event)
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }
}

impl Focusable for FractionalCenter {
    fn focus(&mut self) {
        self.center.focus();
    }

    fn blur(&mut self) {
        self.center.blur();
    }
}
