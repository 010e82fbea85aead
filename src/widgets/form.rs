//! Form: a grid with a tab order over its input items.

use std::boxed::Box as StdBox;

use crate::core::child::ChildId;
use crate::core::component::{Component, Focusable};
use crate::core::event::{Key, KeyEvent, MouseEvent, PasteEvent};
use crate::core::screen::Screen;
use crate::widgets::grid::{Grid, GridCell};

/// A [`Grid`] whose form items can be cycled with Tab / Shift-Tab.
///
/// Enter on a focused item that implements [`FormItem`](crate::core::component::FormItem)
/// submits it, and moves on to the next item only when the submit consumed the event.
#[derive(Default)]
pub struct Form {
    grid: Grid,
    items: Vec<ChildId>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Layout and non-item children go through the underlying grid.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Add a child that takes part in the tab order.
    pub fn add_item(&mut self, component: StdBox<dyn Component>, cell: GridCell) -> ChildId {
        let id = self.grid.add(component, cell);
        self.items.push(id);
        id
    }

    /// Remove a child, whether or not it is a form item.
    pub fn remove_item(&mut self, id: ChildId) -> Option<StdBox<dyn Component>> {
        self.items.retain(|item| *item != id);
        self.grid.remove(id)
    }

    pub fn items(&self) -> &[ChildId] {
        &self.items
    }

    pub fn focus_next_item(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let next = match self.focused_item() {
            Some(idx) if idx + 1 < self.items.len() => idx + 1,
            _ => 0,
        };
        self.grid.set_focused(Some(self.items[next]));
    }

    pub fn focus_previous_item(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let previous = match self.focused_item() {
            Some(idx) if idx > 0 => idx - 1,
            _ => self.items.len() - 1,
        };
        self.grid.set_focused(Some(self.items[previous]));
    }

    fn focused_item(&self) -> Option<usize> {
        let focused = self.grid.focused()?;
        self.items.iter().position(|item| *item == focused)
    }

    fn submit_focused(&mut self, event: &KeyEvent) -> Option<bool> {
        let focused = self.grid.focused()?;
        let item = self.grid.child_mut(focused)?.as_form_item()?;
        Some(item.submit(event))
    }
}

impl Component for Form {
    fn draw(&mut self, screen: &mut dyn Screen) {
        self.grid.draw(screen);
    }

    fn on_key_event(&mut self, event: &KeyEvent) -> bool {
        match event.key {
            Key::Tab => {
                self.focus_next_item();
                return true;
            }
            Key::BackTab => {
                self.focus_previous_item();
                return true;
            }
            Key::Enter => match self.submit_focused(event) {
                Some(true) => {
                    self.focus_next_item();
                    return true;
                }
                Some(false) => return false,
                None => {}
            },
            _ => {}
        }
        self.grid.on_key_event(event)
    }

    fn on_paste_event(&mut self, event: &PasteEvent) -> bool {
        self.grid.on_paste_event(event)
    }

    fn on_mouse_event(&mut self, event: &MouseEvent) -> bool {
        self.grid.on_mouse_event(event)
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }
}

impl Focusable for Form {
    fn focus(&mut self) {
        self.grid.focus();
    }

    fn blur(&mut self) {
        self.grid.blur();
    }
}
