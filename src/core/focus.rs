//! Focus pointer and hit-testing shared by the multi-child containers.
//!
//! A container owns its children and at most one focused child. The helpers here keep
//! drawing, hit-testing and focus transfer consistent:
//! - the focused child draws last, so it is on top when rectangles overlap;
//! - hit-testing checks the focused child first, then the others topmost first, using
//!   the regions recorded by the most recent layout;
//! - a primary click moves focus (blur old, focus new) and still forwards the event;
//! - a primary click that hits no child blurs the current focus.

use crate::core::child::{ChildId, HasSlot};
use crate::core::event::{KeyEvent, MouseEvent, PasteEvent};
use crate::core::screen::Screen;

type FocusChangedFn = Box<dyn FnMut(Option<ChildId>, Option<ChildId>)>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Delivery {
    /// Newly focused children always receive `focus()`.
    Immediate,
    /// Programmatic focus changes only reach the child once the container itself
    /// has been focused.
    WhenReceived,
}

pub struct FocusState {
    focused: Option<ChildId>,
    received: bool,
    delivery: Delivery,
    on_change: Option<FocusChangedFn>,
}

impl Default for FocusState {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusState {
    pub fn new() -> Self {
        Self {
            focused: None,
            received: false,
            delivery: Delivery::Immediate,
            on_change: None,
        }
    }

    /// Focus state for containers that remember whether they hold focus themselves.
    pub fn gated() -> Self {
        Self {
            delivery: Delivery::WhenReceived,
            ..Self::new()
        }
    }

    pub fn focused(&self) -> Option<ChildId> {
        self.focused
    }

    /// Whether the owning container is currently on the focused path.
    pub fn received(&self) -> bool {
        self.received
    }

    pub fn set_on_change(&mut self, handler: impl FnMut(Option<ChildId>, Option<ChildId>) + 'static) {
        self.on_change = Some(Box::new(handler));
    }

    /// Move focus to `target` (or nowhere), blurring the previous child.
    pub(crate) fn set_focus<C: HasSlot>(&mut self, children: &mut [C], target: Option<ChildId>) {
        self.transfer(children, target, false);
    }

    fn transfer<C: HasSlot>(&mut self, children: &mut [C], target: Option<ChildId>, forced: bool) {
        if self.focused == target {
            return;
        }
        let target = target.filter(|id| position(children, *id).is_some());

        let previous = self.focused.take();
        if let Some(idx) = previous.and_then(|id| position(children, id)) {
            children[idx].slot_mut().blur();
        }

        self.focused = target;
        let deliver = forced || self.received || self.delivery == Delivery::Immediate;
        if deliver {
            if let Some(idx) = target.and_then(|id| position(children, id)) {
                children[idx].slot_mut().focus();
            }
        }

        if let Some(handler) = self.on_change.as_mut() {
            handler(previous, target);
        }
    }

    /// The container itself gained focus: re-focus the remembered child.
    pub(crate) fn container_focus<C: HasSlot>(&mut self, children: &mut [C]) {
        self.received = true;
        if let Some(idx) = self.focused.and_then(|id| position(children, id)) {
            children[idx].slot_mut().focus();
        }
    }

    /// The container lost focus: blur and forget the focused child.
    pub(crate) fn container_blur<C: HasSlot>(&mut self, children: &mut [C]) {
        if self.focused.is_some() {
            self.set_focus(children, None);
        }
        self.received = false;
    }

    /// Drop the focus pointer if it refers to a child that is being removed.
    pub(crate) fn forget(&mut self, id: ChildId) {
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    /// Draw every child, the focused one last.
    pub(crate) fn draw<C: HasSlot>(&self, children: &mut [C], screen: &mut dyn Screen) {
        let mut focused_idx = None;
        for (idx, child) in children.iter_mut().enumerate() {
            if Some(child.slot().id()) == self.focused {
                focused_idx = Some(idx);
                continue;
            }
            child.slot_mut().draw(&mut *screen);
        }
        if let Some(idx) = focused_idx {
            children[idx].slot_mut().draw(screen);
        }
    }

    pub(crate) fn route_key<C: HasSlot>(&self, children: &mut [C], event: &KeyEvent) -> bool {
        match self.focused.and_then(|id| position(children, id)) {
            Some(idx) => children[idx].slot_mut().target_mut().on_key_event(event),
            None => false,
        }
    }

    pub(crate) fn route_paste<C: HasSlot>(&self, children: &mut [C], event: &PasteEvent) -> bool {
        match self.focused.and_then(|id| position(children, id)) {
            Some(idx) => children[idx].slot_mut().target_mut().on_paste_event(event),
            None => false,
        }
    }

    /// Hit-test a container-space mouse event and forward it to the child under it.
    pub(crate) fn route_mouse<C: HasSlot>(&mut self, children: &mut [C], event: &MouseEvent) -> bool {
        let (x, y) = event.position();

        if let Some(idx) = self.focused.and_then(|id| position(children, id)) {
            if children[idx].slot().contains(x, y) {
                return children[idx].slot_mut().forward_mouse(event);
            }
        }

        let hit = children
            .iter()
            .rposition(|child| child.slot().contains(x, y));
        if let Some(idx) = hit {
            let mut focus_changed = false;
            if event.is_primary_click() {
                let id = children[idx].slot().id();
                self.received = true;
                self.transfer(children, Some(id), true);
                focus_changed = true;
            }
            let handled = children[idx].slot_mut().forward_mouse(event);
            return handled || focus_changed;
        }

        if event.is_primary_click() && self.focused.is_some() {
            self.set_focus(children, None);
            return true;
        }
        false
    }
}

pub(crate) fn position<C: HasSlot>(children: &[C], id: ChildId) -> Option<usize> {
    children.iter().position(|child| child.slot().id() == id)
}
