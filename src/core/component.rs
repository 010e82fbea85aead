//! Component, Focusable and FormItem traits.

use crate::core::event::{KeyEvent, MouseEvent, PasteEvent};
use crate::core::screen::Screen;

/// A node of the UI tree.
///
/// Handlers return `true` when the event was consumed and the tree should be redrawn.
pub trait Component {
    /// Draw into `screen`, whose origin is this component's top-left corner.
    fn draw(&mut self, screen: &mut dyn Screen);

    fn on_key_event(&mut self, _event: &KeyEvent) -> bool {
        false
    }

    fn on_paste_event(&mut self, _event: &PasteEvent) -> bool {
        false
    }

    /// Mouse coordinates are local to the component.
    fn on_mouse_event(&mut self, _event: &MouseEvent) -> bool {
        false
    }

    /// Optional focus capability.
    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        None
    }

    /// Optional form item capability, see [`crate::widgets::Form`].
    fn as_form_item(&mut self) -> Option<&mut dyn FormItem> {
        None
    }
}

/// Components that react to gaining and losing focus.
pub trait Focusable {
    fn focus(&mut self);
    fn blur(&mut self);
}

/// Components that take part in a form's tab order and submit on Enter.
pub trait FormItem {
    /// Returns whether the submit consumed the event; the form only advances focus if so.
    fn submit(&mut self, event: &KeyEvent) -> bool;
}

/// Focus `component` if it is focusable; otherwise do nothing.
pub fn focus(component: &mut dyn Component) {
    if let Some(focusable) = component.as_focusable() {
        focusable.focus();
    }
}

/// Blur `component` if it is focusable; otherwise do nothing.
pub fn blur(component: &mut dyn Component) {
    if let Some(focusable) = component.as_focusable() {
        focusable.blur();
    }
}

type KeyHandler = Box<dyn FnMut(&KeyEvent) -> bool>;
type PasteHandler = Box<dyn FnMut(&PasteEvent) -> bool>;
type MouseHandler = Box<dyn FnMut(&MouseEvent) -> bool>;

/// Closure-backed event handlers for leaf components.
///
/// Unset handlers report the event as not handled.
#[derive(Default)]
pub struct EventHandler {
    on_key: Option<KeyHandler>,
    on_paste: Option<PasteHandler>,
    on_mouse: Option<MouseHandler>,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_on_key(&mut self, handler: impl FnMut(&KeyEvent) -> bool + 'static) {
        self.on_key = Some(Box::new(handler));
    }

    pub fn set_on_paste(&mut self, handler: impl FnMut(&PasteEvent) -> bool + 'static) {
        self.on_paste = Some(Box::new(handler));
    }

    pub fn set_on_mouse(&mut self, handler: impl FnMut(&MouseEvent) -> bool + 'static) {
        self.on_mouse = Some(Box::new(handler));
    }

    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        self.on_key.as_mut().is_some_and(|handler| handler(event))
    }

    pub fn handle_paste(&mut self, event: &PasteEvent) -> bool {
        self.on_paste.as_mut().is_some_and(|handler| handler(event))
    }

    pub fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        self.on_mouse.as_mut().is_some_and(|handler| handler(event))
    }
}
