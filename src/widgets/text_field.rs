//! Static single-line text.

use crate::core::component::{Component, EventHandler};
use crate::core::event::{KeyEvent, MouseEvent, PasteEvent};
use crate::core::screen::Screen;
use crate::core::style::Style;
use crate::core::text::{self, Align};
use crate::core::theme::Theme;

/// A left-aligned line of text; events go to the embedded [`EventHandler`].
pub struct TextField {
    text: String,
    style: Style,
    handler: EventHandler,
}

impl Default for TextField {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextField {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Theme::default().text_style(),
            handler: EventHandler::new(),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    pub fn handler_mut(&mut self) -> &mut EventHandler {
        &mut self.handler
    }
}

impl Component for TextField {
    fn draw(&mut self, screen: &mut dyn Screen) {
        let (width, _) = screen.size();
        screen.set_style(self.style);
        screen.clear();
        text::print(screen, &self.text, 0, 0, width, Align::Left, self.style);
    }

    fn on_key_event(&mut self, event: &KeyEvent) -> bool {
        self.handler.handle_key(event)
    }

    fn on_paste_event(&mut self, event: &PasteEvent) -> bool {
        self.handler.handle_paste(event)
    }

    fn on_mouse_event(&mut self, event: &MouseEvent) -> bool {
        self.handler.handle_mouse(event)
    }
}
