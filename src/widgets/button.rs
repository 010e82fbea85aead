//! Push button.

use std::boxed::Box as StdBox;

use crate::core::component::{Component, Focusable, FormItem};
use crate::core::event::{Key, KeyEvent, MouseEvent};
use crate::core::screen::Screen;
use crate::core::style::Style;
use crate::core::text::{self, Align};
use crate::core::theme::Theme;

/// A single-line label that runs a callback on click, Enter, or form submit.
pub struct Button {
    text: String,
    style: Style,
    focused_style: Style,
    focused: bool,
    on_click: Option<StdBox<dyn FnMut()>>,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_theme(text, &Theme::default())
    }

    pub fn with_theme(text: impl Into<String>, theme: &Theme) -> Self {
        Self {
            text: text.into(),
            style: Style::new()
                .background(theme.contrast_background)
                .foreground(theme.primary_text),
            focused_style: Style::new()
                .background(theme.more_contrast_background)
                .foreground(theme.primary_text),
            focused: false,
            on_click: None,
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

    pub fn set_focused_style(&mut self, style: Style) {
        self.focused_style = style;
    }

    pub fn set_on_click(&mut self, on_click: impl FnMut() + 'static) {
        self.on_click = Some(StdBox::new(on_click));
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    fn click(&mut self) {
        if let Some(on_click) = self.on_click.as_mut() {
            on_click();
        }
    }
}

impl Component for Button {
    fn draw(&mut self, screen: &mut dyn Screen) {
        let (width, _) = screen.size();
        let style = if self.focused {
            self.focused_style
        } else {
            self.style
        };
        screen.set_style(style);
        screen.clear();
        text::print(screen, &self.text, 0, 0, width, Align::Center, style);
    }

    fn on_key_event(&mut self, event: &KeyEvent) -> bool {
        if event.key == Key::Enter {
            self.click();
            return true;
        }
        false
    }

    fn on_mouse_event(&mut self, event: &MouseEvent) -> bool {
        if event.is_primary_click() {
            self.click();
            return true;
        }
        false
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }

    fn as_form_item(&mut self) -> Option<&mut dyn FormItem> {
        Some(self)
    }
}

impl Focusable for Button {
    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }
}

impl FormItem for Button {
    fn submit(&mut self, _event: &KeyEvent) -> bool {
        self.click();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::Button;
    use crate::core::buffer::CellBuffer;
    use crate::core::component::{Component, Focusable};
    use crate::core::event::{Key, KeyEvent, Modifiers, MouseButtons, MouseEvent};
    use crate::core::style::Style;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn click_and_enter_run_callback() {
        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        let mut button = Button::new("ok");
        button.set_on_click(move || counter.set(counter.get() + 1));

        assert!(button.on_mouse_event(&MouseEvent::click(0, 0)));
        assert!(button.on_key_event(&KeyEvent::plain(Key::Enter)));
        assert!(!button.on_key_event(&KeyEvent::char('x')));
        let wheel = MouseEvent::new(0, 0, MouseButtons::WHEEL_UP, Modifiers::empty(), false);
        assert!(!button.on_mouse_event(&wheel));
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn focused_style_is_used_when_focused() {
        let mut button = Button::new("go");
        let focused = Style::new().background(crate::core::style::Color::RED);
        button.set_focused_style(focused);
        button.focus();

        let mut buffer = CellBuffer::new(6, 1);
        button.draw(&mut buffer);
        assert_eq!(buffer.line(0), "  go  ");
        assert_eq!(buffer.cell(0, 0).map(|cell| cell.style), Some(focused));
    }
}
