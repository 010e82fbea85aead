//! Box widget: an optional border, title and background around one child.

use std::boxed::Box as StdBox;

use crate::core::component::{self, Component, Focusable};
use crate::core::event::{KeyEvent, MouseEvent, PasteEvent};
use crate::core::proxy::{ProxyScreen, Region};
use crate::core::screen::Screen;
use crate::core::style::{Color, Style};
use crate::core::text::{self, Align};
use crate::core::theme::Theme;

/// Transforms an event before the child sees it; `None` swallows it as handled.
pub type KeyCapture = StdBox<dyn FnMut(&KeyEvent) -> Option<KeyEvent>>;
pub type MouseCapture = StdBox<dyn FnMut(&MouseEvent) -> Option<MouseEvent>>;
pub type PasteCapture = StdBox<dyn FnMut(&PasteEvent) -> Option<PasteEvent>>;
/// Runs on focus/blur; returning `true` keeps the change from reaching the child.
pub type FocusCapture = StdBox<dyn FnMut() -> bool>;

pub struct Box {
    inner: Option<StdBox<dyn Component>>,
    theme: Theme,
    border: bool,
    border_style: Option<Style>,
    title: String,
    background: Option<Color>,
    focused: bool,
    interior: Region,
    key_capture: Option<KeyCapture>,
    mouse_capture: Option<MouseCapture>,
    paste_capture: Option<PasteCapture>,
    focus_capture: Option<FocusCapture>,
    blur_capture: Option<FocusCapture>,
}

impl Box {
    /// A bordered box around `inner` using the default theme.
    pub fn new(inner: StdBox<dyn Component>) -> Self {
        Self::with_theme(inner, Theme::default())
    }

    pub fn with_theme(inner: StdBox<dyn Component>, theme: Theme) -> Self {
        Self {
            inner: Some(inner),
            background: Some(theme.primitive_background),
            theme,
            border: true,
            border_style: None,
            title: String::new(),
            focused: false,
            interior: Region::default(),
            key_capture: None,
            mouse_capture: None,
            paste_capture: None,
            focus_capture: None,
            blur_capture: None,
        }
    }

    /// Replace the child, returning the previous one.
    pub fn set_inner(&mut self, inner: Option<StdBox<dyn Component>>) -> Option<StdBox<dyn Component>> {
        std::mem::replace(&mut self.inner, inner)
    }

    pub fn inner_mut(&mut self) -> Option<&mut (dyn Component + 'static)> {
        self.inner.as_deref_mut()
    }

    pub fn set_border(&mut self, border: bool) {
        self.border = border;
    }

    pub fn has_border(&self) -> bool {
        self.border
    }

    /// Override the theme's border style; `None` restores it.
    pub fn set_border_style(&mut self, style: Option<Style>) {
        self.border_style = style;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// `None` disables the background fill entirely.
    pub fn set_background(&mut self, background: Option<Color>) {
        self.background = background;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The child rectangle computed by the most recent draw.
    pub fn interior(&self) -> Region {
        self.interior
    }

    pub fn set_key_capture(&mut self, capture: impl FnMut(&KeyEvent) -> Option<KeyEvent> + 'static) {
        self.key_capture = Some(StdBox::new(capture));
    }

    pub fn set_mouse_capture(
        &mut self,
        capture: impl FnMut(&MouseEvent) -> Option<MouseEvent> + 'static,
    ) {
        self.mouse_capture = Some(StdBox::new(capture));
    }

    pub fn set_paste_capture(
        &mut self,
        capture: impl FnMut(&PasteEvent) -> Option<PasteEvent> + 'static,
    ) {
        self.paste_capture = Some(StdBox::new(capture));
    }

    pub fn set_focus_capture(&mut self, capture: impl FnMut() -> bool + 'static) {
        self.focus_capture = Some(StdBox::new(capture));
    }

    pub fn set_blur_capture(&mut self, capture: impl FnMut() -> bool + 'static) {
        self.blur_capture = Some(StdBox::new(capture));
    }

    fn draw_border(&self, screen: &mut dyn Screen, width: i32, height: i32) {
        let glyphs = self.theme.borders.set(self.focused);
        let style = match self.border_style {
            Some(style) => match self.background {
                Some(bg) => style.background(bg),
                None => style,
            },
            None => self.theme.border_style(self.background),
        };

        for x in 0..width {
            screen.set_cell(x, 0, style, glyphs.horizontal);
            screen.set_cell(x, height - 1, style, glyphs.horizontal);
        }
        for y in 0..height {
            screen.set_cell(0, y, style, glyphs.vertical);
            screen.set_cell(width - 1, y, style, glyphs.vertical);
        }
        screen.set_cell(0, 0, style, glyphs.top_left);
        screen.set_cell(width - 1, 0, style, glyphs.top_right);
        screen.set_cell(0, height - 1, style, glyphs.bottom_left);
        screen.set_cell(width - 1, height - 1, style, glyphs.bottom_right);

        if !self.title.is_empty() {
            let title_style = Style {
                fg: self.theme.title_color,
                ..style
            };
            text::print(screen, &self.title, 1, 0, width - 2, Align::Center, title_style);
        }
    }
}

impl Component for Box {
    fn draw(&mut self, screen: &mut dyn Screen) {
        let (width, height) = screen.size();
        if let Some(bg) = self.background {
            screen.set_style(Style::new().background(bg));
            screen.clear();
        }

        self.interior = if self.border && width >= 2 && height >= 2 {
            self.draw_border(screen, width, height);
            Region::new(1, 1, width - 2, height - 2)
        } else {
            Region::new(0, 0, width, height)
        };

        if let Some(inner) = self.inner.as_mut() {
            let mut proxy = ProxyScreen::new(screen, self.interior);
            inner.draw(&mut proxy);
        }
    }

    fn on_key_event(&mut self, event: &KeyEvent) -> bool {
        let event = match self.key_capture.as_mut() {
            Some(capture) => match capture(event) {
                Some(event) => event,
                None => return true,
            },
            None => *event,
        };
        match self.inner.as_mut() {
            Some(inner) => inner.on_key_event(&event),
            None => false,
        }
    }

    fn on_paste_event(&mut self, event: &PasteEvent) -> bool {
        let event = match self.paste_capture.as_mut() {
            Some(capture) => match capture(event) {
                Some(event) => event,
                None => return true,
            },
            None => event.clone(),
        };
        match self.inner.as_mut() {
            Some(inner) => inner.on_paste_event(&event),
            None => false,
        }
    }

    fn on_mouse_event(&mut self, event: &MouseEvent) -> bool {
        if !self.interior.contains(event.x, event.y) {
            return false;
        }
        let local = self.interior.to_local(event);
        let local = match self.mouse_capture.as_mut() {
            Some(capture) => match capture(&local) {
                Some(event) => event,
                None => return true,
            },
            None => local,
        };

        if local.is_primary_click() && !self.focused {
            self.focus();
        }
        match self.inner.as_mut() {
            Some(inner) => inner.on_mouse_event(&local),
            None => false,
        }
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }
}

impl Focusable for Box {
    fn focus(&mut self) {
        self.focused = true;
        if let Some(capture) = self.focus_capture.as_mut() {
            if capture() {
                return;
            }
        }
        if let Some(inner) = self.inner.as_mut() {
            component::focus(inner.as_mut());
        }
    }

    fn blur(&mut self) {
        self.focused = false;
        if let Some(capture) = self.blur_capture.as_mut() {
            if capture() {
                return;
            }
        }
        if let Some(inner) = self.inner.as_mut() {
            component::blur(inner.as_mut());
        }
    }
}
