//! Style defaults shared by components.
//!
//! A `Theme` is a plain value handed to components at construction time. There is no
//! process-wide mutable palette; two independent trees can use two different themes.

use crate::core::style::{Color, Style};

/// Glyphs used to draw box borders, with a distinct set for the focused state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BorderGlyphs {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,

    pub horizontal_focus: char,
    pub vertical_focus: char,
    pub top_left_focus: char,
    pub top_right_focus: char,
    pub bottom_left_focus: char,
    pub bottom_right_focus: char,
}

/// The corner/edge set for one focus state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BorderSet {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl BorderGlyphs {
    pub fn set(&self, focused: bool) -> BorderSet {
        if focused {
            BorderSet {
                horizontal: self.horizontal_focus,
                vertical: self.vertical_focus,
                top_left: self.top_left_focus,
                top_right: self.top_right_focus,
                bottom_left: self.bottom_left_focus,
                bottom_right: self.bottom_right_focus,
            }
        } else {
            BorderSet {
                horizontal: self.horizontal,
                vertical: self.vertical,
                top_left: self.top_left,
                top_right: self.top_right,
                bottom_left: self.bottom_left,
                bottom_right: self.bottom_right,
            }
        }
    }
}

impl Default for BorderGlyphs {
    fn default() -> Self {
        Self {
            horizontal: '─',
            vertical: '│',
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',

            horizontal_focus: '═',
            vertical_focus: '║',
            top_left_focus: '╔',
            top_right_focus: '╗',
            bottom_left_focus: '╚',
            bottom_right_focus: '╝',
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    /// Main background of boxes and other primitives.
    pub primitive_background: Color,
    /// Background of contrasting elements such as buttons.
    pub contrast_background: Color,
    /// Background of focused contrasting elements.
    pub more_contrast_background: Color,
    pub border_color: Color,
    pub title_color: Color,
    pub graphics_color: Color,
    pub primary_text: Color,
    pub secondary_text: Color,
    pub tertiary_text: Color,
    pub inverse_text: Color,
    pub contrast_secondary_text: Color,
    pub borders: BorderGlyphs,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primitive_background: Color::Default,
            contrast_background: Color::NAVY,
            more_contrast_background: Color::GREEN,
            border_color: Color::WHITE,
            title_color: Color::WHITE,
            graphics_color: Color::WHITE,
            primary_text: Color::WHITE,
            secondary_text: Color::YELLOW,
            tertiary_text: Color::GREEN,
            inverse_text: Color::NAVY,
            contrast_secondary_text: Color::SILVER,
            borders: BorderGlyphs::default(),
        }
    }
}

impl Theme {
    /// Style used for border glyphs, on top of the given background.
    pub fn border_style(&self, background: Option<Color>) -> Style {
        let style = Style::new().foreground(self.border_color);
        match background {
            Some(bg) => style.background(bg),
            None => style,
        }
    }

    pub fn text_style(&self) -> Style {
        Style::new().foreground(self.primary_text)
    }
}
