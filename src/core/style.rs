//! Cell styling: colors, attributes and the `Style` value.

use bitflags::bitflags;

/// Terminal color as understood by the cell surface.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Color {
    /// Whatever the terminal uses when no color is set.
    #[default]
    Default,
    /// One of the 256 palette entries (0-15 are the classic ANSI colors).
    Indexed(u8),
    Rgb(u8, u8, u8),
}

impl Color {
    pub const BLACK: Color = Color::Indexed(0);
    pub const MAROON: Color = Color::Indexed(1);
    pub const GREEN: Color = Color::Indexed(2);
    pub const OLIVE: Color = Color::Indexed(3);
    pub const NAVY: Color = Color::Indexed(4);
    pub const PURPLE: Color = Color::Indexed(5);
    pub const TEAL: Color = Color::Indexed(6);
    pub const SILVER: Color = Color::Indexed(7);
    pub const GRAY: Color = Color::Indexed(8);
    pub const RED: Color = Color::Indexed(9);
    pub const LIME: Color = Color::Indexed(10);
    pub const YELLOW: Color = Color::Indexed(11);
    pub const BLUE: Color = Color::Indexed(12);
    pub const FUCHSIA: Color = Color::Indexed(13);
    pub const AQUA: Color = Color::Indexed(14);
    pub const WHITE: Color = Color::Indexed(15);
}

bitflags! {
    /// Text attributes applied on top of the colors.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct Attributes: u8 {
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK = 1 << 4;
        const REVERSE = 1 << 5;
        const STRIKETHROUGH = 1 << 6;
    }
}

/// Foreground, background and attributes of a single cell.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub attributes: Attributes,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            fg: Color::Default,
            bg: Color::Default,
            attributes: Attributes::empty(),
        }
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    pub fn add_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes |= attributes;
        self
    }

    pub fn remove_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes -= attributes;
        self
    }
}
