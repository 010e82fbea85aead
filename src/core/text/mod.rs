//! Single-line text output onto a [`Screen`].

pub mod width;

use unicode_segmentation::UnicodeSegmentation;

use crate::core::screen::Screen;
use crate::core::style::Style;

pub use width::{grapheme_width, string_width};

/// Horizontal placement of text inside its line segment.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Print `text` on row `y` within `[x, x + max_width)`, aligned inside that segment.
///
/// Graphemes that would cross the right edge are dropped whole. Returns the number of
/// cells written.
pub fn print(
    screen: &mut dyn Screen,
    text: &str,
    x: i32,
    y: i32,
    max_width: i32,
    align: Align,
    style: Style,
) -> i32 {
    if max_width <= 0 {
        return 0;
    }

    let mut graphemes = Vec::new();
    let mut total = 0;
    for grapheme in text.graphemes(true) {
        let width = grapheme_width(grapheme) as i32;
        if width == 0 {
            continue;
        }
        if total + width > max_width {
            break;
        }
        total += width;
        graphemes.push((grapheme, width));
    }

    let mut cursor = x + match align {
        Align::Left => 0,
        Align::Center => (max_width - total) / 2,
        Align::Right => max_width - total,
    };
    for (grapheme, width) in graphemes {
        let mut chars = grapheme.chars();
        if let Some(base) = chars.next() {
            let combining: Vec<char> = chars.collect();
            screen.set_content(cursor, y, base, &combining, style);
        }
        cursor += width;
    }
    total
}
