//! Display width of graphemes and strings.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Width in cells of one extended grapheme cluster.
///
/// The width comes from the base character; combining marks ride along in the same cell.
/// Control characters have no width.
pub fn grapheme_width(grapheme: &str) -> usize {
    grapheme
        .chars()
        .next()
        .and_then(UnicodeWidthChar::width)
        .unwrap_or(0)
}

/// Width in cells of `text` when printed on one line.
pub fn string_width(text: &str) -> usize {
    text.graphemes(true).map(grapheme_width).sum()
}

#[cfg(test)]
mod tests {
    use super::{grapheme_width, string_width};

    #[test]
    fn ascii_and_wide_characters() {
        assert_eq!(string_width("hello"), 5);
        assert_eq!(string_width("日本"), 4);
        assert_eq!(grapheme_width("日"), 2);
    }

    #[test]
    fn combining_marks_share_the_base_cell() {
        assert_eq!(string_width("e\u{301}"), 1);
    }

    #[test]
    fn control_characters_have_no_width() {
        assert_eq!(grapheme_width("\u{7}"), 0);
        assert_eq!(grapheme_width(""), 0);
    }
}
