// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A "logical character" throughout this crate is an extended grapheme cluster. The
//! masked buffer conceals one glyph per cluster, validators count clusters, and the
//! answer mask repeats the conceal char once per cluster. Keeping a single unit means
//! the length revealed by the mask always matches the length a validator saw.

use unicode_segmentation::UnicodeSegmentation;

#[must_use]
pub fn grapheme_count(text: &str) -> usize { text.graphemes(true).count() }

/// Byte offset of the start of the grapheme at `grapheme_index`, or `text.len()` when
/// the index is at (or past) the end.
#[must_use]
pub fn byte_offset_of_grapheme(text: &str, grapheme_index: usize) -> usize {
    text.grapheme_indices(true)
        .nth(grapheme_index)
        .map_or(text.len(), |(offset, _)| offset)
}

/// Repeat `conceal_char` once per logical character of `text`.
#[must_use]
pub fn conceal(text: &str, conceal_char: char) -> String {
    std::iter::repeat_n(conceal_char, grapheme_count(text)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("", 0)]
    #[test_case("hello", 5)]
    #[test_case("e\u{301}", 1; "combining acute joins previous")]
    #[test_case("👍🏽ok", 3; "emoji with skin tone modifier")]
    fn test_grapheme_count(text: &str, expected: usize) {
        assert_eq!(grapheme_count(text), expected);
    }

    #[test]
    fn test_byte_offset_of_grapheme() {
        let text = "ae\u{301}b";
        assert_eq!(byte_offset_of_grapheme(text, 0), 0);
        assert_eq!(byte_offset_of_grapheme(text, 1), 1);
        assert_eq!(byte_offset_of_grapheme(text, 2), 4);
        assert_eq!(byte_offset_of_grapheme(text, 3), text.len());
        assert_eq!(byte_offset_of_grapheme(text, 99), text.len());
    }

    #[test]
    fn test_conceal() {
        assert_eq!(conceal("hello", '*'), "*****");
        assert_eq!(conceal("e\u{301}x", '•'), "••");
        assert_eq!(conceal("", '*'), "");
    }
}
