// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use unicode_segmentation::UnicodeSegmentation;

use crate::{EditAction, byte_offset_of_grapheme, conceal, grapheme_count};

/// The true (unmasked) content of the prompt, and the cursor into it.
///
/// The content is a frozen `prefix` (the default value) followed by the editable
/// `line`. The cursor only ever moves within `line`, so no editing key can reach into
/// or delete the prefix. The only way to see the content on screen is through
/// [`MaskedLineState::masked_view()`].
#[derive(Clone, PartialEq, Eq)]
pub struct MaskedLineState {
    prefix: String,
    line: String,
    /// Index of grapheme in `line`.
    line_cursor_grapheme: usize,
    conceal_char: char,
}

impl MaskedLineState {
    pub fn new(prefix: impl Into<String>, conceal_char: char) -> Self {
        Self {
            prefix: prefix.into(),
            line: String::new(),
            line_cursor_grapheme: 0,
            conceal_char,
        }
    }

    /// Full content: default prefix first, then what was typed.
    #[must_use]
    pub fn content(&self) -> String { format!("{}{}", self.prefix, self.line) }

    #[must_use]
    pub fn prefix(&self) -> &str { &self.prefix }

    #[must_use]
    pub fn typed(&self) -> &str { &self.line }

    #[must_use]
    pub fn is_typed_empty(&self) -> bool { self.line.is_empty() }

    #[must_use]
    pub fn line_cursor_grapheme(&self) -> usize { self.line_cursor_grapheme }

    /// One conceal char per grapheme of the prefix and of the typed line.
    #[must_use]
    pub fn masked_view(&self) -> String {
        let mut it = conceal(&self.prefix, self.conceal_char);
        it.push_str(&conceal(&self.line, self.conceal_char));
        it
    }

    /// Cursor position in the masked view, in graphemes (which are also columns, since
    /// the conceal char is one column wide).
    #[must_use]
    pub fn masked_cursor_offset(&self) -> usize {
        grapheme_count(&self.prefix) + self.line_cursor_grapheme
    }

    fn line_grapheme_count(&self) -> usize { grapheme_count(&self.line) }

    fn cursor_byte_offset(&self) -> usize {
        byte_offset_of_grapheme(&self.line, self.line_cursor_grapheme)
    }
}

fn is_blank(grapheme: &str) -> bool { grapheme.chars().all(char::is_whitespace) }

/// Editing. The methods that can change the content return whether they did.
impl MaskedLineState {
    /// Insert at the cursor. Combining marks join the grapheme before the cursor, so the
    /// cursor advances by the number of graphemes the line actually grew by.
    pub fn insert_str(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let offset = self.cursor_byte_offset();
        self.line.insert_str(offset, text);
        self.line_cursor_grapheme =
            grapheme_count(&self.line[..offset + text.len()]).min(self.line_grapheme_count());
        true
    }

    pub fn backspace(&mut self) -> bool {
        if self.line_cursor_grapheme == 0 {
            return false;
        }
        let start = byte_offset_of_grapheme(&self.line, self.line_cursor_grapheme - 1);
        let end = self.cursor_byte_offset();
        self.line.replace_range(start..end, "");
        self.line_cursor_grapheme -= 1;
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.line_cursor_grapheme >= self.line_grapheme_count() {
            return false;
        }
        let start = self.cursor_byte_offset();
        let end = byte_offset_of_grapheme(&self.line, self.line_cursor_grapheme + 1);
        self.line.replace_range(start..end, "");
        true
    }

    pub fn kill_to_start(&mut self) -> bool {
        if self.line_cursor_grapheme == 0 {
            return false;
        }
        let end = self.cursor_byte_offset();
        self.line.drain(..end);
        self.line_cursor_grapheme = 0;
        true
    }

    pub fn kill_to_end(&mut self) -> bool {
        let start = self.cursor_byte_offset();
        if start == self.line.len() {
            return false;
        }
        self.line.truncate(start);
        true
    }

    /// Delete back to the start of the previous word, eating any blanks in between.
    pub fn kill_previous_word(&mut self) -> bool {
        let start_grapheme = self.previous_word_start();
        if start_grapheme == self.line_cursor_grapheme {
            return false;
        }
        let start = byte_offset_of_grapheme(&self.line, start_grapheme);
        let end = self.cursor_byte_offset();
        self.line.replace_range(start..end, "");
        self.line_cursor_grapheme = start_grapheme;
        true
    }
}

/// Cursor movement. None of these change the content.
impl MaskedLineState {
    pub fn move_left(&mut self) {
        self.line_cursor_grapheme = self.line_cursor_grapheme.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.line_cursor_grapheme =
            (self.line_cursor_grapheme + 1).min(self.line_grapheme_count());
    }

    pub fn move_home(&mut self) { self.line_cursor_grapheme = 0; }

    pub fn move_end(&mut self) { self.line_cursor_grapheme = self.line_grapheme_count(); }

    /// Onto the last grapheme, rather than past it.
    pub fn move_to_last(&mut self) {
        self.line_cursor_grapheme = self.line_grapheme_count().saturating_sub(1);
    }

    pub fn move_word_left(&mut self) { self.line_cursor_grapheme = self.previous_word_start(); }

    /// To the end of the current (or next) word.
    pub fn move_word_right(&mut self) {
        let graphemes: Vec<&str> = self.line.graphemes(true).collect();
        let mut index = self.line_cursor_grapheme;
        while index < graphemes.len() && is_blank(graphemes[index]) {
            index += 1;
        }
        while index < graphemes.len() && !is_blank(graphemes[index]) {
            index += 1;
        }
        self.line_cursor_grapheme = index;
    }

    /// To the start of the next word.
    pub fn move_next_word_start(&mut self) {
        let graphemes: Vec<&str> = self.line.graphemes(true).collect();
        let mut index = self.line_cursor_grapheme;
        while index < graphemes.len() && !is_blank(graphemes[index]) {
            index += 1;
        }
        while index < graphemes.len() && is_blank(graphemes[index]) {
            index += 1;
        }
        self.line_cursor_grapheme = index;
    }

    fn previous_word_start(&self) -> usize {
        let graphemes: Vec<&str> = self.line.graphemes(true).collect();
        let mut index = self.line_cursor_grapheme.min(graphemes.len());
        while index > 0 && is_blank(graphemes[index - 1]) {
            index -= 1;
        }
        while index > 0 && !is_blank(graphemes[index - 1]) {
            index -= 1;
        }
        index
    }
}

impl MaskedLineState {
    /// Apply a resolved key binding. Returns whether the content changed.
    pub fn apply(&mut self, action: &EditAction) -> bool {
        match action {
            EditAction::Insert(text) => self.insert_str(text),
            EditAction::Backspace => self.backspace(),
            EditAction::Delete => self.delete(),
            EditAction::KillToStart => self.kill_to_start(),
            EditAction::KillToEnd => self.kill_to_end(),
            EditAction::KillPreviousWord => self.kill_previous_word(),
            EditAction::MoveLeft => {
                self.move_left();
                false
            }
            EditAction::MoveRight => {
                self.move_right();
                false
            }
            EditAction::MoveHome => {
                self.move_home();
                false
            }
            EditAction::MoveEnd => {
                self.move_end();
                false
            }
            EditAction::MoveToLast => {
                self.move_to_last();
                false
            }
            EditAction::MoveWordLeft => {
                self.move_word_left();
                false
            }
            EditAction::MoveWordRight => {
                self.move_word_right();
                false
            }
            EditAction::MoveNextWordStart => {
                self.move_next_word_start();
                false
            }
            EditAction::Submit
            | EditAction::Interrupt
            | EditAction::EndOfInput
            | EditAction::Noop => false,
        }
    }
}

/// Only lengths, never the content.
impl std::fmt::Debug for MaskedLineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaskedLineState")
            .field("masked_view", &self.masked_view())
            .field("line_cursor_grapheme", &self.line_cursor_grapheme)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn typed(text: &str) -> MaskedLineState {
        let mut line_state = MaskedLineState::new("", '*');
        line_state.insert_str(text);
        line_state
    }

    #[test]
    fn test_insert_and_mask() {
        let mut line_state = MaskedLineState::new("yes", '*');
        for ch in ["w", "h", "a", "t"] {
            assert!(line_state.insert_str(ch));
        }
        assert_eq!(line_state.content(), "yeswhat");
        assert_eq!(line_state.typed(), "what");
        assert_eq!(line_state.masked_view(), "*******");
        assert_eq!(line_state.masked_cursor_offset(), 7);
    }

    #[test]
    fn test_combining_mark_joins_previous_grapheme() {
        let mut line_state = typed("e");
        line_state.insert_str("\u{301}");
        assert_eq!(line_state.typed(), "e\u{301}");
        assert_eq!(line_state.line_cursor_grapheme(), 1);
        assert_eq!(line_state.masked_view(), "*");
        assert!(line_state.backspace());
        assert_eq!(line_state.typed(), "");
    }

    #[test]
    fn test_insert_in_the_middle() {
        let mut line_state = typed("ac");
        line_state.move_left();
        line_state.insert_str("b");
        assert_eq!(line_state.typed(), "abc");
        assert_eq!(line_state.line_cursor_grapheme(), 2);
    }

    #[test]
    fn test_prefix_survives_backspace_and_kill() {
        let mut line_state = MaskedLineState::new("yes", '*');
        line_state.insert_str("ab");
        assert!(line_state.backspace());
        assert!(line_state.backspace());
        assert!(!line_state.backspace());
        assert_eq!(line_state.content(), "yes");

        line_state.insert_str("cd");
        line_state.move_home();
        assert!(!line_state.backspace());
        line_state.move_end();
        assert!(line_state.kill_to_start());
        assert!(!line_state.kill_previous_word());
        assert_eq!(line_state.content(), "yes");
        assert_eq!(line_state.masked_view(), "***");
    }

    #[test]
    fn test_delete_under_cursor() {
        let mut line_state = typed("abc");
        line_state.move_home();
        assert!(line_state.delete());
        assert_eq!(line_state.typed(), "bc");
        line_state.move_end();
        assert!(!line_state.delete());
    }

    #[test]
    fn test_kill_to_end() {
        let mut line_state = typed("hello world");
        line_state.move_home();
        line_state.move_word_right();
        assert!(line_state.kill_to_end());
        assert_eq!(line_state.typed(), "hello");
        assert!(!line_state.kill_to_end());
    }

    #[test]
    fn test_kill_previous_word() {
        let mut line_state = typed("correct horse  ");
        assert!(line_state.kill_previous_word());
        assert_eq!(line_state.typed(), "correct ");
        assert!(line_state.kill_previous_word());
        assert_eq!(line_state.typed(), "");
    }

    #[test]
    fn test_word_motion() {
        let mut line_state = typed("one two three");
        line_state.move_word_left();
        assert_eq!(line_state.line_cursor_grapheme(), 8);
        line_state.move_word_left();
        assert_eq!(line_state.line_cursor_grapheme(), 4);
        line_state.move_word_right();
        assert_eq!(line_state.line_cursor_grapheme(), 7);
        line_state.move_next_word_start();
        assert_eq!(line_state.line_cursor_grapheme(), 8);
        line_state.move_home();
        line_state.move_next_word_start();
        assert_eq!(line_state.line_cursor_grapheme(), 4);
    }

    #[test]
    fn test_cursor_clamps() {
        let mut line_state = typed("ab");
        line_state.move_right();
        assert_eq!(line_state.line_cursor_grapheme(), 2);
        line_state.move_to_last();
        assert_eq!(line_state.line_cursor_grapheme(), 1);
        line_state.move_home();
        line_state.move_left();
        assert_eq!(line_state.line_cursor_grapheme(), 0);
    }

    #[test]
    fn test_newlines_are_concealed_too() {
        let line_state = typed("a\nb");
        assert_eq!(line_state.masked_view(), "***");
    }

    #[test]
    fn test_debug_never_shows_content() {
        let line_state = MaskedLineState::new("yes", '*');
        let debug_str = format!("{line_state:?}");
        assert!(!debug_str.contains("yes"));
    }

    #[test]
    fn test_apply_reports_content_change() {
        let mut line_state = MaskedLineState::new("", '*');
        assert!(line_state.apply(&EditAction::Insert("x".into())));
        assert!(!line_state.apply(&EditAction::MoveLeft));
        assert!(!line_state.apply(&EditAction::Backspace));
        assert!(line_state.apply(&EditAction::Delete));
    }
}
