// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::{CrosstermEventResult, InlineVec};

/// Turn text into the key events a user typing it would produce. `\n` and `\r` become
/// <kbd>Enter</kbd>. Everything else is a plain character key press.
#[must_use]
pub fn gen_key_events_from_str(text: &str) -> InlineVec<CrosstermEventResult> {
    text.chars()
        .map(|ch| match ch {
            '\n' | '\r' => key_event(KeyCode::Enter, KeyModifiers::NONE),
            _ => key_event(KeyCode::Char(ch), KeyModifiers::NONE),
        })
        .collect()
}

#[must_use]
pub fn key_event(code: KeyCode, modifiers: KeyModifiers) -> CrosstermEventResult {
    Ok(Event::Key(KeyEvent::new(code, modifiers)))
}

#[must_use]
pub fn ctrl_key_event(ch: char) -> CrosstermEventResult {
    key_event(KeyCode::Char(ch), KeyModifiers::CONTROL)
}
