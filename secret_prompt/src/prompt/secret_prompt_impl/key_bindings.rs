// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::KeyBindingMode;

/// What a key press means to the line editor, once the binding table has been
/// consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    Insert(String),
    Backspace,
    Delete,
    MoveLeft,
    MoveRight,
    MoveHome,
    MoveEnd,
    MoveToLast,
    MoveWordLeft,
    MoveWordRight,
    MoveNextWordStart,
    KillToStart,
    KillToEnd,
    KillPreviousWord,
    Submit,
    /// <kbd>Ctrl+C</kbd>.
    Interrupt,
    /// <kbd>Ctrl+D</kbd> with nothing typed.
    EndOfInput,
    Noop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViState {
    Insert,
    Navigation,
}

/// Facts about the line that change what a key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyContext {
    pub multiline: bool,
    pub typed_is_empty: bool,
}

/// Stateful key binding table. Vi bindings remember whether they are in insert or
/// navigation mode, and always start in insert mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub mode: KeyBindingMode,
    pub vi_state: ViState,
}

impl KeyBindings {
    #[must_use]
    pub fn new(mode: KeyBindingMode) -> Self {
        Self {
            mode,
            vi_state: ViState::Insert,
        }
    }

    pub fn resolve(&mut self, key_event: &KeyEvent, context: KeyContext) -> EditAction {
        if key_event.kind == KeyEventKind::Release {
            return EditAction::Noop;
        }

        if let Some(action) = resolve_session_keys(key_event, context, self.vi_state) {
            return action;
        }

        match (self.mode, self.vi_state) {
            (KeyBindingMode::Emacs, _) => resolve_emacs_keys(key_event)
                .unwrap_or_else(|| resolve_insert_keys(key_event)),
            (KeyBindingMode::Vi, ViState::Insert) => {
                if key_event.code == KeyCode::Esc {
                    self.vi_state = ViState::Navigation;
                    return EditAction::MoveLeft;
                }
                resolve_insert_keys(key_event)
            }
            (KeyBindingMode::Vi, ViState::Navigation) => self.resolve_vi_navigation_keys(key_event),
        }
    }

    fn resolve_vi_navigation_keys(&mut self, key_event: &KeyEvent) -> EditAction {
        if key_event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return EditAction::Noop;
        }

        match key_event.code {
            KeyCode::Char('h') | KeyCode::Left => EditAction::MoveLeft,
            KeyCode::Char('l') | KeyCode::Right => EditAction::MoveRight,
            KeyCode::Char('0') | KeyCode::Home => EditAction::MoveHome,
            KeyCode::Char('$') | KeyCode::End => EditAction::MoveToLast,
            KeyCode::Char('w') => EditAction::MoveNextWordStart,
            KeyCode::Char('b') => EditAction::MoveWordLeft,
            KeyCode::Char('x') | KeyCode::Delete => EditAction::Delete,
            KeyCode::Char('X') | KeyCode::Backspace => EditAction::Backspace,
            KeyCode::Char('D') => EditAction::KillToEnd,
            KeyCode::Char('i') => {
                self.vi_state = ViState::Insert;
                EditAction::Noop
            }
            KeyCode::Char('a') => {
                self.vi_state = ViState::Insert;
                EditAction::MoveRight
            }
            KeyCode::Char('I') => {
                self.vi_state = ViState::Insert;
                EditAction::MoveHome
            }
            KeyCode::Char('A') => {
                self.vi_state = ViState::Insert;
                EditAction::MoveEnd
            }
            _ => EditAction::Noop,
        }
    }
}

/// Keys that mean the same thing in every mode: interrupt, end of input, and submit.
fn resolve_session_keys(
    key_event: &KeyEvent,
    context: KeyContext,
    vi_state: ViState,
) -> Option<EditAction> {
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key_event.modifiers.contains(KeyModifiers::ALT);

    match key_event.code {
        KeyCode::Char('c') if ctrl => Some(EditAction::Interrupt),
        KeyCode::Char('d') if ctrl => Some(if context.typed_is_empty {
            EditAction::EndOfInput
        } else {
            EditAction::Delete
        }),
        KeyCode::Enter if !context.multiline || alt || vi_state == ViState::Navigation => {
            Some(EditAction::Submit)
        }
        KeyCode::Enter => Some(EditAction::Insert("\n".into())),
        _ => None,
    }
}

/// Emacs only motions and kills.
fn resolve_emacs_keys(key_event: &KeyEvent) -> Option<EditAction> {
    let modifiers = key_event.modifiers.difference(KeyModifiers::SHIFT);

    let action = match (key_event.code, modifiers) {
        (KeyCode::Char('a'), KeyModifiers::CONTROL) => EditAction::MoveHome,
        (KeyCode::Char('e'), KeyModifiers::CONTROL) => EditAction::MoveEnd,
        (KeyCode::Char('b'), KeyModifiers::CONTROL) => EditAction::MoveLeft,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) => EditAction::MoveRight,
        (KeyCode::Char('k'), KeyModifiers::CONTROL) => EditAction::KillToEnd,
        (KeyCode::Char('b'), KeyModifiers::ALT) | (KeyCode::Left, KeyModifiers::CONTROL) => {
            EditAction::MoveWordLeft
        }
        (KeyCode::Char('f'), KeyModifiers::ALT) | (KeyCode::Right, KeyModifiers::CONTROL) => {
            EditAction::MoveWordRight
        }
        _ => return None,
    };

    Some(action)
}

/// Plain editing keys shared by emacs and vi insert mode.
fn resolve_insert_keys(key_event: &KeyEvent) -> EditAction {
    let modifiers = key_event.modifiers.difference(KeyModifiers::SHIFT);

    match (key_event.code, modifiers) {
        (KeyCode::Char('h'), KeyModifiers::CONTROL) | (KeyCode::Backspace, _) => {
            EditAction::Backspace
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => EditAction::KillToStart,
        (KeyCode::Char('w'), KeyModifiers::CONTROL) => EditAction::KillPreviousWord,
        (KeyCode::Delete, _) => EditAction::Delete,
        (KeyCode::Left, _) => EditAction::MoveLeft,
        (KeyCode::Right, _) => EditAction::MoveRight,
        (KeyCode::Home, _) => EditAction::MoveHome,
        (KeyCode::End, _) => EditAction::MoveEnd,
        // Control+Alt is how a lot of international keyboard layouts reach certain
        // symbols, so it types a character too.
        (KeyCode::Char(ch), modifiers)
            if modifiers.is_empty()
                || modifiers == KeyModifiers::CONTROL | KeyModifiers::ALT =>
        {
            EditAction::Insert(ch.to_string())
        }
        _ => EditAction::Noop,
    }
}
