// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::{EditAction, KeyBindings, KeyContext, MaskedLineState, PromptConfig,
            SecretPromptError, ValidationFailure, Validator};

/// Internal control flow for the session loop. This is used primarily to make testing
/// easier.
#[derive(Debug, PartialEq, Clone)]
pub enum ControlFlowExtended<T, E> {
    ReturnOk(T),
    ReturnError(E),
    Continue,
}

/// ```text
/// Active --submit, check ok--> Answered
///   ^         |
///   +- fail --+
/// ```
///
/// The check runs synchronously inside [`PromptSession::apply_key_event()`], so a
/// submission is never observable half way through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Active,
    Answered,
}

/// The state machine behind [`crate::SecretPrompt::run()`]. It owns the masked line
/// and the key binding state, and turns key events into edits, submissions, and
/// terminations. It doesn't do any I/O.
#[allow(missing_debug_implementations)]
pub struct PromptSession {
    pub line_state: MaskedLineState,
    pub key_bindings: KeyBindings,
    pub phase: SessionPhase,
    /// The latest validation failure, shown under the prompt until the next check.
    pub maybe_error_annotation: Option<ValidationFailure>,
    maybe_validator: Option<Arc<dyn Validator>>,
    validate_while_typing: bool,
    multiline: bool,
}

impl PromptSession {
    #[must_use]
    pub fn new(config: &PromptConfig) -> Self {
        Self {
            line_state: MaskedLineState::new(config.default.as_str(), config.conceal_char),
            key_bindings: KeyBindings::new(config.editing_mode.key_binding_mode()),
            phase: SessionPhase::Active,
            maybe_error_annotation: None,
            maybe_validator: config.maybe_validator.clone(),
            validate_while_typing: config.validate_while_typing,
            multiline: config.multiline,
        }
    }

    /// Apply one key press. Returns the accepted answer, a terminating error, or
    /// [`ControlFlowExtended::Continue`] to keep reading keys.
    pub fn apply_key_event(
        &mut self,
        key_event: &KeyEvent,
    ) -> ControlFlowExtended<String, SecretPromptError> {
        if self.phase == SessionPhase::Answered {
            return ControlFlowExtended::Continue;
        }

        let context = KeyContext {
            multiline: self.multiline,
            typed_is_empty: self.line_state.is_typed_empty(),
        };

        match self.key_bindings.resolve(key_event, context) {
            EditAction::Submit => self.submit(),
            EditAction::Interrupt => {
                ControlFlowExtended::ReturnError(SecretPromptError::Interrupted)
            }
            EditAction::EndOfInput => {
                ControlFlowExtended::ReturnError(SecretPromptError::TransportEof)
            }
            action => {
                self.apply_edit(&action);
                ControlFlowExtended::Continue
            }
        }
    }

    /// Pasted text is inserted as if typed. Newlines are dropped unless the prompt is
    /// multiline.
    pub fn apply_paste(&mut self, text: &str) {
        if self.phase == SessionPhase::Answered {
            return;
        }
        let text: String = text
            .chars()
            .filter(|&ch| match ch {
                '\n' => self.multiline,
                _ => !ch.is_control(),
            })
            .collect();
        self.apply_edit(&EditAction::Insert(text));
    }

    fn apply_edit(&mut self, action: &EditAction) {
        let content_changed = self.line_state.apply(action);
        if content_changed && self.validate_while_typing {
            self.maybe_error_annotation = self.check_content().err();
        }
    }

    fn submit(&mut self) -> ControlFlowExtended<String, SecretPromptError> {
        let candidate = self.line_state.content();

        match self.check(&candidate) {
            Ok(()) => {
                self.phase = SessionPhase::Answered;
                self.maybe_error_annotation = None;
                ControlFlowExtended::ReturnOk(candidate)
            }
            Err(failure) => {
                tracing::debug!(
                    message_len = failure.message.len(),
                    "secret prompt submission rejected"
                );
                self.maybe_error_annotation = Some(failure);
                ControlFlowExtended::Continue
            }
        }
    }

    fn check_content(&self) -> Result<(), ValidationFailure> {
        self.check(&self.line_state.content())
    }

    fn check(&self, candidate: &str) -> Result<(), ValidationFailure> {
        match &self.maybe_validator {
            Some(validator) => validator.validate(candidate),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crossterm::event::{KeyCode, KeyModifiers};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{EditingMode, MinLengthValidator};

    fn press(
        session: &mut PromptSession,
        code: KeyCode,
    ) -> ControlFlowExtended<String, SecretPromptError> {
        session.apply_key_event(&KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(session: &mut PromptSession, text: &str) {
        for ch in text.chars() {
            assert_eq!(
                press(session, KeyCode::Char(ch)),
                ControlFlowExtended::Continue
            );
        }
    }

    /// Counts how many times it was asked to check a candidate.
    struct CountingValidator {
        inner: MinLengthValidator,
        checks: Arc<AtomicUsize>,
    }

    impl Validator for CountingValidator {
        fn check(&self, candidate: &str) -> bool {
            self.checks.fetch_add(1, Ordering::SeqCst);
            self.inner.check(candidate)
        }

        fn error_message(&self, candidate: &str) -> String {
            self.inner.error_message(candidate)
        }
    }

    impl PartialEq for SecretPromptError {
        fn eq(&self, other: &Self) -> bool { self.to_string() == other.to_string() }
    }

    #[test]
    fn test_default_is_concatenated() {
        let config = PromptConfig::new("q").with_default("yes");
        let mut session = PromptSession::new(&config);
        type_str(&mut session, "what");
        assert_eq!(
            press(&mut session, KeyCode::Enter),
            ControlFlowExtended::ReturnOk("yeswhat".into())
        );
        assert_eq!(session.phase, SessionPhase::Answered);
    }

    #[test]
    fn test_validation_gates_submission() {
        let checks = Arc::new(AtomicUsize::new(0));
        let config = PromptConfig::new("q").with_validator(CountingValidator {
            inner: MinLengthValidator::new(8),
            checks: checks.clone(),
        });
        let mut session = PromptSession::new(&config);

        type_str(&mut session, "short");
        assert_eq!(press(&mut session, KeyCode::Enter), ControlFlowExtended::Continue);
        assert_eq!(checks.load(Ordering::SeqCst), 1);
        assert_eq!(session.phase, SessionPhase::Active);
        assert_eq!(
            session.maybe_error_annotation,
            Some(ValidationFailure {
                message: "input must be at least 8 characters".into()
            })
        );
        // The buffer is kept, so the user can keep typing.
        assert_eq!(session.line_state.typed(), "short");

        type_str(&mut session, "er!!");
        assert_eq!(
            press(&mut session, KeyCode::Enter),
            ControlFlowExtended::ReturnOk("shorter!!".into())
        );
        assert_eq!(checks.load(Ordering::SeqCst), 2);
        assert_eq!(session.maybe_error_annotation, None);
    }

    #[test]
    fn test_validator_only_runs_on_submit_by_default() {
        let checks = Arc::new(AtomicUsize::new(0));
        let config = PromptConfig::new("q").with_validator(CountingValidator {
            inner: MinLengthValidator::new(2),
            checks: checks.clone(),
        });
        let mut session = PromptSession::new(&config);
        type_str(&mut session, "abc");
        assert_eq!(checks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_validate_while_typing() {
        let config = PromptConfig::new("q")
            .with_validator(MinLengthValidator::new(3))
            .with_validate_while_typing(true);
        let mut session = PromptSession::new(&config);

        type_str(&mut session, "a");
        assert!(session.maybe_error_annotation.is_some());
        type_str(&mut session, "bc");
        assert_eq!(session.maybe_error_annotation, None);

        // Cursor motion doesn't change the content, so the annotation stays put.
        press(&mut session, KeyCode::Backspace);
        assert!(session.maybe_error_annotation.is_some());
        press(&mut session, KeyCode::Left);
        assert!(session.maybe_error_annotation.is_some());
    }

    #[test]
    fn test_ctrl_c_interrupts() {
        let mut session = PromptSession::new(&PromptConfig::new("q"));
        type_str(&mut session, "abc");
        assert_eq!(
            session.apply_key_event(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            ControlFlowExtended::ReturnError(SecretPromptError::Interrupted)
        );
    }

    #[test]
    fn test_ctrl_d_on_empty_ends_input() {
        let config = PromptConfig::new("q").with_default("yes");
        let mut session = PromptSession::new(&config);
        assert_eq!(
            session.apply_key_event(&KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            ControlFlowExtended::ReturnError(SecretPromptError::TransportEof)
        );
    }

    #[test]
    fn test_vi_editing() {
        let config = PromptConfig::new("q").with_editing_mode(EditingMode::Vi);
        let mut session = PromptSession::new(&config);
        type_str(&mut session, "abc");
        press(&mut session, KeyCode::Esc);
        type_str(&mut session, "0x");
        assert_eq!(
            press(&mut session, KeyCode::Enter),
            ControlFlowExtended::ReturnOk("bc".into())
        );
    }

    #[test]
    fn test_multiline_enter_inserts_newline() {
        let config = PromptConfig::new("q").with_multiline(true);
        let mut session = PromptSession::new(&config);
        type_str(&mut session, "a");
        press(&mut session, KeyCode::Enter);
        type_str(&mut session, "b");
        assert_eq!(
            session.apply_key_event(&KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT)),
            ControlFlowExtended::ReturnOk("a\nb".into())
        );
    }

    #[test]
    fn test_paste() {
        let mut session = PromptSession::new(&PromptConfig::new("q"));
        session.apply_paste("pass\nword\t!");
        assert_eq!(session.line_state.typed(), "password!");
    }

    #[test]
    fn test_keys_after_answer_are_ignored() {
        let mut session = PromptSession::new(&PromptConfig::new("q"));
        type_str(&mut session, "a");
        assert_eq!(
            press(&mut session, KeyCode::Enter),
            ControlFlowExtended::ReturnOk("a".into())
        );
        assert_eq!(press(&mut session, KeyCode::Char('b')), ControlFlowExtended::Continue);
        assert_eq!(session.line_state.typed(), "a");
    }
}
