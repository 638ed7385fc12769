// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Debug, Formatter, Result};

/// Whether the prompt has produced its answer yet. There is a single writer (the
/// session controller inside [`crate::SecretPrompt::run()`]) and it transitions
/// [`PromptStatus::Unanswered`] to [`PromptStatus::Answered`] exactly once.
///
/// Having the result live inside the `Answered` variant means there is no way to
/// represent "answered without a result" or "unanswered with a result".
#[derive(Clone, PartialEq, Eq, Default)]
pub enum PromptStatus {
    #[default]
    Unanswered,
    Answered(String),
}

impl PromptStatus {
    #[must_use]
    pub fn is_answered(&self) -> bool { matches!(self, PromptStatus::Answered(_)) }

    #[must_use]
    pub fn result(&self) -> Option<&str> {
        match self {
            PromptStatus::Unanswered => None,
            PromptStatus::Answered(result) => Some(result.as_str()),
        }
    }
}

/// The answer is a secret, so it never shows up in `{:?}` output (eg: in a log line or a
/// failed assertion).
impl Debug for PromptStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            PromptStatus::Unanswered => write!(f, "Unanswered"),
            PromptStatus::Answered(_) => write!(f, "Answered(<redacted>)"),
        }
    }
}
