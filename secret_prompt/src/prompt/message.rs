// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The prompt line is a short list of styled fragments. It is recomputed from the
//! [`PromptStatus`] every time it is drawn, and only ever reads the answer through the
//! status, never through the line editor.

use crate::{InlineVec, PromptConfig, PromptStatus, conceal};

/// Style classes used by the prompt. [`StyleClass::class_name()`] gives the
/// `class:<name>` form used by host renderers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumString,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StyleClass {
    QuestionMark,
    Question,
    Instruction,
    Answer,
    Input,
    Validator,
}

impl StyleClass {
    #[must_use]
    pub fn class_name(self) -> String { format!("class:{self}") }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledFragment {
    pub style_class: StyleClass,
    pub text: String,
}

impl StyledFragment {
    pub fn new(style_class: StyleClass, text: impl Into<String>) -> Self {
        Self {
            style_class,
            text: text.into(),
        }
    }

    /// `(class name, text)`, eg: `("class:question", " fooboo")`.
    #[must_use]
    pub fn as_pair(&self) -> (String, &str) { (self.style_class.class_name(), &self.text) }
}

pub type RenderedMessage = InlineVec<StyledFragment>;

/// 1. `questionmark`: the qmark.
/// 2. `question`: a space and the message.
/// 3. `instruction`: a single space while unanswered, or `answer`: a space and one
///    conceal char per character of the result once answered.
#[must_use]
pub fn compose_message(config: &PromptConfig, status: &PromptStatus) -> RenderedMessage {
    let mut message = RenderedMessage::new();
    message.push(StyledFragment::new(
        StyleClass::QuestionMark,
        config.qmark.as_str(),
    ));
    message.push(StyledFragment::new(
        StyleClass::Question,
        format!(" {}", config.message),
    ));
    match status.result() {
        None => message.push(StyledFragment::new(StyleClass::Instruction, " ")),
        Some(result) => message.push(StyledFragment::new(
            StyleClass::Answer,
            format!(" {}", conceal(result, config.conceal_char)),
        )),
    }
    message
}

/// Text of all the fragments, without styling.
#[must_use]
pub fn plain_text(message: &RenderedMessage) -> String {
    message.iter().map(|it| it.text.as_str()).collect()
}
