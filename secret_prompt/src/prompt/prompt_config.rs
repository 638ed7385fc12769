// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          sync::Arc};

use unicode_width::UnicodeWidthChar;

use crate::{ConfigurationError, EditingMode, InlineVec, PromptStyle, StyleClass,
            Validator};

pub const DEFAULT_QMARK: &str = "?";
pub const DEFAULT_CONCEAL_CHAR: char = '*';

/// Everything needed to build a [`crate::SecretPrompt`]. This is immutable once the
/// prompt is constructed. The input and output devices are not part of the
/// configuration, they are lent to [`crate::SecretPrompt::run()`].
///
/// ```
/// use secret_prompt::{EditingMode, MinLengthValidator, PromptConfig, StyleClass};
///
/// let config = PromptConfig::new("Password:")
///     .with_qmark("[?]")
///     .with_editing_mode(EditingMode::Vi)
///     .with_validator(MinLengthValidator::new(8))
///     .with_style(StyleClass::Answer, "bold #ff79c6");
/// assert!(config.try_resolve_style().is_ok());
/// ```
#[derive(Clone)]
pub struct PromptConfig {
    pub message: String,
    /// Overrides applied over the default palette, in order.
    pub style: InlineVec<(StyleClass, String)>,
    /// Frozen prefix of the answer. Empty means no default.
    pub default: String,
    pub qmark: String,
    pub editing_mode: EditingMode,
    pub maybe_validator: Option<Arc<dyn Validator>>,
    pub validate_while_typing: bool,
    pub multiline: bool,
    pub conceal_char: char,
}

impl PromptConfig {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            style: InlineVec::new(),
            default: String::new(),
            qmark: DEFAULT_QMARK.to_string(),
            editing_mode: EditingMode::default(),
            maybe_validator: None,
            validate_while_typing: false,
            multiline: false,
            conceal_char: DEFAULT_CONCEAL_CHAR,
        }
    }

    #[must_use]
    pub fn with_style(mut self, style_class: StyleClass, style_str: impl Into<String>) -> Self {
        self.style.push((style_class, style_str.into()));
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    #[must_use]
    pub fn with_qmark(mut self, qmark: impl Into<String>) -> Self {
        self.qmark = qmark.into();
        self
    }

    #[must_use]
    pub fn with_editing_mode(mut self, editing_mode: EditingMode) -> Self {
        self.editing_mode = editing_mode;
        self
    }

    #[must_use]
    pub fn with_validator(self, validator: impl Validator + 'static) -> Self {
        self.with_shared_validator(Arc::new(validator))
    }

    #[must_use]
    pub fn with_shared_validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.maybe_validator = Some(validator);
        self
    }

    #[must_use]
    pub fn with_validate_while_typing(mut self, validate_while_typing: bool) -> Self {
        self.validate_while_typing = validate_while_typing;
        self
    }

    #[must_use]
    pub fn with_multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    #[must_use]
    pub fn with_conceal_char(mut self, conceal_char: char) -> Self {
        self.conceal_char = conceal_char;
        self
    }
}

impl PromptConfig {
    /// Check the configuration, and resolve the style overrides.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::ConcealCharWidth`] if the conceal char isn't exactly one
    ///   column wide.
    /// - [`ConfigurationError::DefaultContainsNewline`] or
    ///   [`ConfigurationError::DefaultContainsControlChar`] for a default that can't be
    ///   typed into this prompt.
    /// - [`ConfigurationError::MalformedStyle`] for a bad style string.
    pub fn try_resolve_style(&self) -> Result<PromptStyle, ConfigurationError> {
        let display_width = self.conceal_char.width().unwrap_or(0);
        if display_width != 1 {
            return Err(ConfigurationError::ConcealCharWidth {
                conceal_char: self.conceal_char,
                display_width,
            });
        }

        for ch in self.default.chars() {
            match ch {
                '\n' if self.multiline => {}
                '\n' => return Err(ConfigurationError::DefaultContainsNewline),
                _ if ch.is_control() => {
                    return Err(ConfigurationError::DefaultContainsControlChar {
                        control_char: ch,
                    });
                }
                _ => {}
            }
        }

        PromptStyle::try_new(&self.style)
    }
}

/// The default is part of the secret, so it is never printed here.
impl Debug for PromptConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptConfig")
            .field("message", &self.message)
            .field("style", &self.style)
            .field("has_default", &!self.default.is_empty())
            .field("qmark", &self.qmark)
            .field("editing_mode", &self.editing_mode)
            .field("has_validator", &self.maybe_validator.is_some())
            .field("validate_while_typing", &self.validate_while_typing)
            .field("multiline", &self.multiline)
            .field("conceal_char", &self.conceal_char)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = PromptConfig::new("Password:");
        assert_eq!(config.qmark, "?");
        assert_eq!(config.conceal_char, '*');
        assert_eq!(config.editing_mode, EditingMode::Default);
        assert!(config.default.is_empty());
        assert!(config.maybe_validator.is_none());
        assert!(!config.multiline);
        assert!(!config.validate_while_typing);
        assert!(config.try_resolve_style().is_ok());
    }

    #[test_case('\u{1f511}'; "wide emoji")]
    #[test_case('\u{301}'; "zero width combining mark")]
    #[test_case('\t'; "control char")]
    fn test_conceal_char_must_be_one_column(conceal_char: char) {
        let config = PromptConfig::new("q").with_conceal_char(conceal_char);
        assert!(matches!(
            config.try_resolve_style(),
            Err(ConfigurationError::ConcealCharWidth { .. })
        ));
    }

    #[test]
    fn test_default_with_newline_needs_multiline() {
        let config = PromptConfig::new("q").with_default("a\nb");
        assert!(matches!(
            config.try_resolve_style(),
            Err(ConfigurationError::DefaultContainsNewline)
        ));
        assert!(config.with_multiline(true).try_resolve_style().is_ok());
    }

    #[test]
    fn test_default_with_control_char() {
        let config = PromptConfig::new("q").with_default("a\u{7}b");
        assert!(matches!(
            config.try_resolve_style(),
            Err(ConfigurationError::DefaultContainsControlChar { control_char: '\u{7}' })
        ));
    }

    #[test]
    fn test_malformed_style() {
        let config = PromptConfig::new("q").with_style(StyleClass::Input, "#zzzzzz");
        assert!(matches!(
            config.try_resolve_style(),
            Err(ConfigurationError::MalformedStyle { .. })
        ));
    }

    #[test]
    fn test_debug_hides_default() {
        let config = PromptConfig::new("q").with_default("hunter2");
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
