// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

/// Rejected at [`crate::SecretPrompt::try_new()`], before anything is drawn.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigurationError {
    #[error("conceal char {conceal_char:?} is {display_width} columns wide, it must be 1")]
    #[diagnostic(
        code(secret_prompt::config::conceal_char_width),
        help("Use a single column glyph such as '*' or '•'")
    )]
    ConcealCharWidth {
        conceal_char: char,
        display_width: usize,
    },

    #[error("malformed style for {style_class}: {reason} in {token:?}")]
    #[diagnostic(
        code(secret_prompt::config::malformed_style),
        help(
            "Style strings are space separated tokens: #rrggbb, fg:#rrggbb, \
             bg:#rrggbb, a colour name, bold, italic, underline, reverse, dim, noinherit"
        )
    )]
    MalformedStyle {
        style_class: String,
        token: String,
        reason: &'static str,
    },

    #[error("unknown style class {name:?}")]
    #[diagnostic(
        code(secret_prompt::config::unknown_style_class),
        help("Known classes: questionmark, question, instruction, answer, input, validator")
    )]
    UnknownStyleClass { name: String },

    #[error("default value contains a newline, but the prompt is not multiline")]
    #[diagnostic(
        code(secret_prompt::config::default_newline),
        help("Enable multiline, or remove the newline from the default")
    )]
    DefaultContainsNewline,

    #[error("default value contains the control character {control_char:?}")]
    #[diagnostic(code(secret_prompt::config::default_control_char))]
    DefaultContainsControlChar { control_char: char },

    #[error("unknown editing mode {input:?}")]
    #[diagnostic(
        code(secret_prompt::config::unknown_editing_mode),
        help("Use one of: default, vi, vim, emacs")
    )]
    UnknownEditingMode { input: String },
}

/// Everything that can end a prompt without an answer.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum SecretPromptError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The input stream closed (or <kbd>Ctrl+D</kbd> on empty input) before an answer
    /// was accepted.
    #[error("input ended before an answer was accepted")]
    #[diagnostic(code(secret_prompt::session::eof))]
    TransportEof,

    /// <kbd>Ctrl+C</kbd>.
    #[error("prompt was interrupted")]
    #[diagnostic(code(secret_prompt::session::interrupted))]
    Interrupted,

    #[error("this prompt has already been run")]
    #[diagnostic(
        code(secret_prompt::session::already_used),
        help("Create a new SecretPrompt for every question")
    )]
    SessionAlreadyUsed,

    #[error("stdin or stdout is not a terminal")]
    #[diagnostic(
        code(secret_prompt::session::not_interactive),
        help("A secret prompt can't run when stdin or stdout is piped")
    )]
    NotInteractive,

    #[error(transparent)]
    #[diagnostic(code(secret_prompt::io))]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_converts() {
        let error: SecretPromptError = ConfigurationError::DefaultContainsNewline.into();
        assert!(matches!(
            error,
            SecretPromptError::Configuration(ConfigurationError::DefaultContainsNewline)
        ));
    }

    #[test]
    fn test_diagnostic_code() {
        use miette::Diagnostic;
        let error = SecretPromptError::SessionAlreadyUsed;
        assert_eq!(
            error.code().map(|it| it.to_string()),
            Some("secret_prompt::session::already_used".to_string())
        );
    }
}
