// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::str::FromStr;

use crate::ConfigurationError;

/// How the user asked to edit. Parses case-insensitively from `"default"`, `"vi"` /
/// `"vim"` and `"emacs"`.
///
/// ```
/// use std::str::FromStr;
/// use secret_prompt::{EditingMode, KeyBindingMode};
///
/// let mode = EditingMode::from_str("VIM").unwrap();
/// assert_eq!(mode, EditingMode::Vi);
/// assert_eq!(mode.key_binding_mode(), KeyBindingMode::Vi);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    strum_macros::EnumString,
    strum_macros::Display,
    clap::ValueEnum,
)]
#[strum(ascii_case_insensitive)]
pub enum EditingMode {
    #[default]
    #[strum(to_string = "default")]
    Default,
    #[strum(to_string = "vim", serialize = "vi")]
    #[value(alias = "vim")]
    Vi,
    #[strum(to_string = "emacs")]
    Emacs,
}

/// The key binding table the line editor actually uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum KeyBindingMode {
    #[strum(to_string = "emacs")]
    Emacs,
    #[strum(to_string = "vi")]
    Vi,
}

impl EditingMode {
    /// [`EditingMode::Default`] uses the emacs bindings.
    #[must_use]
    pub fn key_binding_mode(self) -> KeyBindingMode {
        match self {
            EditingMode::Default | EditingMode::Emacs => KeyBindingMode::Emacs,
            EditingMode::Vi => KeyBindingMode::Vi,
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownEditingMode`] for anything other than the
    /// supported names.
    pub fn try_parse(input: &str) -> Result<Self, ConfigurationError> {
        EditingMode::from_str(input.trim()).map_err(|_| ConfigurationError::UnknownEditingMode {
            input: input.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("default", EditingMode::Default)]
    #[test_case("vim", EditingMode::Vi)]
    #[test_case("vi", EditingMode::Vi)]
    #[test_case("Emacs", EditingMode::Emacs)]
    #[test_case(" VIM ", EditingMode::Vi; "surrounding whitespace")]
    fn test_try_parse(input: &str, expected: EditingMode) {
        assert_eq!(EditingMode::try_parse(input).unwrap(), expected);
    }

    #[test]
    fn test_try_parse_unknown() {
        assert!(matches!(
            EditingMode::try_parse("nano"),
            Err(ConfigurationError::UnknownEditingMode { .. })
        ));
    }

    #[test_case(EditingMode::Default, KeyBindingMode::Emacs)]
    #[test_case(EditingMode::Emacs, KeyBindingMode::Emacs)]
    #[test_case(EditingMode::Vi, KeyBindingMode::Vi)]
    fn test_key_binding_mode(mode: EditingMode, expected: KeyBindingMode) {
        assert_eq!(mode.key_binding_mode(), expected);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        assert_eq!(EditingMode::Vi.to_string(), "vim");
        assert_eq!(EditingMode::default().to_string(), "default");
    }
}
