// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Validators gate submission. A prompt holds at most one, shared via
//! `Arc<dyn Validator>`, so the same rule can back many prompts. Use
//! [`ValidatorChain`] to combine several rules into that single slot.
//!
//! Lengths are counted in grapheme clusters, the same unit the prompt conceals, see
//! [`crate::grapheme_count()`].

use std::sync::Arc;

use crate::{InlineVec, grapheme_count};

/// A pure predicate over the candidate answer.
///
/// [`Validator::error_message()`] is only called after [`Validator::check()`] has
/// returned `false` for the same candidate.
pub trait Validator: Send + Sync {
    fn check(&self, candidate: &str) -> bool;

    fn error_message(&self, candidate: &str) -> String;

    /// Run [`Validator::check()`] and build the failure only when it fails.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationFailure`] carrying [`Validator::error_message()`] when the
    /// candidate is rejected.
    fn validate(&self, candidate: &str) -> Result<(), ValidationFailure> {
        if self.check(candidate) {
            Ok(())
        } else {
            Err(ValidationFailure {
                message: self.error_message(candidate),
            })
        }
    }
}

/// Recoverable: the session stays open and the message is drawn under the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub message: String,
}

fn min_length_message(min_length: usize) -> String {
    format!("input must be at least {min_length} characters")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinLengthValidator {
    pub min_length: usize,
}

impl MinLengthValidator {
    #[must_use]
    pub fn new(min_length: usize) -> Self { Self { min_length } }
}

impl Validator for MinLengthValidator {
    fn check(&self, candidate: &str) -> bool { grapheme_count(candidate) >= self.min_length }

    fn error_message(&self, _candidate: &str) -> String { min_length_message(self.min_length) }
}

/// Password strength rules. All rules are optional, and a candidate must satisfy every
/// rule that is turned on. Unless a custom message is set, the failure message names
/// the first rule that failed, checked in this order: length, capital, number, special.
///
/// ```
/// use secret_prompt::{PasswordValidator, Validator};
///
/// let validator = PasswordValidator::new().with_length(8).with_number();
/// assert!(!validator.check("abc"));
/// assert_eq!(validator.error_message("abc"), "input must be at least 8 characters");
/// assert!(validator.check("abcdefg1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordValidator {
    pub min_length: Option<usize>,
    pub needs_capital: bool,
    pub needs_number: bool,
    pub needs_special: bool,
    pub maybe_message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PasswordRule {
    Length(usize),
    Capital,
    Number,
    Special,
}

impl PasswordValidator {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    #[must_use]
    pub fn with_capital(mut self) -> Self {
        self.needs_capital = true;
        self
    }

    #[must_use]
    pub fn with_number(mut self) -> Self {
        self.needs_number = true;
        self
    }

    #[must_use]
    pub fn with_special(mut self) -> Self {
        self.needs_special = true;
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.maybe_message = Some(message.into());
        self
    }

    fn active_rules(&self) -> InlineVec<PasswordRule> {
        let mut rules = InlineVec::new();
        if let Some(min_length) = self.min_length {
            rules.push(PasswordRule::Length(min_length));
        }
        if self.needs_capital {
            rules.push(PasswordRule::Capital);
        }
        if self.needs_number {
            rules.push(PasswordRule::Number);
        }
        if self.needs_special {
            rules.push(PasswordRule::Special);
        }
        rules
    }

    fn first_failing_rule(&self, candidate: &str) -> Option<PasswordRule> {
        self.active_rules()
            .into_iter()
            .find(|rule| !rule.is_satisfied_by(candidate))
    }
}

impl PasswordRule {
    fn is_satisfied_by(self, candidate: &str) -> bool {
        match self {
            PasswordRule::Length(min_length) => grapheme_count(candidate) >= min_length,
            PasswordRule::Capital => candidate.chars().any(char::is_uppercase),
            PasswordRule::Number => candidate.chars().any(|ch| ch.is_ascii_digit()),
            PasswordRule::Special => candidate
                .chars()
                .any(|ch| !ch.is_alphanumeric() && !ch.is_whitespace()),
        }
    }

    fn message(self) -> String {
        match self {
            PasswordRule::Length(min_length) => min_length_message(min_length),
            PasswordRule::Capital => "input must contain a capital letter".into(),
            PasswordRule::Number => "input must contain a number".into(),
            PasswordRule::Special => "input must contain a special character".into(),
        }
    }
}

impl Validator for PasswordValidator {
    fn check(&self, candidate: &str) -> bool { self.first_failing_rule(candidate).is_none() }

    fn error_message(&self, candidate: &str) -> String {
        if let Some(message) = &self.maybe_message {
            return message.clone();
        }
        self.first_failing_rule(candidate)
            .map(PasswordRule::message)
            .unwrap_or_default()
    }
}

/// Wrap a closure as a [`Validator`] with a fixed failure message.
pub struct FnValidator<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    pub predicate: F,
    pub message: String,
}

impl<F> FnValidator<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    pub fn new(message: impl Into<String>, predicate: F) -> Self {
        Self {
            predicate,
            message: message.into(),
        }
    }
}

impl<F> std::fmt::Debug for FnValidator<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnValidator")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn check(&self, candidate: &str) -> bool { (self.predicate)(candidate) }

    fn error_message(&self, _candidate: &str) -> String { self.message.clone() }
}

/// Logical AND of validators. The first one to reject the candidate supplies the
/// message. An empty chain accepts everything.
#[derive(Clone, Default)]
#[allow(missing_debug_implementations)]
pub struct ValidatorChain {
    pub validators: InlineVec<Arc<dyn Validator>>,
}

impl ValidatorChain {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    #[must_use]
    pub fn with_shared(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validators.push(validator);
        self
    }
}

impl Validator for ValidatorChain {
    fn check(&self, candidate: &str) -> bool {
        self.validators.iter().all(|it| it.check(candidate))
    }

    fn error_message(&self, candidate: &str) -> String {
        self.validators
            .iter()
            .find(|it| !it.check(candidate))
            .map(|it| it.error_message(candidate))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case(0, "", true; "zero length accepts empty")]
    #[test_case(3, "ab", false)]
    #[test_case(3, "abc", true)]
    #[test_case(2, "e\u{301}\u{1f44d}", true; "counts grapheme clusters")]
    #[test_case(3, "e\u{301}\u{1f44d}", false; "combining mark is not a character")]
    fn test_min_length_check(min_length: usize, candidate: &str, expected: bool) {
        assert_eq!(MinLengthValidator::new(min_length).check(candidate), expected);
    }

    #[test]
    fn test_min_length_message() {
        let validator = MinLengthValidator::new(8);
        assert_eq!(
            validator.validate("short"),
            Err(ValidationFailure {
                message: "input must be at least 8 characters".into()
            })
        );
        assert_eq!(validator.validate("long enough"), Ok(()));
    }

    #[test]
    fn test_password_validator_length_only_matches_min_length() {
        let password = PasswordValidator::new().with_length(8);
        let min_length = MinLengthValidator::new(8);
        assert_eq!(password.check("what"), min_length.check("what"));
        assert_eq!(
            password.error_message("what"),
            min_length.error_message("what")
        );
    }

    #[test_case("abcdefgh", "input must contain a capital letter")]
    #[test_case("Abcdefgh", "input must contain a number")]
    #[test_case("Abcdefg1", "input must contain a special character")]
    #[test_case("Ab1!", "input must be at least 8 characters")]
    fn test_password_validator_names_first_failing_rule(candidate: &str, expected: &str) {
        let validator = PasswordValidator::new()
            .with_length(8)
            .with_capital()
            .with_number()
            .with_special();
        assert!(!validator.check(candidate));
        assert_eq!(validator.error_message(candidate), expected);
    }

    #[test]
    fn test_password_validator_accepts_strong_password() {
        let validator = PasswordValidator::new()
            .with_length(8)
            .with_capital()
            .with_number()
            .with_special();
        assert!(validator.check("Abcdef1!"));
    }

    #[test]
    fn test_password_validator_custom_message() {
        let validator = PasswordValidator::new()
            .with_capital()
            .with_message("weak password");
        assert_eq!(
            validator.validate("lowercase"),
            Err(ValidationFailure {
                message: "weak password".into()
            })
        );
    }

    #[test]
    fn test_password_validator_without_rules_accepts_anything() {
        assert!(PasswordValidator::new().check(""));
    }

    #[test]
    fn test_fn_validator() {
        let validator = FnValidator::new("no spaces allowed", |it: &str| !it.contains(' '));
        assert!(validator.check("abc"));
        assert!(!validator.check("a c"));
        assert_eq!(validator.error_message("a c"), "no spaces allowed");
    }

    #[test]
    fn test_chain_first_failure_wins() {
        let chain = ValidatorChain::new()
            .with(MinLengthValidator::new(4))
            .with(FnValidator::new("must start with x", |it: &str| {
                it.starts_with('x')
            }));

        assert!(chain.check("xyzw"));
        assert_eq!(
            chain.validate("ab"),
            Err(ValidationFailure {
                message: "input must be at least 4 characters".into()
            })
        );
        assert_eq!(
            chain.validate("abcd"),
            Err(ValidationFailure {
                message: "must start with x".into()
            })
        );
    }

    #[test]
    fn test_empty_chain_accepts_everything() {
        assert!(ValidatorChain::new().check(""));
    }
}
