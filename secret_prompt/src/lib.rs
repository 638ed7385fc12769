// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # `secret_prompt`
//!
//! An async, masked ("secret") terminal prompt. It asks a single question, conceals
//! every character that is typed, optionally validates the answer before accepting it,
//! and returns the answer.
//!
//! ```text
//! ? Password: ********
//! input must be at least 10 characters
//! ```
//!
//! - The answer is the optional default value followed by what was typed. The default
//!   is concealed like everything else, and can't be erased.
//! - Validation runs on submit (and, optionally, on every edit). A rejected answer keeps
//!   the prompt open, with the validator's message shown under it.
//! - Emacs (the default) and vi key bindings.
//! - Input and output devices are injected, so a session can be driven headlessly with
//!   [`InputDeviceExtMock`] and [`OutputDeviceExt`].
//!
//! ```no_run
//! use secret_prompt::{PasswordValidator, PromptConfig, SecretPrompt};
//!
//! #[tokio::main]
//! async fn main() -> miette::Result<()> {
//!     let config = PromptConfig::new("Password:")
//!         .with_validator(PasswordValidator::new().with_length(10).with_number());
//!     let password = SecretPrompt::try_new(config)?.execute().await?;
//!     # drop(password);
//!     Ok(())
//! }
//! ```
//!
//! Logging uses [`tracing`], see [`init_tracing()`]. The answer is never logged.

#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach.
pub mod core;
pub mod prompt;

// Re-export.
pub use core::*;
pub use prompt::*;
