// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Ask for a secret on the terminal and print the answer to `stdout`.
//!
//! ```text
//! secret "API token:" --min-length 20 --editing-mode vim --log-file /tmp/secret.log
//! ```

use std::str::FromStr;

use clap::Parser;
use secret_prompt::{ConfigurationError, PasswordValidator, PromptConfig, SecretPrompt,
                    StyleClass, TracingConfig, init_tracing};

use crate::clap_config::CLIArgs;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli_args = CLIArgs::parse();

    if let Some(log_file) = cli_args.log_file.clone() {
        init_tracing(TracingConfig::new_file(Some(log_file), cli_args.log_level))?;
    }

    let mut prompt = SecretPrompt::try_new(cli_args.into_prompt_config())?;
    let answer = prompt.execute().await?;
    println!("{answer}");

    Ok(())
}

/// Parse `CLASS=STYLE`, eg: `answer=bold #ff79c6`.
fn parse_style_override(arg: &str) -> Result<(StyleClass, String), ConfigurationError> {
    let (name, style_str) = arg.split_once('=').unwrap_or((arg, ""));
    let style_class = StyleClass::from_str(name.trim()).map_err(|_| {
        ConfigurationError::UnknownStyleClass {
            name: name.to_string(),
        }
    })?;
    Ok((style_class, style_str.to_string()))
}

mod clap_config {
    use clap::Parser;
    use secret_prompt::{EditingMode, StyleClass};
    use tracing_core::LevelFilter;

    use super::{PasswordValidator, PromptConfig, parse_style_override};

    /// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
    #[derive(Debug, Parser)]
    #[command(bin_name = "secret")]
    #[command(about = "Ask for a secret without echoing it, then print it to stdout")]
    #[command(version)]
    #[command(next_line_help = true)]
    pub struct CLIArgs {
        /// The question to ask.
        #[arg(default_value = "Password:")]
        pub message: String,

        /// Prefix of the answer. It is concealed, and can't be erased.
        #[arg(long)]
        pub default: Option<String>,

        #[arg(long, default_value = "?")]
        pub qmark: String,

        #[arg(long, short = 'e', value_enum, default_value_t = EditingMode::Default)]
        pub editing_mode: EditingMode,

        /// Reject answers shorter than this many characters.
        #[arg(long)]
        pub min_length: Option<usize>,

        #[arg(long)]
        pub require_capital: bool,

        #[arg(long)]
        pub require_number: bool,

        #[arg(long)]
        pub require_special: bool,

        /// Replace the validation message.
        #[arg(long)]
        pub validation_message: Option<String>,

        /// Check the answer after every edit, not just on submit.
        #[arg(long)]
        pub validate_while_typing: bool,

        /// Enter inserts a newline, Alt+Enter submits.
        #[arg(long)]
        pub multiline: bool,

        #[arg(long, default_value_t = '*')]
        pub conceal_char: char,

        /// `CLASS=STYLE`, eg: `--style "answer=bold #ff79c6"`. Can be repeated.
        #[arg(long, value_parser = parse_style_override)]
        pub style: Vec<(StyleClass, String)>,

        /// Write logs to this file. Nothing is logged otherwise.
        #[arg(long, short = 'l')]
        pub log_file: Option<String>,

        #[arg(long, default_value_t = LevelFilter::DEBUG)]
        pub log_level: LevelFilter,
    }

    impl CLIArgs {
        fn maybe_validator(&self) -> Option<PasswordValidator> {
            let has_rules = self.min_length.is_some()
                || self.require_capital
                || self.require_number
                || self.require_special;
            if !has_rules {
                return None;
            }

            let mut validator = PasswordValidator::new();
            if let Some(min_length) = self.min_length {
                validator = validator.with_length(min_length);
            }
            if self.require_capital {
                validator = validator.with_capital();
            }
            if self.require_number {
                validator = validator.with_number();
            }
            if self.require_special {
                validator = validator.with_special();
            }
            if let Some(message) = &self.validation_message {
                validator = validator.with_message(message.as_str());
            }
            Some(validator)
        }

        pub fn into_prompt_config(self) -> PromptConfig {
            let maybe_validator = self.maybe_validator();

            let mut config = PromptConfig::new(self.message)
                .with_default(self.default.unwrap_or_default())
                .with_qmark(self.qmark)
                .with_editing_mode(self.editing_mode)
                .with_validate_while_typing(self.validate_while_typing)
                .with_multiline(self.multiline)
                .with_conceal_char(self.conceal_char);

            for (style_class, style_str) in self.style {
                config = config.with_style(style_class, style_str);
            }

            if let Some(validator) = maybe_validator {
                config = config.with_validator(validator);
            }

            config
        }
    }
}
