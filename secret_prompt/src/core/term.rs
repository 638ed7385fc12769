// Copyright (c) 2023-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::IsTerminal;

pub const DEFAULT_WIDTH: u16 = 80;

/// Get the terminal width. If there is a problem (eg: running headless under
/// `cargo test`), return [`DEFAULT_WIDTH`].
#[must_use]
pub fn get_terminal_width() -> u16 {
    match crossterm::terminal::size() {
        Ok((columns, _rows)) if columns > 0 => columns,
        _ => DEFAULT_WIDTH,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdinIsPipedResult {
    StdinIsPiped,
    StdinIsNotPiped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdoutIsPipedResult {
    StdoutIsPiped,
    StdoutIsNotPiped,
}

/// If you run `echo "test" | cargo run` the following will return
/// [`StdinIsPipedResult::StdinIsPiped`].
/// More info: <https://unix.stackexchange.com/questions/597083/how-does-piping-affect-stdin>
#[must_use]
pub fn is_stdin_piped() -> StdinIsPipedResult {
    if std::io::stdin().is_terminal() {
        StdinIsPipedResult::StdinIsNotPiped
    } else {
        StdinIsPipedResult::StdinIsPiped
    }
}

/// If you run `cargo run | grep foo` the following will return
/// [`StdoutIsPipedResult::StdoutIsPiped`].
#[must_use]
pub fn is_stdout_piped() -> StdoutIsPipedResult {
    if std::io::stdout().is_terminal() {
        StdoutIsPipedResult::StdoutIsNotPiped
    } else {
        StdoutIsPipedResult::StdoutIsPiped
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TTYResult {
    IsInteractive,
    IsNotInteractive,
}

/// A secret prompt needs to read keystrokes from a terminal and draw to one. If either
/// `stdin` or `stdout` is redirected, there is no terminal to conceal input on.
#[must_use]
pub fn is_prompt_interactive() -> TTYResult {
    match (is_stdin_piped(), is_stdout_piped()) {
        (StdinIsPipedResult::StdinIsNotPiped, StdoutIsPipedResult::StdoutIsNotPiped) => {
            TTYResult::IsInteractive
        }
        _ => TTYResult::IsNotInteractive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_width_is_never_zero() {
        assert!(get_terminal_width() > 0);
    }
}
