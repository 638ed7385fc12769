// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, Write};

use crossterm::{QueueableCommand, cursor,
                style::{Print, PrintStyledContent},
                terminal::{Clear, ClearType}};
use unicode_width::UnicodeWidthStr;

use crate::{PromptStyle, RenderedMessage, StyleClass};

/// Draws the prompt block in place: the prompt line with the masked input, and an
/// optional validation message on the row below. It remembers which row of the block
/// the cursor was left on, so the next draw can return to the top and clear it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptRenderer {
    pub term_cols: u16,
    /// Row of the cursor, relative to the first row of the prompt block.
    pub cursor_row: u16,
}

/// What to draw while the session is active.
#[derive(Debug, Clone, Copy)]
pub struct ActiveFrame<'a> {
    pub message: &'a RenderedMessage,
    pub masked_input: &'a str,
    pub masked_cursor_offset: usize,
    pub maybe_annotation: Option<&'a str>,
}

impl PromptRenderer {
    #[must_use]
    pub fn new(term_cols: u16) -> Self {
        Self {
            term_cols: term_cols.max(1),
            cursor_row: 0,
        }
    }

    pub fn set_term_cols(&mut self, term_cols: u16) { self.term_cols = term_cols.max(1); }

    /// # Errors
    ///
    /// Returns an error if writing to or flushing the terminal fails.
    pub fn render_active(
        &mut self,
        term: &mut dyn Write,
        style: &PromptStyle,
        frame: ActiveFrame<'_>,
    ) -> io::Result<()> {
        self.clear(term)?;

        let prompt_width = queue_message(term, style, frame.message)?;
        term.queue(PrintStyledContent(
            style.get(StyleClass::Input).apply(frame.masked_input),
        ))?;
        let last_prompt_row = self.row_of_last_column(prompt_width + frame.masked_input.width());
        let mut current_row = last_prompt_row;

        if let Some(annotation) = frame.maybe_annotation {
            term.queue(Print("\r\n"))?;
            term.queue(PrintStyledContent(
                style.get(StyleClass::Validator).apply(annotation),
            ))?;
            current_row += 1 + self.row_of_last_column(annotation.width());
        }

        let cursor_position = prompt_width + frame.masked_cursor_offset;
        let mut target_row = to_u16(cursor_position / usize::from(self.term_cols));
        let mut target_col = to_u16(cursor_position % usize::from(self.term_cols));
        // A cursor at the end of an exactly full row stays on its last column. The row
        // below was never printed, so moving down there would not scroll.
        if target_row > last_prompt_row {
            target_row = last_prompt_row;
            target_col = self.term_cols - 1;
        }

        if current_row > target_row {
            term.queue(cursor::MoveUp(current_row - target_row))?;
        }
        term.queue(cursor::MoveToColumn(target_col))?;
        self.cursor_row = target_row;

        term.flush()
    }

    /// Replace the block with its final form and move to the next line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to or flushing the terminal fails.
    pub fn render_final(
        &mut self,
        term: &mut dyn Write,
        style: &PromptStyle,
        message: &RenderedMessage,
    ) -> io::Result<()> {
        self.clear(term)?;
        queue_message(term, style, message)?;
        term.queue(Print("\r\n"))?;
        self.cursor_row = 0;
        term.flush()
    }

    /// Go back to the first column of the first row of the block, and erase everything
    /// below it.
    fn clear(&self, term: &mut dyn Write) -> io::Result<()> {
        term.queue(cursor::MoveToColumn(0))?;
        if self.cursor_row != 0 {
            term.queue(cursor::MoveUp(self.cursor_row))?;
        }
        term.queue(Clear(ClearType::FromCursorDown))?;
        Ok(())
    }

    /// After printing `width` columns from the start of a row, which row is the cursor
    /// on. A full row leaves the cursor on its last column, not on the next row.
    fn row_of_last_column(&self, width: usize) -> u16 {
        to_u16(width.saturating_sub(1) / usize::from(self.term_cols))
    }
}

fn to_u16(value: usize) -> u16 { u16::try_from(value).unwrap_or(u16::MAX) }

/// Returns the display width of what was queued.
fn queue_message(
    term: &mut dyn Write,
    style: &PromptStyle,
    message: &RenderedMessage,
) -> io::Result<usize> {
    let mut width = 0;
    for fragment in message {
        term.queue(PrintStyledContent(
            style.get(fragment.style_class).apply(fragment.text.as_str()),
        ))?;
        width += fragment.text.width();
    }
    Ok(width)
}
