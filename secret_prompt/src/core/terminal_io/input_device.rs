// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::EventStream;
use futures_util::{FutureExt, StreamExt};

use crate::{CrosstermEventResult, PinnedInputStream};

/// This struct represents an input device that the prompt reads key events from. See
/// [`crate::InputDeviceExtMock`] for testing features.
///
/// The stream ending (yielding [None]) means the transport has closed, and no more
/// keystrokes will ever arrive.
#[allow(missing_debug_implementations)]
pub struct InputDevice {
    pub resource: PinnedInputStream<CrosstermEventResult>,
}

impl Default for InputDevice {
    fn default() -> Self { Self::new_event_stream() }
}

impl InputDevice {
    #[must_use]
    pub fn new_event_stream() -> InputDevice {
        InputDevice {
            resource: Box::pin(EventStream::new()),
        }
    }
}

impl InputDevice {
    /// Returns [None] when the underlying stream is exhausted.
    pub async fn next(&mut self) -> Option<CrosstermEventResult> {
        self.resource.next().fuse().await
    }
}
