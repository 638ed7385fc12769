// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use async_stream::stream;

use crate::{CrosstermEventResult, InlineVec, InputDevice, PinnedInputStream};

/// Replays `events` in order, then ends. Ending the stream is how tests simulate the
/// terminal going away mid-prompt.
#[must_use]
pub fn gen_event_stream(
    events: InlineVec<CrosstermEventResult>,
) -> PinnedInputStream<CrosstermEventResult> {
    let it = stream! {
        for event in events {
            yield event;
        }
    };
    Box::pin(it)
}

pub trait InputDeviceExtMock {
    fn new_mock(events: InlineVec<CrosstermEventResult>) -> InputDevice;
}

impl InputDeviceExtMock for InputDevice {
    fn new_mock(events: InlineVec<CrosstermEventResult>) -> InputDevice {
        InputDevice {
            resource: gen_event_stream(events),
        }
    }
}
