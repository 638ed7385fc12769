// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
mod input_device_ext_mock;
mod key_event_fixtures;

// Re-export.
pub use input_device_ext_mock::*;
pub use key_event_fixtures::*;
