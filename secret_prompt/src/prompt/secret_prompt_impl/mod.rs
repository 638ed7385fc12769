// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod key_bindings;
pub mod masked_line_state;
pub mod render;
pub mod session;

// Re-export.
pub use key_bindings::*;
pub use masked_line_state::*;
pub use render::*;
pub use session::*;
