// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod editing_mode;
pub mod message;
pub mod prompt_config;
pub mod prompt_status;
pub mod prompt_style;
pub mod secret_prompt_api;
pub mod secret_prompt_error;
pub mod secret_prompt_impl;
pub mod validator;

// Re-export.
pub use editing_mode::*;
pub use message::*;
pub use prompt_config::*;
pub use prompt_status::*;
pub use prompt_style::*;
pub use secret_prompt_api::*;
pub use secret_prompt_error::*;
pub use secret_prompt_impl::*;
pub use validator::*;
