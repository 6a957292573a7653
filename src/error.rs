//! Error type for the IO, validation and CLI boundaries.
//!
//! The scoring core never returns errors: missing data degrades coverage instead.
//! Only loading inputs/tables, validation and writing outputs can fail.
//!
//! Exit codes:
//! - `2` usage, configuration or filesystem problems
//! - `3` invalid input data

use thiserror::Error;

#[derive(Clone, Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}
