//! Error types for fibproc.

use thiserror::Error;

/// Standard result type for fibproc.
pub type FibprocResult<T> = Result<T, FibprocError>;

/// Errors that fibproc can produce.
#[derive(Error, Debug)]
pub enum FibprocError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Arithmetic overflow in {operation} (input: {input})")]
    Overflow {
        /// Operation that overflowed.
        operation: &'static str,
        /// Offending input, rendered for the message.
        input: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl FibprocError {
    /// Creates a configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an overflow error for `operation` on `input`.
    pub fn overflow(operation: &'static str, input: impl ToString) -> Self {
        Self::Overflow {
            operation,
            input: input.to_string(),
        }
    }
}
