//! Error types for stdmark

use thiserror::Error;

/// Main error type for stdmark conversions
#[derive(Debug, Error)]
pub enum StdmarkError {
    #[error("No content found.")]
    EmptyInput,

    #[error("Date declaration not found at start of first paragraph.")]
    MissingDateHeader,

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StdmarkError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            StdmarkError::EmptyInput => 2,
            StdmarkError::MissingDateHeader => 3,
            StdmarkError::InvalidDate(_) => 4,
            _ => 1,
        }
    }
}

/// Result type using StdmarkError
pub type Result<T> = std::result::Result<T, StdmarkError>;
