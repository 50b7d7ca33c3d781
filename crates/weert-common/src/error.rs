//! Error types for the WeeRT tooling crates.

use thiserror::Error;

/// Result type alias for WeeRT tooling operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the WeeRT tooling crates.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    // Expression errors (30-39)
    #[error("invalid filter expression `{expr}`: {reason}")]
    InvalidExpression { expr: String, reason: String },

    // Upload errors (40-49)
    #[error("post failed with status {status}: {body}")]
    FailedPost { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Stable across releases; used for process exit codes.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidExpression { .. } => 30,
            Error::FailedPost { .. } => 40,
            Error::Transport(_) => 41,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_grouped_by_category() {
        assert_eq!(Error::Config("x".into()).code(), 10);
        assert_eq!(
            Error::InvalidExpression {
                expr: "x".into(),
                reason: "y".into(),
            }
            .code(),
            30
        );
        assert_eq!(
            Error::FailedPost {
                status: 400,
                body: String::new(),
            }
            .code(),
            40
        );
    }
}
