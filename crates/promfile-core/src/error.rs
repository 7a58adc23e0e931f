//! Shared error type across promfile crates.

use thiserror::Error;

/// Stable error codes, used in logs and by tests that assert on error classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid input / malformed config.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Sink or filesystem failure.
    Io,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Io => "IO",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PromfileError>;

/// Unified error type used by core and agent.
#[derive(Debug, Error)]
pub enum PromfileError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("io: {0}")]
    Io(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl PromfileError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PromfileError::BadRequest(_) => ErrorCode::BadRequest,
            PromfileError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            PromfileError::Io(_) => ErrorCode::Io,
            PromfileError::Internal(_) => ErrorCode::Internal,
        }
    }
}

impl From<std::io::Error> for PromfileError {
    fn from(e: std::io::Error) -> Self {
        PromfileError::Io(e.to_string())
    }
}
