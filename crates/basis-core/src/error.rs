//! Core error types.

use thiserror::Error;

/// Errors raised by core type construction and wire parsing.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("malformed event: {0}")]
    MalformedEvent(#[from] serde_json::Error),

    #[error("tick size must be positive, got {0}")]
    InvalidTickSize(u64),

    #[error("position limit must be positive, got {0}")]
    InvalidPositionLimit(i64),
}

pub type CoreResult<T> = Result<T, CoreError>;
