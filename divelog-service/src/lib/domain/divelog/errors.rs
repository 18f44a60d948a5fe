use thiserror::Error;

/// Error for DiveLogId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiveLogIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for dive log operations
#[derive(Debug, Clone, Error)]
pub enum DiveLogError {
    #[error("Invalid dive log ID: {0}")]
    InvalidDiveLogId(#[from] DiveLogIdError),

    #[error("Dive log not found: {0}")]
    NotFound(String),

    #[error("Dive log belongs to another user")]
    Forbidden,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
