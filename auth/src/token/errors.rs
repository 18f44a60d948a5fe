use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

/// Error type for token operations.
///
/// `Malformed`, `Invalid` and `Expired` stay distinguishable all the way to
/// the HTTP boundary: a tampered token, an unparseable token and a stale one
/// produce different user-facing messages.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Cannot issue a token without a subject")]
    MissingSubject,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    Invalid,

    #[error("Token expired at {expired_at}")]
    Expired { expired_at: DateTime<Utc> },
}
