use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The account has no stored credential at all. Kept distinct from a
    /// failed comparison so callers can tell "wrong password" apart from
    /// "nothing to compare against".
    #[error("No password hash stored for this account")]
    MissingHash,
}
