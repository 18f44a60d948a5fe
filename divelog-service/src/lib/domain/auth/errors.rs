use auth::TokenError;
use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

use crate::user::errors::UserError;

/// Authentication outcome taxonomy.
///
/// Verification never reduces to a bare boolean: every non-success outcome is
/// one of these variants, and the HTTP layer maps each to a specific status
/// and machine code. The local-strategy variants (`UserNotFound`,
/// `InvalidPassword`) carry codes so login forms can show specific prompts;
/// the bearer-path variants stay generic to avoid oracle leaks.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Caller supplied malformed input (400-class).
    #[error("{0}")]
    InvalidArgument(String),

    /// Local strategy: no account for this email (401, code USER_NOT_FOUND).
    #[error("Usuário não encontrado")]
    UserNotFound,

    /// Local strategy: wrong or absent stored credential (401, code
    /// INVALID_PASSWORD). Absent and wrong are merged on purpose so the
    /// response does not open a second enumeration channel.
    #[error("Senha incorreta")]
    InvalidPassword,

    /// Bearer path: no credential presented or no identity resolvable (401,
    /// generic message only).
    #[error("Não autenticado")]
    NotAuthenticated,

    /// Bearer path: token unparseable or signature mismatch (401).
    #[error("Token inválido")]
    TokenInvalid,

    /// Bearer path: signature valid but past expiry (401, carries the expiry
    /// instant for the response body).
    #[error("Token expirado em {expired_at}")]
    TokenExpired { expired_at: DateTime<Utc> },

    /// Store failure underneath a verification (500-class).
    #[error("Repository error: {0}")]
    Repository(String),

    /// Anything unclassified (500-class).
    #[error("{0}")]
    Unknown(String),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed(_) | TokenError::Invalid => AuthError::TokenInvalid,
            TokenError::Expired { expired_at } => AuthError::TokenExpired { expired_at },
            TokenError::MissingSubject | TokenError::EncodingFailed(_) => {
                AuthError::Unknown(err.to_string())
            }
        }
    }
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DatabaseError(e) => AuthError::Repository(e),
            other => AuthError::Unknown(other.to_string()),
        }
    }
}
