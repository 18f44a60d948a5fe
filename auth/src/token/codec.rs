use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Fixed validity horizon for issued tokens: 720 hours (30 days).
pub const TOKEN_TTL_HOURS: i64 = 720;

/// Strip an optional `"Bearer "` prefix from authorization material.
///
/// Callers may hold either the full header value or a bare token; both forms
/// are accepted everywhere.
pub fn strip_bearer(header: &str) -> &str {
    header.strip_prefix("Bearer ").unwrap_or(header)
}

/// Signs and verifies compact self-contained authorization tokens.
///
/// Uses HS256 with a process-wide secret, loaded once at startup and immutable
/// for the process lifetime. Rotating the secret invalidates every outstanding
/// token; no grace-period dual-secret verification is supported.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a new codec with a signing secret.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed token for a subject, expiring [`TOKEN_TTL_HOURS`] from now.
    ///
    /// # Errors
    /// * `MissingSubject` - Subject is empty
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str, email: Option<&str>) -> Result<String, TokenError> {
        if subject.is_empty() {
            return Err(TokenError::MissingSubject);
        }

        let claims = Claims::for_subject(subject, email, TOKEN_TTL_HOURS);
        self.encode(&claims)
    }

    /// Encode arbitrary claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// Expiry is checked manually after signature verification so the
    /// comparison is strictly `now > exp` with zero leeway (clock skew is not
    /// compensated) and the expiry instant is available for caller messaging.
    ///
    /// # Errors
    /// * `Invalid` - Signature does not match
    /// * `Malformed` - Token cannot be parsed
    /// * `Expired` - Signature valid but past expiry, carries the expiry instant
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Legacy tokens may lack 'exp'; expiry is enforced below instead.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::Invalid,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        if let Some(expired_at) = token_data.claims.expires_at() {
            if Utc::now() > expired_at {
                return Err(TokenError::Expired { expired_at });
            }
        }

        Ok(token_data.claims)
    }
}
