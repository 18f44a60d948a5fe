use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Token payload.
///
/// New tokens carry `sub`, `iat`, `exp` and optionally `email`. The `id` and
/// `_id` fields exist only so tokens minted by earlier code paths keep
/// verifying; [`Claims::subject`] resolves whichever is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Subject email, informational only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Legacy subject field, read-only compatibility
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Legacy subject field from document-store days, read-only compatibility
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
}

impl Claims {
    /// Build the claims for a freshly issued token.
    ///
    /// Sets `sub`, `iat` to now and `exp` to now plus `ttl_hours`.
    pub fn for_subject(subject: impl ToString, email: Option<&str>, ttl_hours: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(ttl_hours);

        Self {
            sub: Some(subject.to_string()),
            exp: Some(expiration.timestamp()),
            iat: Some(now.timestamp()),
            email: email.map(|e| e.to_string()),
            id: None,
            legacy_id: None,
        }
    }

    /// Resolve the subject identifier.
    ///
    /// Precedence: `sub`, then legacy `id`, then legacy `_id`.
    pub fn subject(&self) -> Option<&str> {
        self.sub
            .as_deref()
            .or(self.id.as_deref())
            .or(self.legacy_id.as_deref())
    }

    /// Expiration instant, if the token carries one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}
