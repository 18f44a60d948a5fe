use std::sync::Arc;

use auth::strip_bearer;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::TokenCodec;

use crate::domain::auth::errors::AuthError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Identity;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Successful bearer verification.
///
/// Carries the raw (prefix-stripped) token string alongside the identity so
/// downstream code can re-use it for outbound calls without re-parsing.
#[derive(Debug, Clone)]
pub struct BearerIdentity {
    pub identity: Identity,
    pub token: String,
}

/// Credential verification strategies over the credential store.
///
/// Stateless per request: each verification is a pure function of its inputs,
/// the store and the process-wide signing secret. Holds no mutable state and
/// never mutates the store.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
    token_codec: Arc<TokenCodec>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, token_codec: Arc<TokenCodec>) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
            token_codec,
        }
    }

    /// Local strategy: verify an email + password pair.
    ///
    /// Read-only; produces a sanitized identity or a classified failure.
    ///
    /// # Errors
    /// * `InvalidArgument` - Email or password is empty
    /// * `UserNotFound` - No account for this email, including unparseable addresses
    /// * `InvalidPassword` - Wrong password, or the account has no usable credential
    /// * `Repository` - Store lookup failed
    pub async fn verify_local(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::InvalidArgument(
                "Email e senha são obrigatórios".to_string(),
            ));
        }

        // Only non-emptiness is validated here. A string that does not even
        // parse as an email cannot match any stored account, so it reads as
        // the same lookup miss as any unknown address.
        let Ok(email) = EmailAddress::new(email.to_string()) else {
            return Err(AuthError::UserNotFound);
        };

        let user = self.repository.find_by_email(&email, true).await?;
        let Some(user) = user else {
            return Err(AuthError::UserNotFound);
        };

        let stored_hash = user.password_hash.as_deref().unwrap_or("");
        match self.password_hasher.verify(password, stored_hash) {
            Ok(true) => Ok(Identity::from(&user)),
            Ok(false) => Err(AuthError::InvalidPassword),
            // No usable credential reads the same as a wrong password
            Err(PasswordError::MissingHash) => Err(AuthError::InvalidPassword),
            Err(e) => Err(AuthError::Unknown(e.to_string())),
        }
    }

    /// Bearer strategy: verify a presented token and resolve its subject.
    ///
    /// Accepts both `"Bearer <token>"` and bare-token forms. An absent token
    /// and an unresolvable subject are "unauthenticated", not errors; only a
    /// malformed, tampered or expired token is classified as such.
    ///
    /// # Errors
    /// * `NotAuthenticated` - Empty token, no subject, or subject no longer in the store
    /// * `TokenInvalid` - Unparseable token or signature mismatch
    /// * `TokenExpired` - Signature valid but past expiry
    /// * `Repository` - Store lookup failed
    pub async fn verify_bearer(&self, raw: &str) -> Result<BearerIdentity, AuthError> {
        // Prefix first, then trim: a header that is only the prefix must
        // reduce to an empty token, not to a "Bearer" residue.
        let token = strip_bearer(raw).trim();
        if token.is_empty() {
            return Err(AuthError::NotAuthenticated);
        }

        let claims = self.token_codec.verify(token)?;

        let Some(subject) = claims.subject() else {
            return Err(AuthError::NotAuthenticated);
        };
        let Ok(user_id) = UserId::from_string(subject) else {
            return Err(AuthError::NotAuthenticated);
        };

        let user = self.repository.find_by_id(&user_id, false).await?;
        let Some(user) = user else {
            // Subject deleted since issuance: unauthenticated, never a 500
            return Err(AuthError::NotAuthenticated);
        };

        Ok(BearerIdentity {
            identity: Identity::from(&user),
            token: token.to_string(),
        })
    }

    /// Issue a fresh token for a verified identity.
    pub fn issue_token(&self, identity: &Identity) -> Result<String, AuthError> {
        self.token_codec
            .issue(&identity.id.to_string(), Some(&identity.email))
            .map_err(AuthError::from)
    }

    /// Issue a fresh token for a bare subject, without a store round-trip.
    pub fn issue_token_for(&self, user_id: &UserId) -> Result<String, AuthError> {
        self.token_codec
            .issue(&user_id.to_string(), None)
            .map_err(AuthError::from)
    }

    /// Identity resolution fallback chain.
    ///
    /// First match wins: an already-populated identity context, then subject
    /// extraction from the raw Authorization header (both `"Bearer <token>"`
    /// and bare forms). Pure: verifies the signature but never touches the
    /// store. `None` means "no identity"; callers answer 401 themselves.
    pub fn resolve_user_id(
        &self,
        identity: Option<&Identity>,
        authorization: Option<&str>,
    ) -> Option<UserId> {
        if let Some(identity) = identity {
            return Some(identity.id);
        }

        let token = strip_bearer(authorization?).trim();
        if token.is_empty() {
            return None;
        }

        let claims = self.token_codec.verify(token).ok()?;
        let subject = claims.subject()?;
        UserId::from_string(subject).ok()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use auth::Claims;
    use auth::TOKEN_TTL_HOURS;
    use chrono::Duration;
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::models::User;
    use crate::user::errors::UserError;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_email(&self, email: &EmailAddress, include_credential: bool) -> Result<Option<User>, UserError>;
            async fn find_by_id(&self, id: &UserId, include_credential: bool) -> Result<Option<User>, UserError>;
            async fn update_credential(&self, id: &UserId, password_hash: &str) -> Result<(), UserError>;
        }
    }

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn codec() -> Arc<TokenCodec> {
        Arc::new(TokenCodec::new(SECRET))
    }

    fn stored_user(password: &str) -> User {
        let hash = PasswordHasher::new().hash(password).unwrap();
        User {
            id: UserId::new(),
            email: EmailAddress::new("user@x.com".to_string()).unwrap(),
            password_hash: Some(hash),
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_local_success() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user("secret1");
        let expected_id = user.id;

        repository
            .expect_find_by_email()
            .withf(|email, include_credential| {
                email.as_str() == "user@x.com" && *include_credential
            })
            .times(1)
            .returning(move |_, _| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), codec());

        let identity = service.verify_local("user@x.com", "secret1").await.unwrap();
        assert_eq!(identity.id, expected_id);
        assert_eq!(identity.email, "user@x.com");
    }

    #[tokio::test]
    async fn test_local_email_is_case_insensitive() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user("secret1");

        // Lookup must already be normalized
        repository
            .expect_find_by_email()
            .withf(|email, _| email.as_str() == "user@x.com")
            .times(1)
            .returning(move |_, _| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), codec());

        let identity = service
            .verify_local("  USER@X.COM ", "secret1")
            .await
            .unwrap();
        assert_eq!(identity.email, "user@x.com");
    }

    #[tokio::test]
    async fn test_local_unknown_email() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = AuthService::new(Arc::new(repository), codec());

        let result = service.verify_local("nobody@x.com", "secret1").await;
        assert!(matches!(result.unwrap_err(), AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_local_malformed_email_reads_as_unknown_user() {
        let repository = MockTestUserRepository::new();
        let service = AuthService::new(Arc::new(repository), codec());

        // No format validation on the login path: an unparseable address is
        // just an address with no account behind it.
        let result = service.verify_local("notanemail", "secret1").await;
        assert!(matches!(result.unwrap_err(), AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_local_wrong_password() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user("secret1");
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_, _| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), codec());

        let result = service.verify_local("user@x.com", "wrong").await;
        assert!(matches!(result.unwrap_err(), AuthError::InvalidPassword));
    }

    #[tokio::test]
    async fn test_local_account_without_credential_reads_as_invalid_password() {
        let mut repository = MockTestUserRepository::new();
        let mut user = stored_user("irrelevant");
        user.password_hash = None;
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_, _| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), codec());

        let result = service.verify_local("user@x.com", "anything").await;
        assert!(matches!(result.unwrap_err(), AuthError::InvalidPassword));
    }

    #[tokio::test]
    async fn test_local_empty_arguments() {
        let repository = MockTestUserRepository::new();
        let service = AuthService::new(Arc::new(repository), codec());

        let result = service.verify_local("", "secret1").await;
        assert!(matches!(result.unwrap_err(), AuthError::InvalidArgument(_)));

        let result = service.verify_local("user@x.com", "").await;
        assert!(matches!(result.unwrap_err(), AuthError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_bearer_accepts_prefixed_and_bare_tokens() {
        let user = stored_user("secret1");
        let user_id = user.id;
        let token = codec().issue(&user_id.to_string(), None).unwrap();

        for presented in [format!("Bearer {}", token), token.clone()] {
            let mut repository = MockTestUserRepository::new();
            let user = user.clone();
            repository
                .expect_find_by_id()
                .withf(move |id, include_credential| *id == user_id && !*include_credential)
                .times(1)
                .returning(move |_, _| Ok(Some(user.clone())));

            let service = AuthService::new(Arc::new(repository), codec());

            let bearer = service.verify_bearer(&presented).await.unwrap();
            assert_eq!(bearer.identity.id, user_id);
            // Raw token carried forward, prefix stripped
            assert_eq!(bearer.token, token);
        }
    }

    #[tokio::test]
    async fn test_bearer_empty_token_is_unauthenticated() {
        let repository = MockTestUserRepository::new();
        let service = AuthService::new(Arc::new(repository), codec());

        let result = service.verify_bearer("").await;
        assert!(matches!(result.unwrap_err(), AuthError::NotAuthenticated));

        let result = service.verify_bearer("Bearer ").await;
        assert!(matches!(result.unwrap_err(), AuthError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_bearer_tampered_token() {
        let repository = MockTestUserRepository::new();
        let service = AuthService::new(Arc::new(repository), codec());

        let foreign = TokenCodec::new(b"other_secret_at_least_32_bytes_long!")
            .issue(&UserId::new().to_string(), None)
            .unwrap();

        let result = service.verify_bearer(&foreign).await;
        assert!(matches!(result.unwrap_err(), AuthError::TokenInvalid));

        let result = service.verify_bearer("Bearer not.a.token").await;
        assert!(matches!(result.unwrap_err(), AuthError::TokenInvalid));
    }

    #[tokio::test]
    async fn test_bearer_expired_token_carries_instant() {
        let repository = MockTestUserRepository::new();
        let service = AuthService::new(Arc::new(repository), codec());

        let issued = Utc::now() - Duration::days(31);
        let expired = issued + Duration::hours(TOKEN_TTL_HOURS);
        let claims = Claims {
            sub: Some(UserId::new().to_string()),
            iat: Some(issued.timestamp()),
            exp: Some(expired.timestamp()),
            ..Default::default()
        };
        let token = TokenCodec::new(SECRET).encode(&claims).unwrap();

        match service.verify_bearer(&token).await {
            Err(AuthError::TokenExpired { expired_at }) => {
                assert_eq!(expired_at.timestamp(), expired.timestamp());
            }
            other => panic!("expected TokenExpired, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_bearer_deleted_subject_is_unauthenticated() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = AuthService::new(Arc::new(repository), codec());

        let token = codec().issue(&UserId::new().to_string(), None).unwrap();
        let result = service.verify_bearer(&token).await;
        assert!(matches!(result.unwrap_err(), AuthError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_bearer_token_without_subject_is_unauthenticated() {
        let repository = MockTestUserRepository::new();
        let service = AuthService::new(Arc::new(repository), codec());

        let token = TokenCodec::new(SECRET).encode(&Claims::default()).unwrap();
        let result = service.verify_bearer(&token).await;
        assert!(matches!(result.unwrap_err(), AuthError::NotAuthenticated));
    }

    #[test]
    fn test_resolve_prefers_populated_identity() {
        let repository = MockTestUserRepository::new();
        let service = AuthService::new(Arc::new(repository), codec());

        let context_id = UserId::new();
        let identity = Identity {
            id: context_id,
            email: "user@x.com".to_string(),
        };

        // A header for a different subject loses to the context
        let other = codec().issue(&UserId::new().to_string(), None).unwrap();
        let resolved = service.resolve_user_id(Some(&identity), Some(&other));
        assert_eq!(resolved, Some(context_id));
    }

    #[test]
    fn test_resolve_falls_back_to_header() {
        let repository = MockTestUserRepository::new();
        let service = AuthService::new(Arc::new(repository), codec());

        let user_id = UserId::new();
        let token = codec().issue(&user_id.to_string(), None).unwrap();

        let prefixed = format!("Bearer {}", token);
        assert_eq!(
            service.resolve_user_id(None, Some(&prefixed)),
            Some(user_id)
        );
        assert_eq!(service.resolve_user_id(None, Some(&token)), Some(user_id));
    }

    #[test]
    fn test_resolve_with_no_source_is_none() {
        let repository = MockTestUserRepository::new();
        let service = AuthService::new(Arc::new(repository), codec());

        assert_eq!(service.resolve_user_id(None, None), None);
        assert_eq!(service.resolve_user_id(None, Some("")), None);
        assert_eq!(service.resolve_user_id(None, Some("Bearer ")), None);
        assert_eq!(service.resolve_user_id(None, Some("Bearer garbage")), None);
    }

    #[test]
    fn test_resolve_reads_legacy_subject_fields() {
        let repository = MockTestUserRepository::new();
        let service = AuthService::new(Arc::new(repository), codec());

        let user_id = UserId::new();
        let claims = Claims {
            id: Some(user_id.to_string()),
            ..Default::default()
        };
        let token = TokenCodec::new(SECRET).encode(&claims).unwrap();

        assert_eq!(service.resolve_user_id(None, Some(&token)), Some(user_id));
    }
}
