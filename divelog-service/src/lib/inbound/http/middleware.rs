use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::auth::service::BearerIdentity;
use crate::domain::divelog::ports::DiveLogRepository;
use crate::domain::user::models::Identity;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserRepository;

/// Extension type carrying the authenticated identity and the raw verified
/// token through request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub identity: Identity,
    pub token: String,
}

/// Authentication gate for bearer-protected routes.
///
/// Runs the bearer strategy against the Authorization header (prefixed or
/// bare token, missing header treated as an empty token) and populates the
/// `AuthenticatedUser` extension on success. On any non-success outcome the
/// wrapped handler never runs; the outcome maps to the HTTP contract via
/// `ApiError`.
pub async fn authenticate<UR, DR>(
    State(state): State<AppState<UR, DR>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response>
where
    UR: UserRepository,
    DR: DiveLogRepository,
{
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    match state.auth_service.verify_bearer(header).await {
        Ok(BearerIdentity { identity, token }) => {
            req.extensions_mut()
                .insert(AuthenticatedUser { identity, token });
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!("Bearer authentication failed: {}", e);
            Err(ApiError::from(e).into_response())
        }
    }
}
