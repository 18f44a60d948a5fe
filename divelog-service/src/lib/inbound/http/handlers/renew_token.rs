use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::{self};
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::divelog::ports::DiveLogRepository;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserRepository;

/// Mint a fresh token from a still-valid Authorization header.
///
/// Goes through the identity fallback chain, so it works without the gate
/// having run and without a store round-trip.
pub async fn renew_token<UR, DR>(
    State(state): State<AppState<UR, DR>>,
    headers: HeaderMap,
) -> Result<ApiSuccess<TokenResponseData>, ApiError>
where
    UR: UserRepository,
    DR: DiveLogRepository,
{
    let authorization = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let Some(user_id) = state.auth_service.resolve_user_id(None, authorization) else {
        return Err(ApiError::unauthenticated());
    };

    let token = state.auth_service.issue_token_for(&user_id)?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        TokenResponseData { token },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub token: String,
}
