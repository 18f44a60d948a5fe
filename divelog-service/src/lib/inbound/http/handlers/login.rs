use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::divelog::ports::DiveLogRepository;
use crate::domain::user::models::Identity;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserRepository;

/// Login endpoint: the one route wired to the local credential strategy.
///
/// On success issues a fresh 30-day token alongside the sanitized identity.
pub async fn login<UR, DR>(
    State(state): State<AppState<UR, DR>>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError>
where
    UR: UserRepository,
    DR: DiveLogRepository,
{
    let identity = state
        .auth_service
        .verify_local(&body.email, &body.password)
        .await?;

    let token = state.auth_service.issue_token(&identity)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            user: IdentityData::from(&identity),
            token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub user: IdentityData,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityData {
    pub id: String,
    pub email: String,
}

impl From<&Identity> for IdentityData {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.to_string(),
            email: identity.email.clone(),
        }
    }
}
