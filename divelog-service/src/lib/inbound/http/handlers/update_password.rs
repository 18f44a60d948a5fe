use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::domain::divelog::ports::DiveLogRepository;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Replace the caller's password after verifying the current one.
pub async fn update_password<UR, DR>(
    State(state): State<AppState<UR, DR>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(body): Json<UpdatePasswordRequestBody>,
) -> Result<StatusCode, ApiError>
where
    UR: UserRepository,
    DR: DiveLogRepository,
{
    state
        .user_service
        .update_password(
            &auth_user.identity.id,
            &body.current_password,
            &body.new_password,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequestBody {
    #[serde(default)]
    current_password: String,
    #[serde(default)]
    new_password: String,
}
