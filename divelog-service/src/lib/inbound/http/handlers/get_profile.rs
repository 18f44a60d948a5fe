use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::create_user::UserData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::divelog::ports::DiveLogRepository;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Return the caller's own record, credential excluded.
pub async fn get_profile<UR, DR>(
    State(state): State<AppState<UR, DR>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserData>, ApiError>
where
    UR: UserRepository,
    DR: DiveLogRepository,
{
    let user = state.user_service.get_user(&auth_user.identity.id).await?;

    Ok(ApiSuccess::new(StatusCode::OK, UserData::from(&user)))
}
