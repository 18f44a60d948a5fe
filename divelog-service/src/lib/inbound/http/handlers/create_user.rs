use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::divelog::ports::DiveLogRepository;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

pub async fn create_user<UR, DR>(
    State(state): State<AppState<UR, DR>>,
    Json(body): Json<CreateUserRequestBody>,
) -> Result<ApiSuccess<UserData>, ApiError>
where
    UR: UserRepository,
    DR: DiveLogRepository,
{
    if body.password.is_empty() {
        return Err(UserError::InvalidArgument("Senha é obrigatória".to_string()).into());
    }

    let email = EmailAddress::new(body.email).map_err(UserError::from)?;

    let command = CreateUserCommand {
        email,
        password: body.password,
        first_name: body.first_name,
        last_name: body.last_name,
    };

    let user = state.user_service.create_user(command).await?;

    Ok(ApiSuccess::new(StatusCode::CREATED, UserData::from(&user)))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequestBody {
    email: String,
    #[serde(default)]
    password: String,
    first_name: String,
    last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            created_at: user.created_at,
        }
    }
}
