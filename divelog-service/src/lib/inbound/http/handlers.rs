use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;
use crate::domain::divelog::errors::DiveLogError;
use crate::user::errors::UserError;

pub mod create_user;
pub mod dive_logs;
pub mod get_profile;
pub mod login;
pub mod renew_token;
pub mod update_password;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Error body shape shared by every endpoint: a human message plus an
/// optional machine code, and for expired tokens the expiry instant under
/// the wire name `expiradoEm`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(rename = "expiradoEm", skip_serializing_if = "Option::is_none")]
    pub expired_at: Option<DateTime<Utc>>,
}

impl ApiErrorBody {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            expired_at: None,
        }
    }

    fn with_code(message: impl Into<String>, code: &str) -> Self {
        Self {
            message: message.into(),
            code: Some(code.to_string()),
            expired_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(ApiErrorBody),
    Unauthorized(ApiErrorBody),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    UnprocessableEntity(String),
    InternalServerError(String),
}

impl ApiError {
    /// 401 produced by callers of the identity fallback chain when no source
    /// yields an id.
    pub fn unauthenticated() -> Self {
        ApiError::Unauthorized(ApiErrorBody::new("Não autenticado"))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(body) => (StatusCode::BAD_REQUEST, body),
            ApiError::Unauthorized(body) => (StatusCode::UNAUTHORIZED, body),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, ApiErrorBody::new(msg)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiErrorBody::new(msg)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ApiErrorBody::new(msg)),
            ApiError::UnprocessableEntity(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ApiErrorBody::new(msg))
            }
            ApiError::InternalServerError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ApiErrorBody::new(msg))
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Authentication outcome to HTTP contract.
///
/// 401-class outcomes are never upgraded to 500 and unclassified errors are
/// never downgraded to 401.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidArgument(msg) => {
                ApiError::BadRequest(ApiErrorBody::with_code(msg, "INVALID_ARGUMENT"))
            }
            AuthError::UserNotFound => ApiError::Unauthorized(ApiErrorBody::with_code(
                "Usuário não encontrado",
                "USER_NOT_FOUND",
            )),
            AuthError::InvalidPassword => ApiError::Unauthorized(ApiErrorBody::with_code(
                "Senha incorreta",
                "INVALID_PASSWORD",
            )),
            // Generic on purpose: the bearer path leaks no detail
            AuthError::NotAuthenticated | AuthError::TokenInvalid => {
                ApiError::Unauthorized(ApiErrorBody::new("Token inválido"))
            }
            AuthError::TokenExpired { expired_at } => ApiError::Unauthorized(ApiErrorBody {
                message: "Token expirado".to_string(),
                code: None,
                expired_at: Some(expired_at),
            }),
            AuthError::Repository(msg) | AuthError::Unknown(msg) => {
                ApiError::InternalServerError(msg)
            }
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound("Usuário não encontrado".to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::CurrentPasswordMismatch => {
                ApiError::Unauthorized(ApiErrorBody::new("Senha atual incorreta"))
            }
            UserError::InvalidArgument(msg) => ApiError::BadRequest(ApiErrorBody::new(msg)),
            UserError::InvalidEmail(_) | UserError::InvalidUserId(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            UserError::MissingCredential => ApiError::InternalServerError(
                "Senha não encontrada para este usuário".to_string(),
            ),
            UserError::Password(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<DiveLogError> for ApiError {
    fn from(err: DiveLogError) -> Self {
        match err {
            DiveLogError::NotFound(_) => {
                ApiError::NotFound("Registro de mergulho não encontrado".to_string())
            }
            DiveLogError::Forbidden => ApiError::Forbidden("Não autorizado".to_string()),
            DiveLogError::InvalidDiveLogId(_) => ApiError::UnprocessableEntity(err.to_string()),
            DiveLogError::DatabaseError(_) | DiveLogError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}
