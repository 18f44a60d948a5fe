use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::{self};
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::divelog::errors::DiveLogError;
use crate::domain::divelog::models::CreateDiveLogCommand;
use crate::domain::divelog::models::DiveLog;
use crate::domain::divelog::models::DiveLogId;
use crate::domain::divelog::models::UpdateDiveLogCommand;
use crate::domain::divelog::ports::DiveLogRepository;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserRepository;

/// Resolve the caller through the identity fallback chain: the gate-populated
/// extension first, the raw Authorization header second. Legacy callers that
/// bypass the gate still resolve.
fn resolve_caller<UR, DR>(
    state: &AppState<UR, DR>,
    auth_user: &Option<Extension<AuthenticatedUser>>,
    headers: &HeaderMap,
) -> Result<UserId, ApiError>
where
    UR: UserRepository,
    DR: DiveLogRepository,
{
    let identity = auth_user.as_ref().map(|Extension(user)| &user.identity);
    let authorization = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    state
        .auth_service
        .resolve_user_id(identity, authorization)
        .ok_or_else(ApiError::unauthenticated)
}

pub async fn create_dive_log<UR, DR>(
    State(state): State<AppState<UR, DR>>,
    auth_user: Option<Extension<AuthenticatedUser>>,
    headers: HeaderMap,
    Json(body): Json<CreateDiveLogRequestBody>,
) -> Result<ApiSuccess<DiveLogData>, ApiError>
where
    UR: UserRepository,
    DR: DiveLogRepository,
{
    let caller = resolve_caller(&state, &auth_user, &headers)?;

    let command = CreateDiveLogCommand {
        title: body.title,
        date: body.date,
        depth_meters: body.depth,
        location: body.location,
        notes: body.notes,
    };

    let dive_log = state
        .dive_log_service
        .create_dive_log(caller, command)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        DiveLogData::from(&dive_log),
    ))
}

pub async fn list_dive_logs<UR, DR>(
    State(state): State<AppState<UR, DR>>,
    auth_user: Option<Extension<AuthenticatedUser>>,
    headers: HeaderMap,
) -> Result<ApiSuccess<Vec<DiveLogData>>, ApiError>
where
    UR: UserRepository,
    DR: DiveLogRepository,
{
    let caller = resolve_caller(&state, &auth_user, &headers)?;

    let dive_logs = state.dive_log_service.list_dive_logs(&caller).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        dive_logs.iter().map(DiveLogData::from).collect(),
    ))
}

pub async fn get_dive_log<UR, DR>(
    State(state): State<AppState<UR, DR>>,
    auth_user: Option<Extension<AuthenticatedUser>>,
    headers: HeaderMap,
    Path(dive_log_id): Path<String>,
) -> Result<ApiSuccess<DiveLogData>, ApiError>
where
    UR: UserRepository,
    DR: DiveLogRepository,
{
    let caller = resolve_caller(&state, &auth_user, &headers)?;
    let dive_log_id = DiveLogId::from_string(&dive_log_id).map_err(DiveLogError::from)?;

    let dive_log = state
        .dive_log_service
        .get_dive_log(&dive_log_id, &caller)
        .await?;

    Ok(ApiSuccess::new(StatusCode::OK, DiveLogData::from(&dive_log)))
}

pub async fn update_dive_log<UR, DR>(
    State(state): State<AppState<UR, DR>>,
    auth_user: Option<Extension<AuthenticatedUser>>,
    headers: HeaderMap,
    Path(dive_log_id): Path<String>,
    Json(body): Json<UpdateDiveLogRequestBody>,
) -> Result<ApiSuccess<DiveLogData>, ApiError>
where
    UR: UserRepository,
    DR: DiveLogRepository,
{
    let caller = resolve_caller(&state, &auth_user, &headers)?;
    let dive_log_id = DiveLogId::from_string(&dive_log_id).map_err(DiveLogError::from)?;

    let command = UpdateDiveLogCommand {
        title: body.title,
        date: body.date,
        depth_meters: body.depth,
        location: body.location,
        notes: body.notes,
    };

    let dive_log = state
        .dive_log_service
        .update_dive_log(&dive_log_id, &caller, command)
        .await?;

    Ok(ApiSuccess::new(StatusCode::OK, DiveLogData::from(&dive_log)))
}

pub async fn delete_dive_log<UR, DR>(
    State(state): State<AppState<UR, DR>>,
    auth_user: Option<Extension<AuthenticatedUser>>,
    headers: HeaderMap,
    Path(dive_log_id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    UR: UserRepository,
    DR: DiveLogRepository,
{
    let caller = resolve_caller(&state, &auth_user, &headers)?;
    let dive_log_id = DiveLogId::from_string(&dive_log_id).map_err(DiveLogError::from)?;

    state
        .dive_log_service
        .delete_dive_log(&dive_log_id, &caller)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiveLogRequestBody {
    title: String,
    date: DateTime<Utc>,
    depth: f64,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDiveLogRequestBody {
    title: String,
    date: DateTime<Utc>,
    depth: f64,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiveLogData {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub depth: f64,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&DiveLog> for DiveLogData {
    fn from(dive_log: &DiveLog) -> Self {
        Self {
            id: dive_log.id.to_string(),
            user_id: dive_log.user_id.to_string(),
            title: dive_log.title.clone(),
            date: dive_log.date,
            depth: dive_log.depth_meters,
            location: dive_log.location.clone(),
            notes: dive_log.notes.clone(),
            created_at: dive_log.created_at,
        }
    }
}
