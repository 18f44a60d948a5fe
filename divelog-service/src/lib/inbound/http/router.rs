use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_user::create_user;
use super::handlers::dive_logs::create_dive_log;
use super::handlers::dive_logs::delete_dive_log;
use super::handlers::dive_logs::get_dive_log;
use super::handlers::dive_logs::list_dive_logs;
use super::handlers::dive_logs::update_dive_log;
use super::handlers::get_profile::get_profile;
use super::handlers::login::login;
use super::handlers::renew_token::renew_token;
use super::handlers::update_password::update_password;
use super::middleware::authenticate as auth_middleware;
use crate::domain::auth::service::AuthService;
use crate::domain::divelog::ports::DiveLogRepository;
use crate::domain::divelog::service::DiveLogService;
use crate::domain::user::service::UserService;
use crate::user::ports::UserRepository;

/// Application state shared by all handlers.
///
/// Generic over the repository implementations so the integration suite can
/// run the exact same router over in-memory stores.
pub struct AppState<UR, DR>
where
    UR: UserRepository,
    DR: DiveLogRepository,
{
    pub user_service: Arc<UserService<UR>>,
    pub auth_service: Arc<AuthService<UR>>,
    pub dive_log_service: Arc<DiveLogService<DR>>,
}

impl<UR, DR> Clone for AppState<UR, DR>
where
    UR: UserRepository,
    DR: DiveLogRepository,
{
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            auth_service: Arc::clone(&self.auth_service),
            dive_log_service: Arc::clone(&self.dive_log_service),
        }
    }
}

/// Build the HTTP router.
///
/// Every route is wired to exactly one strategy: the login route runs the
/// local strategy inside its handler, protected routes sit behind the bearer
/// gate, and the token renewal route uses the identity fallback chain on the
/// raw header.
pub fn create_router<UR, DR>(
    user_service: Arc<UserService<UR>>,
    auth_service: Arc<AuthService<UR>>,
    dive_log_service: Arc<DiveLogService<DR>>,
) -> Router
where
    UR: UserRepository,
    DR: DiveLogRepository,
{
    let state = AppState {
        user_service,
        auth_service,
        dive_log_service,
    };

    let public_routes = Router::new()
        .route("/api/auth/login", post(login::<UR, DR>))
        .route("/api/auth/token", post(renew_token::<UR, DR>))
        .route("/api/users", post(create_user::<UR, DR>));

    let protected_routes = Router::new()
        .route("/api/users/me", get(get_profile::<UR, DR>))
        .route("/api/users/password", put(update_password::<UR, DR>))
        .route(
            "/api/divelogs",
            post(create_dive_log::<UR, DR>).get(list_dive_logs::<UR, DR>),
        )
        .route(
            "/api/divelogs/:dive_log_id",
            get(get_dive_log::<UR, DR>)
                .put(update_dive_log::<UR, DR>)
                .delete(delete_dive_log::<UR, DR>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<UR, DR>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
