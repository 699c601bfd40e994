use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use axum_extra::extract::WithRejection;

use super::AppState;
use crate::auth::{AuthResponse, AuthService, Caller, LoginRequest, RegisterRequest};
use crate::errors::AppError;
use crate::models::UserResponse;

/// Authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

/// Register a new user
#[tracing::instrument(skip(auth_service, request))]
async fn register(
    State(auth_service): State<AuthService>,
    WithRejection(Json(request), _): WithRejection<Json<RegisterRequest>, AppError>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = auth_service.register(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login user
#[tracing::instrument(skip(auth_service, request))]
async fn login(
    State(auth_service): State<AuthService>,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, AppError>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = auth_service.login(request).await?;
    Ok(Json(response))
}

#[tracing::instrument(skip(auth_service))]
async fn me(
    State(auth_service): State<AuthService>,
    caller: Caller,
) -> Result<Json<UserResponse>, AppError> {
    let user = auth_service.current_user(&caller).await?;
    Ok(Json(user))
}
