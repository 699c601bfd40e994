use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use super::AppState;
use crate::auth::{Caller, MessageResponse};
use crate::errors::AppError;
use crate::models::UserResponse;
use crate::services::UserService;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/clients", get(list_clients))
        .route("/:id", get(get_user).delete(delete_user))
}

#[tracing::instrument(skip(service))]
async fn list_users(State(service): State<UserService>) -> Result<Json<Vec<UserResponse>>, AppError> {
    Ok(Json(service.list_users().await?))
}

#[tracing::instrument(skip(service))]
async fn list_clients(
    State(service): State<UserService>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    Ok(Json(service.list_clients().await?))
}

#[tracing::instrument(skip(service))]
async fn get_user(
    State(service): State<UserService>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, AppError> {
    Ok(Json(service.get_user(user_id).await?))
}

#[tracing::instrument(skip(service))]
async fn delete_user(
    State(service): State<UserService>,
    caller: Caller,
    Path(user_id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    service.delete_user(user_id, &caller).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
