use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use super::AppState;
use crate::auth::{Caller, MessageResponse};
use crate::errors::AppError;
use crate::models::{CreateProgressLogRequest, ProgressLogResponse};
use crate::services::ProgressService;

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    pub client_id: Option<i64>,
}

pub fn progress_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_progress_logs).post(create_progress_log))
        .route("/:id", get(get_progress_log).delete(delete_progress_log))
}

/// Newest first
#[tracing::instrument(skip(service))]
async fn list_progress_logs(
    State(service): State<ProgressService>,
    WithRejection(Query(query), _): WithRejection<Query<ProgressQuery>, AppError>,
) -> Result<Json<Vec<ProgressLogResponse>>, AppError> {
    Ok(Json(service.list(query.client_id).await?))
}

#[tracing::instrument(skip(service, request))]
async fn create_progress_log(
    State(service): State<ProgressService>,
    caller: Caller,
    WithRejection(Json(request), _): WithRejection<Json<CreateProgressLogRequest>, AppError>,
) -> Result<(StatusCode, Json<ProgressLogResponse>), AppError> {
    let log = service.create(&caller, request).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

#[tracing::instrument(skip(service))]
async fn get_progress_log(
    State(service): State<ProgressService>,
    caller: Caller,
    Path(log_id): Path<i64>,
) -> Result<Json<ProgressLogResponse>, AppError> {
    Ok(Json(service.get(log_id, &caller).await?))
}

#[tracing::instrument(skip(service))]
async fn delete_progress_log(
    State(service): State<ProgressService>,
    caller: Caller,
    Path(log_id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    service.delete(log_id, &caller).await?;
    Ok(Json(MessageResponse::new("Progress log deleted successfully")))
}
