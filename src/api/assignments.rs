use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use super::AppState;
use crate::auth::{Caller, MessageResponse};
use crate::errors::AppError;
use crate::models::{AssignmentResponse, CreateAssignmentRequest};
use crate::services::AssignmentService;

#[derive(Debug, Deserialize)]
pub struct AssignmentQuery {
    pub user_id: Option<i64>,
}

pub fn assignment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_assignments).post(create_assignment))
        .route("/:id", delete(delete_assignment))
}

#[tracing::instrument(skip(service))]
async fn list_assignments(
    State(service): State<AssignmentService>,
    WithRejection(Query(query), _): WithRejection<Query<AssignmentQuery>, AppError>,
) -> Result<Json<Vec<AssignmentResponse>>, AppError> {
    Ok(Json(service.list(query.user_id).await?))
}

#[tracing::instrument(skip(service, request))]
async fn create_assignment(
    State(service): State<AssignmentService>,
    caller: Caller,
    WithRejection(Json(request), _): WithRejection<Json<CreateAssignmentRequest>, AppError>,
) -> Result<(StatusCode, Json<AssignmentResponse>), AppError> {
    let assignment = service.create(&caller, request).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

#[tracing::instrument(skip(service))]
async fn delete_assignment(
    State(service): State<AssignmentService>,
    caller: Caller,
    Path(assignment_id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    service.delete(assignment_id, &caller).await?;
    Ok(Json(MessageResponse::new("Assignment deleted successfully")))
}
