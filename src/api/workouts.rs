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
use crate::models::{CreateWorkoutRequest, UpdateWorkoutRequest, WorkoutResponse};
use crate::services::WorkoutService;

#[derive(Debug, Deserialize)]
pub struct WorkoutQuery {
    pub user_id: Option<i64>,
}

pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_workouts).post(create_workout))
        .route("/assigned", get(list_assigned_workouts))
        .route(
            "/:id",
            get(get_workout).put(update_workout).delete(delete_workout),
        )
}

/// List workouts, scoped to `user_id` when given
#[tracing::instrument(skip(service))]
async fn list_workouts(
    State(service): State<WorkoutService>,
    WithRejection(Query(query), _): WithRejection<Query<WorkoutQuery>, AppError>,
) -> Result<Json<Vec<WorkoutResponse>>, AppError> {
    Ok(Json(service.list_for_user(query.user_id).await?))
}

#[tracing::instrument(skip(service))]
async fn list_assigned_workouts(
    State(service): State<WorkoutService>,
    caller: Caller,
) -> Result<Json<Vec<WorkoutResponse>>, AppError> {
    Ok(Json(service.list_assigned(&caller).await?))
}

#[tracing::instrument(skip(service))]
async fn get_workout(
    State(service): State<WorkoutService>,
    Path(workout_id): Path<i64>,
) -> Result<Json<WorkoutResponse>, AppError> {
    Ok(Json(service.get(workout_id).await?))
}

#[tracing::instrument(skip(service, request))]
async fn create_workout(
    State(service): State<WorkoutService>,
    caller: Caller,
    WithRejection(Json(request), _): WithRejection<Json<CreateWorkoutRequest>, AppError>,
) -> Result<(StatusCode, Json<WorkoutResponse>), AppError> {
    let workout = service.create(&caller, request).await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

#[tracing::instrument(skip(service, patch))]
async fn update_workout(
    State(service): State<WorkoutService>,
    caller: Caller,
    Path(workout_id): Path<i64>,
    WithRejection(Json(patch), _): WithRejection<Json<UpdateWorkoutRequest>, AppError>,
) -> Result<Json<WorkoutResponse>, AppError> {
    Ok(Json(service.update(workout_id, &caller, patch).await?))
}

#[tracing::instrument(skip(service))]
async fn delete_workout(
    State(service): State<WorkoutService>,
    caller: Caller,
    Path(workout_id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    service.delete(workout_id, &caller).await?;
    Ok(Json(MessageResponse::new("Workout deleted successfully")))
}
