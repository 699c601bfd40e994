use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use axum_extra::extract::WithRejection;

use super::AppState;
use crate::auth::Caller;
use crate::errors::AppError;
use crate::models::{CreateHealthTipRequest, HealthTipResponse};
use crate::services::HealthTipService;

pub fn health_tip_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_health_tips).post(create_health_tip))
        .route("/:id", get(get_health_tip))
}

#[tracing::instrument(skip(service))]
async fn list_health_tips(
    State(service): State<HealthTipService>,
) -> Result<Json<Vec<HealthTipResponse>>, AppError> {
    Ok(Json(service.list().await?))
}

/// Admin only
#[tracing::instrument(skip(service, request))]
async fn create_health_tip(
    State(service): State<HealthTipService>,
    caller: Caller,
    WithRejection(Json(request), _): WithRejection<Json<CreateHealthTipRequest>, AppError>,
) -> Result<(StatusCode, Json<HealthTipResponse>), AppError> {
    let tip = service.create(&caller, request).await?;
    Ok((StatusCode::CREATED, Json(tip)))
}

#[tracing::instrument(skip(service))]
async fn get_health_tip(
    State(service): State<HealthTipService>,
    Path(tip_id): Path<i64>,
) -> Result<Json<HealthTipResponse>, AppError> {
    Ok(Json(service.get(tip_id).await?))
}
