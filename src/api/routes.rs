use axum::{routing::get, Router};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use super::health::{api_info, health_check, root};
use super::{assignments, auth, health_tips, progress, users, workouts, AppState};
use crate::auth::{cors_layer, security_headers_layer};
use crate::config::AppConfig;

pub fn create_routes(db: PgPool, config: &AppConfig) -> Router {
    let state = AppState::new(db, config);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api", get(api_info))
        .nest("/api/auth", auth::auth_routes())
        .nest("/api/users", users::user_routes())
        .nest("/api/workouts", workouts::workout_routes())
        .nest("/api/assignments", assignments::assignment_routes())
        .nest("/api/progress", progress::progress_routes())
        .nest("/api/health-tips", health_tips::health_tip_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(security_headers_layer())
        .layer(cors_layer())
}
