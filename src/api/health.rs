use axum::response::Json;
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to FitSphere API" }))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "fitsphere",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn api_info() -> Json<Value> {
    Json(json!({
        "name": "FitSphere API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/api/auth",
            "/api/users",
            "/api/workouts",
            "/api/assignments",
            "/api/progress",
            "/api/health-tips"
        ]
    }))
}
