//! Health check endpoints

use axum::Json;
use serde_json::{json, Value};

/// GET /health - Basic health check
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /health/ready - Readiness check
pub async fn readiness_check() -> Json<Value> {
    Json(json!({ "ready": true }))
}

/// GET /health/live - Liveness check
pub async fn liveness_check() -> Json<Value> {
    Json(json!({ "alive": true }))
}
