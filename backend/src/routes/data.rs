//! Device import and data export routes

use crate::error::ApiError;
use crate::services::export;
use crate::services::import::ImportService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use fittrack_shared::types::{ImportRequest, ImportResultResponse};

/// Create data routes
pub fn data_routes() -> Router<AppState> {
    Router::new()
        .route("/import", post(import))
        .route("/export/workouts", get(export_workouts))
        .route("/export/weight", get(export_weight))
}

/// POST /api/v1/data/import - Import from the device bridge
async fn import(
    State(state): State<AppState>,
    Json(req): Json<ImportRequest>,
) -> Result<Json<ImportResultResponse>, ApiError> {
    Ok(Json(ImportService::import(&state, req).await?))
}

/// GET /api/v1/data/export/workouts - Workout history as CSV
async fn export_workouts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state.activity.snapshot().await;
    let csv = export::workouts_csv(&snapshot.workouts)?;
    Ok(csv_response("workouts.csv", csv))
}

/// GET /api/v1/data/export/weight - Weight history as CSV
async fn export_weight(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state.activity.snapshot().await;
    let csv = export::weights_csv(&snapshot.weights)?;
    Ok(csv_response("weight.csv", csv))
}

fn csv_response(filename: &str, csv: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
}
