//! Activity log API routes

use crate::error::ApiError;
use crate::services::activity::ActivityService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use fittrack_shared::types::{
    DailyWaterResponse, DateQuery, LogStepsRequest, LogWaterRequest, LogWeightRequest,
    LogWorkoutRequest, LogWorkoutResponse, PersonalRecordResponse, StepLogResponse,
    WaterLogResponse, WeeklySummaryResponse, WeightLogResponse, WorkoutResponse,
};
use serde::Deserialize;
use uuid::Uuid;

/// Create activity routes
pub fn activity_routes() -> Router<AppState> {
    Router::new()
        .route("/workouts", post(log_workout).get(list_workouts))
        .route("/workouts/summary", get(weekly_summary))
        .route("/workouts/:id", axum::routing::delete(delete_workout))
        .route("/weight", post(log_weight).get(list_weights))
        .route("/weight/:id", axum::routing::delete(delete_weight))
        .route("/water", post(log_water))
        .route("/water/daily", get(daily_water))
        .route("/steps", post(log_steps))
        .route("/steps/today", get(today_steps))
        .route("/records", get(records))
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::Validation("Invalid id".to_string()))
}

/// Optional-date query (defaults to today)
#[derive(Debug, Deserialize)]
struct OptionalDateQuery {
    date: Option<chrono::NaiveDate>,
}

/// POST /api/v1/activity/workouts - Log a workout
async fn log_workout(
    State(state): State<AppState>,
    Json(req): Json<LogWorkoutRequest>,
) -> Result<Json<LogWorkoutResponse>, ApiError> {
    Ok(Json(ActivityService::log_workout(&state, req).await?))
}

/// GET /api/v1/activity/workouts - List workouts
async fn list_workouts(State(state): State<AppState>) -> Json<Vec<WorkoutResponse>> {
    Json(ActivityService::list_workouts(&state).await)
}

/// DELETE /api/v1/activity/workouts/:id - Delete a workout
async fn delete_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    ActivityService::delete_workout(&state, parse_id(&id)?).await?;
    Ok(Json(serde_json::json!({"deleted": true})))
}

/// GET /api/v1/activity/workouts/summary - Weekly workout summary
async fn weekly_summary(
    State(state): State<AppState>,
    Query(query): Query<OptionalDateQuery>,
) -> Json<WeeklySummaryResponse> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    Json(ActivityService::weekly_summary(&state, date).await)
}

/// POST /api/v1/activity/weight - Log a weight measurement
async fn log_weight(
    State(state): State<AppState>,
    Json(req): Json<LogWeightRequest>,
) -> Result<Json<WeightLogResponse>, ApiError> {
    Ok(Json(ActivityService::log_weight(&state, req).await?))
}

/// GET /api/v1/activity/weight - List weight entries
async fn list_weights(State(state): State<AppState>) -> Json<Vec<WeightLogResponse>> {
    Json(ActivityService::list_weights(&state).await)
}

/// DELETE /api/v1/activity/weight/:id - Delete a weight entry
async fn delete_weight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    ActivityService::delete_weight(&state, parse_id(&id)?).await?;
    Ok(Json(serde_json::json!({"deleted": true})))
}

/// POST /api/v1/activity/water - Log water intake
async fn log_water(
    State(state): State<AppState>,
    Json(req): Json<LogWaterRequest>,
) -> Result<Json<WaterLogResponse>, ApiError> {
    Ok(Json(ActivityService::log_water(&state, req).await?))
}

/// GET /api/v1/activity/water/daily - Daily water total
async fn daily_water(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Json<DailyWaterResponse> {
    Json(ActivityService::daily_water(&state, query.date).await)
}

/// POST /api/v1/activity/steps - Record a day's step count
async fn log_steps(
    State(state): State<AppState>,
    Json(req): Json<LogStepsRequest>,
) -> Result<Json<StepLogResponse>, ApiError> {
    Ok(Json(ActivityService::log_steps(&state, req).await?))
}

/// GET /api/v1/activity/steps/today - Today's step count
async fn today_steps(State(state): State<AppState>) -> Json<StepLogResponse> {
    Json(ActivityService::today_steps(&state).await)
}

/// GET /api/v1/activity/records - Personal records
async fn records(State(state): State<AppState>) -> Json<Vec<PersonalRecordResponse>> {
    Json(ActivityService::records(&state).await)
}
