//! Goals API routes

use crate::error::ApiError;
use crate::services::goals::GoalsService;
use crate::services::progress::ProgressService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use fittrack_shared::types::{
    AddMilestoneRequest, CreateGoalRequest, EvaluateGoalsResponse, GoalResponse, GoalsListQuery,
    GoalsListResponse, UpdateGoalRequest,
};
use uuid::Uuid;

/// Create goals routes
pub fn goals_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_goal).get(list_goals))
        .route("/evaluate", post(evaluate_all))
        .route("/:id", get(get_goal).put(update_goal).delete(delete_goal))
        .route("/:id/evaluate", post(evaluate_goal))
        .route("/:id/milestones", post(add_milestone))
        .route("/:id/milestones/:milestone_id/complete", post(complete_milestone))
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::Validation("Invalid id".to_string()))
}

/// POST /api/v1/goals - Create a new goal
async fn create_goal(
    State(state): State<AppState>,
    Json(req): Json<CreateGoalRequest>,
) -> Result<Json<GoalResponse>, ApiError> {
    Ok(Json(GoalsService::create_goal(&state, req).await?))
}

/// GET /api/v1/goals - List goals
async fn list_goals(
    State(state): State<AppState>,
    Query(query): Query<GoalsListQuery>,
) -> Result<Json<GoalsListResponse>, ApiError> {
    Ok(Json(GoalsListResponse {
        goals: GoalsService::get_goals(&state, &query).await,
    }))
}

/// GET /api/v1/goals/:id - Get a specific goal
async fn get_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GoalResponse>, ApiError> {
    Ok(Json(GoalsService::get_goal(&state, parse_id(&id)?).await?))
}

/// PUT /api/v1/goals/:id - Update a goal
async fn update_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateGoalRequest>,
) -> Result<Json<GoalResponse>, ApiError> {
    Ok(Json(
        GoalsService::update_goal(&state, parse_id(&id)?, req).await?,
    ))
}

/// DELETE /api/v1/goals/:id - Delete a goal
async fn delete_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    GoalsService::delete_goal(&state, parse_id(&id)?).await?;
    Ok(Json(serde_json::json!({"deleted": true})))
}

/// POST /api/v1/goals/:id/evaluate - Evaluate one goal's progress
async fn evaluate_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GoalResponse>, ApiError> {
    let goal = ProgressService::check_goal(&state, parse_id(&id)?).await?;
    Ok(Json(GoalsService::to_response(&goal)))
}

/// POST /api/v1/goals/evaluate - Evaluate all incomplete goals
async fn evaluate_all(
    State(state): State<AppState>,
) -> Result<Json<EvaluateGoalsResponse>, ApiError> {
    Ok(Json(ProgressService::check_all(&state).await?))
}

/// POST /api/v1/goals/:id/milestones - Add a milestone
async fn add_milestone(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AddMilestoneRequest>,
) -> Result<Json<GoalResponse>, ApiError> {
    Ok(Json(
        GoalsService::add_milestone(&state, parse_id(&id)?, req).await?,
    ))
}

/// POST /api/v1/goals/:id/milestones/:milestone_id/complete - Complete a milestone
async fn complete_milestone(
    State(state): State<AppState>,
    Path((id, milestone_id)): Path<(String, String)>,
) -> Result<Json<GoalResponse>, ApiError> {
    Ok(Json(
        GoalsService::complete_milestone(&state, parse_id(&id)?, parse_id(&milestone_id)?).await?,
    ))
}
