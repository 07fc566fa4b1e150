//! Gamification API routes

use crate::error::ApiError;
use crate::services::achievements::{self, AchievementService};
use crate::services::challenges::ChallengeService;
use crate::services::levels;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use fittrack_shared::types::{
    AchievementsListResponse, ChallengeCatalogResponse, ChallengeResponse,
    EvaluateAchievementsResponse, LevelResponse, StartChallengeRequest, StreakResponse,
};

/// Create gamification routes
pub fn gamification_routes() -> Router<AppState> {
    Router::new()
        .route("/achievements", get(list_achievements))
        .route("/evaluate", post(evaluate))
        .route("/streak", get(get_streak))
        .route("/streak/reset", post(reset_streak))
        .route("/level", get(get_level))
        .route("/challenges", get(list_challenges).post(start_challenge))
        .route("/challenges/catalog", get(challenge_catalog))
        .route("/reset", post(reset))
}

/// GET /api/v1/gamification/achievements - Full achievement catalog state
async fn list_achievements(State(state): State<AppState>) -> Json<AchievementsListResponse> {
    let snapshot = state.gamification.snapshot().await;
    Json(AchievementsListResponse {
        achievements: snapshot
            .achievements
            .iter()
            .map(achievements::to_response)
            .collect(),
        total_points: snapshot.points,
        level: snapshot.level,
    })
}

/// POST /api/v1/gamification/evaluate - Run an achievement evaluation pass
async fn evaluate(
    State(state): State<AppState>,
) -> Result<Json<EvaluateAchievementsResponse>, ApiError> {
    Ok(Json(AchievementService::evaluate_all(&state).await?))
}

/// GET /api/v1/gamification/streak - Current streak
async fn get_streak(State(state): State<AppState>) -> Json<StreakResponse> {
    let streak = state.gamification.snapshot().await.streak;
    Json(StreakResponse {
        current: streak.current,
        longest: streak.longest,
        last_workout_date: streak.last_workout_date,
    })
}

/// POST /api/v1/gamification/streak/reset - Explicitly reset the streak
async fn reset_streak(State(state): State<AppState>) -> Json<StreakResponse> {
    let streak = state
        .gamification
        .mutate(|s| {
            s.streak = Default::default();
            s.streak.clone()
        })
        .await;
    Json(StreakResponse {
        current: streak.current,
        longest: streak.longest,
        last_workout_date: streak.last_workout_date,
    })
}

/// GET /api/v1/gamification/level - Current level and points
async fn get_level(State(state): State<AppState>) -> Json<LevelResponse> {
    let snapshot = state.gamification.snapshot().await;
    Json(LevelResponse {
        level: snapshot.level,
        points: snapshot.points,
        progress_percent: levels::level_progress_percent(snapshot.points),
    })
}

/// GET /api/v1/gamification/challenges - Active challenges
async fn list_challenges(State(state): State<AppState>) -> Json<Vec<ChallengeResponse>> {
    Json(ChallengeService::list_active(&state).await)
}

/// POST /api/v1/gamification/challenges - Start a challenge
async fn start_challenge(
    State(state): State<AppState>,
    Json(req): Json<StartChallengeRequest>,
) -> Result<Json<ChallengeResponse>, ApiError> {
    Ok(Json(ChallengeService::start(&state, req).await?))
}

/// GET /api/v1/gamification/challenges/catalog - Predefined challenges
async fn challenge_catalog() -> Json<Vec<ChallengeCatalogResponse>> {
    Json(ChallengeService::catalog())
}

/// POST /api/v1/gamification/reset - Reset gamification to its initial state
async fn reset(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.gamification.reset().await;
    Json(serde_json::json!({"reset": true}))
}
