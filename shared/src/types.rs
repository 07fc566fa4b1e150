//! API request and response types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::goal_spec::{GoalSpec, TargetUnit};
use crate::models::{
    AchievementCategory, AchievementTier, ChallengeDifficulty, DataSource, GoalCategory,
    GoalDirection, Timeframe,
};

/// Date query parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateQuery {
    pub date: NaiveDate,
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

// ============================================================================
// Goal Types
// ============================================================================

/// Create goal request
///
/// The structured target fields are optional; when absent the target is
/// inferred once from `text` at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGoalRequest {
    #[validate(length(min = 1, max = 200))]
    pub text: String,
    pub category: GoalCategory,
    #[serde(default)]
    pub timeframe: Timeframe,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<GoalDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<TargetUnit>,
    #[serde(default)]
    pub per_day: Option<bool>,
}

/// Update goal request (display fields only; progress belongs to the evaluator)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateGoalRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
}

/// Milestone response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneResponse {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

/// Add milestone request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddMilestoneRequest {
    #[validate(length(min = 1, max = 200))]
    pub text: String,
}

/// Goal response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalResponse {
    pub id: String,
    pub text: String,
    pub category: GoalCategory,
    pub timeframe: Timeframe,
    pub spec: GoalSpec,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    pub progress: u8,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub milestones: Vec<MilestoneResponse>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub daily_progress: BTreeMap<NaiveDate, bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<DateTime<Utc>>,
}

/// Goals list query parameters
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GoalsListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<GoalCategory>,
}

/// Goals list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalsListResponse {
    pub goals: Vec<GoalResponse>,
}

/// Response for an evaluate-all-goals pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateGoalsResponse {
    pub evaluated: usize,
    /// Ids of goals newly completed by this pass
    pub newly_completed: Vec<String>,
}

// ============================================================================
// Activity Log Types
// ============================================================================

/// Workout set input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSetInput {
    pub exercise: String,
    pub reps: u32,
    pub weight_kg: f64,
}

/// Log workout request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogWorkoutRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Workout type tag (e.g. "strength", "cardio", "yoga")
    #[validate(length(min = 1, max = 50))]
    pub workout_type: String,
    #[serde(default = "Utc::now")]
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<i32>,
    #[serde(default = "default_true")]
    pub completed: bool,
    #[serde(default)]
    pub sets: Vec<WorkoutSetInput>,
}

fn default_true() -> bool {
    true
}

/// Workout response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub workout_type: String,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<i32>,
    pub completed: bool,
    pub source: DataSource,
}

/// Personal record response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalRecordResponse {
    pub exercise: String,
    pub estimated_1rm_kg: f64,
    pub achieved_at: DateTime<Utc>,
}

/// Response for logging a workout, including any new personal records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogWorkoutResponse {
    pub workout: WorkoutResponse,
    pub new_records: Vec<PersonalRecordResponse>,
}

/// Log weight request (supports multiple units)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogWeightRequest {
    /// Weight value in the specified unit (defaults to kg)
    pub weight: f64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default = "Utc::now")]
    pub recorded_at: DateTime<Utc>,
}

/// Weight log response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightLogResponse {
    pub id: String,
    pub weight_kg: f64,
    pub recorded_at: DateTime<Utc>,
    pub source: DataSource,
}

/// Log water intake request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogWaterRequest {
    #[validate(range(min = 1, max = 10000))]
    pub amount_ml: i32,
    #[serde(default = "Utc::now")]
    pub consumed_at: DateTime<Utc>,
}

/// Water log response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterLogResponse {
    pub id: String,
    pub amount_ml: i32,
    pub consumed_at: DateTime<Utc>,
}

/// Daily water total response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyWaterResponse {
    pub date: NaiveDate,
    pub total_ml: i64,
    pub entry_count: usize,
}

/// Log steps request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogStepsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[validate(range(max = 200_000))]
    pub steps: u32,
}

/// Step log response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepLogResponse {
    pub date: NaiveDate,
    pub steps: u32,
    pub source: DataSource,
}

/// Daily workout summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyWorkoutSummary {
    pub date: NaiveDate,
    pub workouts: usize,
    pub duration_minutes: i32,
    pub calories_burned: i32,
}

/// Weekly workout summary response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySummaryResponse {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_workouts: usize,
    pub total_duration_minutes: i32,
    pub total_calories_burned: i32,
    pub daily_breakdown: Vec<DailyWorkoutSummary>,
}

// ============================================================================
// Gamification Types
// ============================================================================

/// Achievement response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: AchievementCategory,
    pub tier: AchievementTier,
    pub progress: u32,
    pub target: u32,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub points: u32,
}

/// Achievements list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementsListResponse {
    pub achievements: Vec<AchievementResponse>,
    pub total_points: u32,
    pub level: u32,
}

/// Response for an achievement evaluation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateAchievementsResponse {
    /// Achievements newly unlocked by this pass
    pub unlocked: Vec<AchievementResponse>,
    pub total_points: u32,
    pub level: u32,
}

/// Streak response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakResponse {
    pub current: u32,
    pub longest: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_workout_date: Option<NaiveDate>,
}

/// Level and points response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelResponse {
    pub level: u32,
    pub points: u32,
    pub progress_percent: u8,
}

/// Challenge response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: GoalCategory,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub target: u32,
    pub progress: u32,
    pub completed: bool,
    pub points: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<String>,
    pub difficulty: ChallengeDifficulty,
}

/// Catalog challenge entry (not yet started; no window anchored)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeCatalogResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: GoalCategory,
    pub target: u32,
    pub days: i64,
    pub points: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<String>,
    pub difficulty: ChallengeDifficulty,
}

/// Custom challenge definition for user-started challenges
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CustomChallengeInput {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: GoalCategory,
    #[validate(range(min = 1))]
    pub target: u32,
    /// Duration in days from start
    #[validate(range(min = 1, max = 90))]
    pub days: i64,
    pub points: u32,
    #[serde(default)]
    pub difficulty: ChallengeDifficulty,
}

/// Start challenge request: a catalog id or a custom definition
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StartChallengeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomChallengeInput>,
}

// ============================================================================
// Device Import Types
// ============================================================================

/// Which data kinds to import from the device bridge
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    Steps,
    Workouts,
    #[default]
    All,
}

/// Device import request
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ImportRequest {
    #[serde(default)]
    pub kind: ImportKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

/// Device import result
///
/// Partial data is not a failure: a fetch error for one kind degrades that
/// kind to zero entries and is reported in `errors`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResultResponse {
    pub success: bool,
    pub steps_imported: usize,
    pub workouts_imported: usize,
    pub errors: Vec<String>,
}
