//! Data models for the FitTrack application

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

use crate::goal_spec::GoalSpec;

// Re-export unit types from units module for backward compatibility
pub use crate::units::{VolumeUnit, WeightUnit};

/// Data source for activity entries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    #[default]
    Manual,
    DeviceBridge,
    Import,
}

/// Goal category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Weight,
    Workout,
    Nutrition,
    Water,
    Steps,
    Health,
    Other,
}

/// Goal timeframe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    #[default]
    Weekly,
    Monthly,
}

/// Direction of a numeric goal (lose weight vs. gain weight)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GoalDirection {
    Loss,
    Gain,
}

/// A manually-completable sub-goal contributing to a parent goal's progress
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Milestone {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
}

/// A user-defined target tied to a health/fitness category
///
/// `progress` is set only by the progress evaluator (or milestone
/// completion) and never decreases below its last computed value.
/// Every completion path sets `progress` to 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    /// Free-text description, retained as a display label
    pub text: String,
    pub category: GoalCategory,
    pub timeframe: Timeframe,
    /// Structured target captured at creation time
    #[serde(default)]
    pub spec: GoalSpec,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    /// Progress percentage, 0-100
    pub progress: u8,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    /// Per-day completion map for weekly "daily" goals (e.g. water per day)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub daily_progress: BTreeMap<NaiveDate, bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<DateTime<Utc>>,
}

/// Achievement category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Workout,
    Nutrition,
    Weight,
    Steps,
    Streak,
    Special,
}

/// Achievement tier (cosmetic only)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum AchievementTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

/// A catalog-defined, automatically-tracked accomplishment
///
/// Progress is clamped to `[0, target]`. Once completed, progress, points
/// and completion date are frozen until the whole catalog is reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    /// Stable catalog id, not user-creatable
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

/// Challenge difficulty tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeDifficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// A time-boxed challenge, catalog-defined or user-started
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
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

/// Consecutive-workout-day streak state
///
/// `longest` is a monotonic max; it never decreases even when the current
/// streak resets.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Streak {
    pub current: u32,
    pub longest: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_workout_date: Option<NaiveDate>,
    /// Distinct calendar dates with at least one completed workout
    #[serde(default)]
    pub workout_dates: BTreeSet<NaiveDate>,
}

/// A single set within a strength workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub exercise: String,
    pub reps: u32,
    pub weight_kg: f64,
}

/// A logged workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutLog {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Workout type tag (e.g. "strength", "cardio", "yoga")
    pub workout_type: String,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<i32>,
    pub completed: bool,
    pub source: DataSource,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sets: Vec<WorkoutSet>,
}

/// A logged weight measurement, stored in kilograms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightLog {
    pub id: Uuid,
    pub weight_kg: f64,
    pub recorded_at: DateTime<Utc>,
    pub source: DataSource,
}

/// A logged water intake entry, stored in milliliters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterLog {
    pub id: Uuid,
    pub amount_ml: i32,
    pub consumed_at: DateTime<Utc>,
}

/// Step count for one calendar date
///
/// One entry per date; on duplicate writes the larger step count wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepLog {
    pub date: NaiveDate,
    pub steps: u32,
    pub source: DataSource,
}

/// Best estimated one-rep max recorded for an exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalRecord {
    pub exercise: String,
    pub estimated_1rm_kg: f64,
    pub achieved_at: DateTime<Utc>,
}
