//! FitTrack Shared Library
//!
//! This crate contains the shared types, models, and utilities used across
//! the backend engine and its tests.

pub mod goal_spec;
pub mod models;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use goal_spec::{GoalSpec, TargetUnit};
pub use types::*;

// Export units module items (canonical source for unit types)
pub use units::*;

// Export models (excluding unit types which are re-exported from units)
pub use models::{
    Achievement, AchievementCategory, AchievementTier, Challenge, ChallengeDifficulty,
    DataSource, Goal, GoalCategory, GoalDirection, Milestone, PersonalRecord, StepLog, Streak,
    Timeframe, WaterLog, WeightLog, WorkoutLog, WorkoutSet,
};
