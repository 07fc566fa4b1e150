//! Achievement evaluator
//!
//! Recomputes progress for every achievement in the static catalog from
//! aggregate activity statistics and unlocks (exactly once) any entry whose
//! progress meets its target. Unlocking awards points and recomputes the
//! level. The whole evaluator is a no-op while gamification is disabled.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use fittrack_shared::models::{Achievement, Streak};
use fittrack_shared::types::{AchievementResponse, EvaluateAchievementsResponse};
use std::collections::BTreeSet;
use tracing::info;

use crate::catalog;
use crate::error::ApiError;
use crate::services::calendar;
use crate::services::levels;
use crate::services::streak;
use crate::state::AppState;
use crate::store::ActivityState;

/// Aggregate statistics feeding achievement progress
#[derive(Debug, Clone, Default)]
pub struct AchievementStats {
    pub total_workouts: u64,
    pub strength_workouts: u64,
    pub current_streak: u64,
    pub steps_today: u64,
    pub steps_this_week: u64,
    pub steps_this_month: u64,
    pub steps_all_time: u64,
    /// Longest run of consecutive weight-tracking days
    pub weight_streak_days: u64,
}

/// Compute aggregate statistics from one activity snapshot
pub fn compute_stats(activity: &ActivityState, streak: &Streak, today: NaiveDate) -> AchievementStats {
    let completed = || activity.workouts.iter().filter(|w| w.completed);

    let week = calendar::week_start(today);
    let month = calendar::month_start(today);

    let steps_in = |from: NaiveDate| -> u64 {
        activity
            .steps
            .values()
            .filter(|s| s.date >= from && s.date <= today)
            .map(|s| u64::from(s.steps))
            .sum()
    };

    AchievementStats {
        total_workouts: completed().count() as u64,
        strength_workouts: completed().filter(|w| w.workout_type == "strength").count() as u64,
        current_streak: u64::from(streak.current),
        steps_today: activity
            .steps
            .get(&today)
            .map(|s| u64::from(s.steps))
            .unwrap_or(0),
        steps_this_week: steps_in(week),
        steps_this_month: steps_in(month),
        steps_all_time: activity.steps.values().map(|s| u64::from(s.steps)).sum(),
        weight_streak_days: weight_streak_days(activity),
    }
}

/// Longest run of consecutive calendar days with a weight entry, found by
/// walking the sorted distinct dates and counting day-over-day deltas of
/// exactly one day
fn weight_streak_days(activity: &ActivityState) -> u64 {
    let dates: BTreeSet<NaiveDate> = activity
        .weights
        .iter()
        .map(|w| w.recorded_at.date_naive())
        .collect();

    let mut longest = 0u64;
    let mut run = 0u64;
    let mut prev: Option<NaiveDate> = None;
    for date in dates {
        run = match prev {
            Some(p) if date - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }
    longest
}

/// The statistic feeding a given achievement id, or `None` for entries this
/// engine does not track automatically
pub fn statistic_for(id: &str, stats: &AchievementStats) -> Option<u64> {
    match id {
        catalog::FIRST_WORKOUT | catalog::WORKOUTS_10 | catalog::WORKOUTS_50
        | catalog::WORKOUTS_100 => Some(stats.total_workouts),
        catalog::STRENGTH_10 => Some(stats.strength_workouts),
        catalog::STREAK_3 | catalog::STREAK_7 | catalog::STREAK_30 => Some(stats.current_streak),
        catalog::STEPS_10K_DAY => Some(stats.steps_today),
        catalog::STEPS_70K_WEEK => Some(stats.steps_this_week),
        catalog::STEPS_300K_MONTH => Some(stats.steps_this_month),
        catalog::STEPS_1M_TOTAL => Some(stats.steps_all_time),
        catalog::WEIGHT_WEEK | catalog::WEIGHT_MONTH => Some(stats.weight_streak_days),
        _ => None,
    }
}

/// Result of one evaluation pass over the catalog
#[derive(Debug, Clone)]
pub struct AchievementOutcome {
    pub achievements: Vec<Achievement>,
    pub unlocked: Vec<Achievement>,
    pub points_awarded: u32,
}

/// Evaluate the catalog against fresh statistics.
///
/// Completed entries are frozen. Progress is clamped to `[0, target]` and
/// only rewritten when the fresh value differs. Unlocking is idempotent:
/// a second pass over the same statistics awards nothing.
pub fn evaluate(
    achievements: &[Achievement],
    stats: &AchievementStats,
    now: DateTime<Utc>,
) -> AchievementOutcome {
    let mut updated = achievements.to_vec();
    let mut unlocked = Vec::new();
    let mut points_awarded = 0u32;

    for achievement in &mut updated {
        if achievement.completed {
            continue;
        }
        let Some(stat) = statistic_for(&achievement.id, stats) else {
            continue;
        };

        let fresh = stat.min(u64::from(achievement.target)) as u32;
        if fresh != achievement.progress {
            achievement.progress = fresh;
        }

        if achievement.progress >= achievement.target {
            achievement.completed = true;
            achievement.completed_at = Some(now);
            points_awarded += achievement.points;
            unlocked.push(achievement.clone());
        }
    }

    AchievementOutcome {
        achievements: updated,
        unlocked,
        points_awarded,
    }
}

/// Achievement evaluation orchestrator
pub struct AchievementService;

impl AchievementService {
    /// Run a full evaluation pass and apply the outcome.
    ///
    /// The streak is recomputed first so streak achievements see current
    /// data. No-op while gamification is disabled.
    pub async fn evaluate_all(state: &AppState) -> Result<EvaluateAchievementsResponse, ApiError> {
        let snapshot = state.gamification.snapshot().await;
        if !state.config.gamification.enabled {
            return Ok(EvaluateAchievementsResponse {
                unlocked: vec![],
                total_points: snapshot.points,
                level: snapshot.level,
            });
        }

        let activity = state.activity.snapshot().await;
        let now = Utc::now();
        let fresh_streak = streak::recalculate(&snapshot.streak, now.date_naive());
        let stats = compute_stats(&activity, &fresh_streak, now.date_naive());
        let outcome = evaluate(&snapshot.achievements, &stats, now);

        for achievement in &outcome.unlocked {
            // Fire-and-forget celebration signal for the UI
            info!(id = %achievement.id, points = achievement.points, "Achievement unlocked");
        }

        let (total_points, level) = state
            .gamification
            .mutate(|s| {
                s.achievements = outcome.achievements.clone();
                s.streak = fresh_streak.clone();
                s.points += outcome.points_awarded;
                s.level = levels::level_for(s.points);
                (s.points, s.level)
            })
            .await;

        Ok(EvaluateAchievementsResponse {
            unlocked: outcome.unlocked.iter().map(to_response).collect(),
            total_points,
            level,
        })
    }
}

pub(crate) fn to_response(achievement: &Achievement) -> AchievementResponse {
    AchievementResponse {
        id: achievement.id.clone(),
        title: achievement.title.clone(),
        description: achievement.description.clone(),
        category: achievement.category,
        tier: achievement.tier,
        progress: achievement.progress,
        target: achievement.target,
        completed: achievement.completed,
        completed_at: achievement.completed_at,
        points: achievement.points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fittrack_shared::models::{DataSource, WeightLog, WorkoutLog};
    use proptest::prelude::*;
    use uuid::Uuid;

    fn stats_with(total_workouts: u64) -> AchievementStats {
        AchievementStats {
            total_workouts,
            ..Default::default()
        }
    }

    #[test]
    fn test_first_workout_unlocks() {
        let outcome = evaluate(&catalog::achievements(), &stats_with(1), Utc::now());

        let unlocked_ids: Vec<_> = outcome.unlocked.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(unlocked_ids, vec![catalog::FIRST_WORKOUT]);
        assert_eq!(outcome.points_awarded, 10);
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let first = evaluate(&catalog::achievements(), &stats_with(12), Utc::now());
        assert!(first.points_awarded > 0);

        // Same statistics again: nothing new unlocks, nothing is re-awarded
        let second = evaluate(&first.achievements, &stats_with(12), Utc::now());
        assert!(second.unlocked.is_empty());
        assert_eq!(second.points_awarded, 0);
    }

    #[test]
    fn test_completed_entries_are_frozen() {
        let first = evaluate(&catalog::achievements(), &stats_with(1), Utc::now());
        let unlocked_at = first
            .achievements
            .iter()
            .find(|a| a.id == catalog::FIRST_WORKOUT)
            .unwrap()
            .completed_at;

        // Statistics regress (history deleted); the unlocked entry keeps its state
        let second = evaluate(&first.achievements, &stats_with(0), Utc::now());
        let frozen = second
            .achievements
            .iter()
            .find(|a| a.id == catalog::FIRST_WORKOUT)
            .unwrap();
        assert!(frozen.completed);
        assert_eq!(frozen.progress, 1);
        assert_eq!(frozen.completed_at, unlocked_at);
    }

    #[test]
    fn test_untracked_entries_stay_at_zero() {
        let stats = AchievementStats {
            total_workouts: 500,
            strength_workouts: 500,
            current_streak: 500,
            steps_today: 1_000_000,
            steps_this_week: 1_000_000,
            steps_this_month: 1_000_000,
            steps_all_time: 10_000_000,
            weight_streak_days: 500,
        };
        let outcome = evaluate(&catalog::achievements(), &stats, Utc::now());

        for id in [catalog::BALANCED_WEEK, catalog::BMI_HEALTHY, catalog::PHOTO_PROGRESS] {
            let entry = outcome.achievements.iter().find(|a| a.id == id).unwrap();
            assert_eq!(entry.progress, 0);
            assert!(!entry.completed);
        }
    }

    #[test]
    fn test_weight_streak_days() {
        let mut activity = ActivityState::default();
        let base = Utc::now();
        // Days 0,1,2 then a gap, then days 5,6
        for offset in [0i64, 1, 2, 5, 6] {
            activity.weights.push(WeightLog {
                id: Uuid::new_v4(),
                weight_kg: 80.0,
                recorded_at: base + Duration::days(offset),
                source: DataSource::Manual,
            });
        }
        assert_eq!(weight_streak_days(&activity), 3);
    }

    #[test]
    fn test_strength_workouts_counted_by_type() {
        let mut activity = ActivityState::default();
        for (workout_type, completed) in
            [("strength", true), ("strength", true), ("cardio", true), ("strength", false)]
        {
            activity.workouts.push(WorkoutLog {
                id: Uuid::new_v4(),
                name: None,
                workout_type: workout_type.to_string(),
                started_at: Utc::now(),
                duration_minutes: None,
                calories_burned: None,
                completed,
                source: DataSource::Manual,
                sets: vec![],
            });
        }
        let stats = compute_stats(&activity, &Streak::default(), Utc::now().date_naive());
        assert_eq!(stats.strength_workouts, 2);
        assert_eq!(stats.total_workouts, 3);
    }

    proptest! {
        #[test]
        fn progress_is_always_clamped(
            total_workouts in 0u64..10_000,
            current_streak in 0u64..10_000,
            steps in 0u64..100_000_000,
        ) {
            let stats = AchievementStats {
                total_workouts,
                strength_workouts: total_workouts,
                current_streak,
                steps_today: steps,
                steps_this_week: steps,
                steps_this_month: steps,
                steps_all_time: steps,
                weight_streak_days: current_streak,
            };
            let outcome = evaluate(&catalog::achievements(), &stats, Utc::now());
            for achievement in &outcome.achievements {
                prop_assert!(achievement.progress <= achievement.target);
            }
        }

        #[test]
        fn double_evaluation_awards_once(total_workouts in 0u64..200) {
            let stats = stats_with(total_workouts);
            let first = evaluate(&catalog::achievements(), &stats, Utc::now());
            let second = evaluate(&first.achievements, &stats, Utc::now());
            prop_assert_eq!(second.points_awarded, 0);
        }
    }
}
