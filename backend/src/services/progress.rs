//! Goal progress evaluator
//!
//! Given one goal and a snapshot of the activity logs, computes an updated
//! `(progress, completed, current_value)` tuple using category-specific
//! rules. The evaluation itself is a pure function; [`ProgressService`]
//! applies results to the registry and runs completion hooks.
//!
//! Goals whose structured spec carries no scorable target (nutrition,
//! health, exercise-specific goals, unmatched free text) are skipped and
//! rely entirely on manual milestones.

use chrono::{DateTime, NaiveDate, Utc};
use fittrack_shared::goal_spec::GoalSpec;
use fittrack_shared::models::{Goal, GoalCategory, GoalDirection};
use fittrack_shared::types::EvaluateGoalsResponse;
use fittrack_shared::units::VolumeUnit;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::ApiError;
use crate::services::calendar;
use crate::services::challenges::ChallengeService;
use crate::state::AppState;
use crate::store::ActivityState;

/// Result of evaluating one goal against an activity snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub progress: u8,
    pub completed: bool,
    pub current_value: Option<f64>,
    /// Per-day completion map, present only for weekly "daily" water goals
    pub daily_progress: Option<BTreeMap<NaiveDate, bool>>,
}

/// Evaluate a goal against an activity snapshot.
///
/// Returns `None` when no automatic rule applies; the goal's stored
/// progress is left at its prior value.
pub fn evaluate(goal: &Goal, activity: &ActivityState, today: NaiveDate) -> Option<Evaluation> {
    if goal.spec.is_empty() {
        return None;
    }
    match goal.category {
        GoalCategory::Weight => evaluate_weight(goal, activity),
        GoalCategory::Workout => evaluate_workout(goal, activity),
        GoalCategory::Water => evaluate_water(&goal.spec, activity, today),
        GoalCategory::Steps => evaluate_steps(&goal.spec, activity, today),
        // Nutrition, health and other goals are milestone-driven only
        _ => None,
    }
}

fn evaluate_weight(goal: &Goal, activity: &ActivityState) -> Option<Evaluation> {
    let direction = goal.spec.direction?;
    let target = goal.spec.target.filter(|t| *t > 0.0)?;

    // Need a start point and a current point
    if activity.weights.len() < 2 {
        return None;
    }

    let mut sorted: Vec<_> = activity.weights.iter().collect();
    sorted.sort_by_key(|w| w.recorded_at);

    // Start weight: the entry at or just before goal creation, falling back
    // to the earliest entry for goals created before any logging
    let start = sorted
        .iter()
        .rev()
        .find(|w| w.recorded_at <= goal.created_at)
        .unwrap_or(&sorted[0]);
    let current = sorted.last().expect("len >= 2");

    let actual = match direction {
        GoalDirection::Loss => start.weight_kg - current.weight_kg,
        GoalDirection::Gain => current.weight_kg - start.weight_kg,
    };

    Some(Evaluation {
        progress: ratio_percent(actual, target),
        completed: actual >= target,
        current_value: Some(current.weight_kg),
        daily_progress: None,
    })
}

fn evaluate_workout(goal: &Goal, activity: &ActivityState) -> Option<Evaluation> {
    let target = goal.spec.target.filter(|t| *t >= 1.0)?;

    let count = activity
        .workouts
        .iter()
        .filter(|w| w.completed && w.started_at >= goal.created_at)
        .count();

    Some(Evaluation {
        progress: ratio_percent(count as f64, target),
        completed: count as f64 >= target,
        current_value: Some(count as f64),
        daily_progress: None,
    })
}

fn evaluate_water(spec: &GoalSpec, activity: &ActivityState, today: NaiveDate) -> Option<Evaluation> {
    let target_liters = spec.target.filter(|t| *t > 0.0)?;
    let target_ml = VolumeUnit::Liters.to_ml(target_liters);

    let intake_on = |date: NaiveDate| -> f64 {
        activity
            .water
            .iter()
            .filter(|w| w.consumed_at.date_naive() == date)
            .map(|w| f64::from(w.amount_ml))
            .sum()
    };

    if spec.per_day {
        // Weekly "daily" goal: score each day of the current calendar week
        let mut daily = BTreeMap::new();
        let mut days_met = 0u32;
        for date in calendar::week_dates(today) {
            let met = intake_on(date) >= target_ml;
            if met {
                days_met += 1;
            }
            daily.insert(date, met);
        }

        Some(Evaluation {
            progress: ratio_percent(f64::from(days_met), 7.0),
            completed: days_met == 7,
            current_value: Some(intake_on(today) / 1000.0),
            daily_progress: Some(daily),
        })
    } else {
        let today_ml = intake_on(today);
        Some(Evaluation {
            progress: ratio_percent(today_ml, target_ml),
            completed: today_ml >= target_ml,
            current_value: Some(today_ml / 1000.0),
            daily_progress: None,
        })
    }
}

fn evaluate_steps(spec: &GoalSpec, activity: &ActivityState, today: NaiveDate) -> Option<Evaluation> {
    let target = spec.target.filter(|t| *t >= 1.0)?;
    let current = activity
        .steps
        .get(&today)
        .map(|entry| entry.steps)
        .unwrap_or(0);

    Some(Evaluation {
        progress: ratio_percent(f64::from(current), target),
        completed: f64::from(current) >= target,
        current_value: Some(f64::from(current)),
        daily_progress: None,
    })
}

/// `min(100, round(actual / target * 100))`, floored at 0
fn ratio_percent(actual: f64, target: f64) -> u8 {
    if actual <= 0.0 {
        return 0;
    }
    ((actual / target) * 100.0).round().min(100.0) as u8
}

/// Progress evaluation orchestrator
pub struct ProgressService;

impl ProgressService {
    /// Evaluate one goal and write the result back to the registry.
    ///
    /// Completed goals are not re-evaluated, but every invocation stamps
    /// `last_checked`. Stored progress never decreases.
    pub async fn check_goal(state: &AppState, id: Uuid) -> Result<Goal, ApiError> {
        let goal = state
            .goals
            .get(id)
            .await
            .ok_or_else(|| ApiError::NotFound("Goal not found".to_string()))?;

        let now = Utc::now();
        if goal.completed {
            return state
                .goals
                .update(id, |g| g.last_checked = Some(now))
                .await
                .ok_or_else(|| ApiError::NotFound("Goal not found".to_string()));
        }

        let activity = state.activity.snapshot().await;
        let evaluation = evaluate(&goal, &activity, now.date_naive());

        let updated = state
            .goals
            .update(id, |g| Self::apply(g, evaluation, now))
            .await
            .ok_or_else(|| ApiError::NotFound("Goal not found".to_string()))?;

        if updated.completed && !goal.completed {
            ChallengeService::record_goal_completion(state).await;
        }

        Ok(updated)
    }

    /// Evaluate every incomplete goal
    pub async fn check_all(state: &AppState) -> Result<EvaluateGoalsResponse, ApiError> {
        let snapshot = state.goals.snapshot().await;
        let pending: Vec<_> = snapshot
            .goals
            .iter()
            .filter(|g| !g.completed)
            .map(|g| g.id)
            .collect();

        let mut newly_completed = Vec::new();
        for id in &pending {
            let updated = Self::check_goal(state, *id).await?;
            if updated.completed {
                newly_completed.push(updated.id.to_string());
            }
        }

        Ok(EvaluateGoalsResponse {
            evaluated: pending.len(),
            newly_completed,
        })
    }

    fn apply(goal: &mut Goal, evaluation: Option<Evaluation>, now: DateTime<Utc>) {
        goal.last_checked = Some(now);
        let Some(eval) = evaluation else {
            return;
        };

        goal.progress = goal.progress.max(eval.progress);
        if eval.current_value.is_some() {
            goal.current_value = eval.current_value;
        }
        if let Some(daily) = eval.daily_progress {
            goal.daily_progress = daily;
        }
        if eval.completed {
            goal.completed = true;
            goal.completed_at = Some(now);
            goal.progress = 100;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use fittrack_shared::models::{DataSource, Timeframe, WaterLog, WeightLog, WorkoutLog};
    use fittrack_shared::models::StepLog;
    use proptest::prelude::*;

    fn goal(category: GoalCategory, text: &str, created_at: DateTime<Utc>) -> Goal {
        Goal {
            id: Uuid::new_v4(),
            text: text.to_string(),
            category,
            timeframe: Timeframe::Weekly,
            spec: GoalSpec::infer(category, text),
            created_at,
            target_date: None,
            current_value: None,
            progress: 0,
            completed: false,
            completed_at: None,
            milestones: vec![],
            daily_progress: Default::default(),
            last_checked: None,
        }
    }

    fn weight_log(kg: f64, at: DateTime<Utc>) -> WeightLog {
        WeightLog {
            id: Uuid::new_v4(),
            weight_kg: kg,
            recorded_at: at,
            source: DataSource::Manual,
        }
    }

    fn workout(at: DateTime<Utc>, completed: bool) -> WorkoutLog {
        WorkoutLog {
            id: Uuid::new_v4(),
            name: None,
            workout_type: "cardio".to_string(),
            started_at: at,
            duration_minutes: Some(30),
            calories_burned: None,
            completed,
            source: DataSource::Manual,
            sets: vec![],
        }
    }

    fn day(offset: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap() + Duration::days(offset)
    }

    #[test]
    fn test_weight_loss_partial_progress() {
        let created = day(0);
        let goal = goal(GoalCategory::Weight, "Lose 5 kg", created);
        let activity = ActivityState {
            weights: vec![weight_log(80.0, created), weight_log(77.0, day(10))],
            ..Default::default()
        };

        let eval = evaluate(&goal, &activity, day(10).date_naive()).unwrap();
        assert_eq!(eval.progress, 60);
        assert!(!eval.completed);
        assert_eq!(eval.current_value, Some(77.0));
    }

    #[test]
    fn test_weight_loss_completion() {
        let created = day(0);
        let goal = goal(GoalCategory::Weight, "Lose 5 kg", created);
        let activity = ActivityState {
            weights: vec![weight_log(80.0, created), weight_log(74.0, day(20))],
            ..Default::default()
        };

        let eval = evaluate(&goal, &activity, day(20).date_naive()).unwrap();
        assert_eq!(eval.progress, 100);
        assert!(eval.completed);
    }

    #[test]
    fn test_weight_gain_direction() {
        let created = day(0);
        let goal = goal(GoalCategory::Weight, "Gain 4 kg", created);
        let activity = ActivityState {
            weights: vec![weight_log(70.0, created), weight_log(71.0, day(14))],
            ..Default::default()
        };

        let eval = evaluate(&goal, &activity, day(14).date_naive()).unwrap();
        assert_eq!(eval.progress, 25);
        assert!(!eval.completed);
    }

    #[test]
    fn test_weight_needs_two_entries() {
        let goal = goal(GoalCategory::Weight, "Lose 5 kg", day(0));
        let activity = ActivityState {
            weights: vec![weight_log(80.0, day(0))],
            ..Default::default()
        };
        assert!(evaluate(&goal, &activity, day(1).date_naive()).is_none());
    }

    #[test]
    fn test_weight_moving_wrong_direction_is_zero() {
        let created = day(0);
        let goal = goal(GoalCategory::Weight, "Lose 5 kg", created);
        let activity = ActivityState {
            weights: vec![weight_log(80.0, created), weight_log(82.0, day(7))],
            ..Default::default()
        };

        let eval = evaluate(&goal, &activity, day(7).date_naive()).unwrap();
        assert_eq!(eval.progress, 0);
        assert!(!eval.completed);
    }

    #[test]
    fn test_workout_count_progress() {
        let created = day(0);
        let goal = goal(GoalCategory::Workout, "Complete 10 workouts", created);
        let activity = ActivityState {
            workouts: vec![
                workout(day(1), true),
                workout(day(2), true),
                workout(day(3), true),
                workout(day(4), false),    // not completed: ignored
                workout(day(-3), true),    // before goal creation: ignored
            ],
            ..Default::default()
        };

        let eval = evaluate(&goal, &activity, day(5).date_naive()).unwrap();
        assert_eq!(eval.progress, 30);
        assert_eq!(eval.current_value, Some(3.0));
        assert!(!eval.completed);
    }

    #[test]
    fn test_water_weekly_daily_goal() {
        // 2024-06-09 is a Sunday; evaluate on Wednesday 2024-06-12
        let sunday = Utc.with_ymd_and_hms(2024, 6, 9, 9, 0, 0).unwrap();
        let goal = goal(GoalCategory::Water, "drink 2L daily", sunday);

        let intake = |offset: i64, ml: i32| WaterLog {
            id: Uuid::new_v4(),
            amount_ml: ml,
            consumed_at: sunday + Duration::days(offset),
        };
        let activity = ActivityState {
            // Threshold met on Sunday, Monday and Wednesday
            water: vec![
                intake(0, 1200),
                intake(0, 900),
                intake(1, 2000),
                intake(2, 500),
                intake(3, 2500),
            ],
            ..Default::default()
        };

        let today = (sunday + Duration::days(3)).date_naive();
        let eval = evaluate(&goal, &activity, today).unwrap();
        assert_eq!(eval.progress, 43);
        assert!(!eval.completed);

        let daily = eval.daily_progress.unwrap();
        assert_eq!(daily.len(), 7);
        assert_eq!(daily.values().filter(|met| **met).count(), 3);
        assert!(daily[&sunday.date_naive()]);
        assert!(!daily[&(sunday.date_naive() + Duration::days(2))]);
    }

    #[test]
    fn test_water_plain_daily_goal() {
        let created = day(0);
        let goal = goal(GoalCategory::Water, "Drink 2 liters of water", created);
        let activity = ActivityState {
            water: vec![WaterLog {
                id: Uuid::new_v4(),
                amount_ml: 1500,
                consumed_at: day(0),
            }],
            ..Default::default()
        };

        let eval = evaluate(&goal, &activity, day(0).date_naive()).unwrap();
        assert_eq!(eval.progress, 75);
        assert!(!eval.completed);
        assert_eq!(eval.current_value, Some(1.5));
    }

    #[test]
    fn test_steps_goal() {
        let created = day(0);
        let goal = goal(GoalCategory::Steps, "Walk 10000 steps", created);
        let today = day(0).date_naive();

        let mut activity = ActivityState::default();
        activity.steps.insert(
            today,
            StepLog {
                date: today,
                steps: 4500,
                source: DataSource::DeviceBridge,
            },
        );
        let eval = evaluate(&goal, &activity, today).unwrap();
        assert_eq!(eval.progress, 45);
        assert!(!eval.completed);

        activity.steps.get_mut(&today).unwrap().steps = 10_000;
        let eval = evaluate(&goal, &activity, today).unwrap();
        assert_eq!(eval.progress, 100);
        assert!(eval.completed);
    }

    #[test]
    fn test_unparseable_text_is_skipped() {
        let goal = goal(GoalCategory::Water, "stay hydrated", day(0));
        let activity = ActivityState::default();
        assert!(evaluate(&goal, &activity, day(0).date_naive()).is_none());
    }

    #[test]
    fn test_nutrition_goals_are_never_scored() {
        let goal = goal(GoalCategory::Nutrition, "Eat 120 g protein", day(0));
        let activity = ActivityState::default();
        assert!(evaluate(&goal, &activity, day(0).date_naive()).is_none());
    }

    #[test]
    fn test_apply_keeps_progress_monotonic() {
        let mut g = goal(GoalCategory::Steps, "Walk 10000 steps", day(0));
        g.progress = 80;

        ProgressService::apply(
            &mut g,
            Some(Evaluation {
                progress: 45,
                completed: false,
                current_value: Some(4500.0),
                daily_progress: None,
            }),
            day(1),
        );
        assert_eq!(g.progress, 80);
        assert_eq!(g.current_value, Some(4500.0));
        assert!(g.last_checked.is_some());
    }

    #[test]
    fn test_apply_completion_pins_progress_to_100() {
        let mut g = goal(GoalCategory::Steps, "Walk 10000 steps", day(0));
        ProgressService::apply(
            &mut g,
            Some(Evaluation {
                progress: 100,
                completed: true,
                current_value: Some(10_000.0),
                daily_progress: None,
            }),
            day(1),
        );
        assert!(g.completed);
        assert_eq!(g.progress, 100);
        assert!(g.completed_at.is_some());
    }

    proptest! {
        #[test]
        fn ratio_percent_is_bounded(actual in -1000.0f64..10_000.0, target in 0.1f64..10_000.0) {
            let pct = ratio_percent(actual, target);
            prop_assert!(pct <= 100);
        }

        #[test]
        fn ratio_percent_complete_at_target(target in 0.1f64..10_000.0) {
            prop_assert_eq!(ratio_percent(target, target), 100);
        }
    }
}
