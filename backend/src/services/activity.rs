//! Activity logging service
//!
//! Workout, weight, water and step logging plus derived summaries.
//! Logging a completed workout feeds the streak date set and the challenge
//! hooks; strength sets are checked for new personal records via estimated
//! one-rep max.

use chrono::{NaiveDate, Utc};
use fittrack_shared::models::{
    DataSource, PersonalRecord, StepLog, WaterLog, WeightLog, WorkoutLog, WorkoutSet,
};
use fittrack_shared::types::{
    DailyWaterResponse, DailyWorkoutSummary, LogStepsRequest, LogWaterRequest, LogWeightRequest,
    LogWorkoutRequest, LogWorkoutResponse, PersonalRecordResponse, StepLogResponse,
    WaterLogResponse, WeeklySummaryResponse, WeightLogResponse, WorkoutResponse,
};
use fittrack_shared::units::WeightUnit;
use fittrack_shared::validation::{validate_duration, validate_steps, validate_water_amount,
    validate_weight};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::services::calendar;
use crate::services::challenges::ChallengeService;
use crate::services::streak;
use crate::state::AppState;

/// Activity service for business logic
pub struct ActivityService;

impl ActivityService {
    /// Log a workout.
    ///
    /// Completed workouts update the streak date set and bump workout
    /// challenges. Strength sets are scanned for new personal records.
    pub async fn log_workout(
        state: &AppState,
        req: LogWorkoutRequest,
    ) -> Result<LogWorkoutResponse, ApiError> {
        req.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        if let Some(minutes) = req.duration_minutes {
            validate_duration(minutes).map_err(ApiError::Validation)?;
        }

        let workout = WorkoutLog {
            id: Uuid::new_v4(),
            name: req.name,
            workout_type: req.workout_type,
            started_at: req.started_at,
            duration_minutes: req.duration_minutes,
            calories_burned: req.calories_burned,
            completed: req.completed,
            source: DataSource::Manual,
            sets: req
                .sets
                .into_iter()
                .map(|s| WorkoutSet {
                    exercise: s.exercise,
                    reps: s.reps,
                    weight_kg: s.weight_kg,
                })
                .collect(),
        };

        let snapshot = state.activity.snapshot().await;
        let new_records = detect_new_records(&snapshot.records, &workout);

        let date = workout.started_at.date_naive();
        let completed = workout.completed;
        let response = LogWorkoutResponse {
            workout: Self::workout_response(&workout),
            new_records: new_records
                .iter()
                .map(|r| PersonalRecordResponse {
                    exercise: r.exercise.clone(),
                    estimated_1rm_kg: r.estimated_1rm_kg,
                    achieved_at: r.achieved_at,
                })
                .collect(),
        };

        state.activity.add_workout(workout).await;
        state.activity.merge_records(new_records).await;

        if completed {
            state
                .gamification
                .mutate(|s| {
                    s.streak.workout_dates.insert(date);
                    s.streak = streak::recalculate(&s.streak, Utc::now().date_naive());
                })
                .await;
            ChallengeService::record_workout(state).await;
        }

        Ok(response)
    }

    /// List workouts, most recent first
    pub async fn list_workouts(state: &AppState) -> Vec<WorkoutResponse> {
        let mut workouts = state.activity.snapshot().await.workouts;
        workouts.sort_by_key(|w| std::cmp::Reverse(w.started_at));
        workouts.iter().map(Self::workout_response).collect()
    }

    pub async fn delete_workout(state: &AppState, id: Uuid) -> Result<(), ApiError> {
        if state.activity.delete_workout(id).await {
            Ok(())
        } else {
            Err(ApiError::NotFound("Workout not found".to_string()))
        }
    }

    /// Weekly workout summary for the calendar week containing `date`
    pub async fn weekly_summary(state: &AppState, date: NaiveDate) -> WeeklySummaryResponse {
        let snapshot = state.activity.snapshot().await;
        let week = calendar::week_dates(date);

        let daily_breakdown: Vec<DailyWorkoutSummary> = week
            .iter()
            .map(|day| {
                let on_day: Vec<_> = snapshot
                    .workouts
                    .iter()
                    .filter(|w| w.completed && w.started_at.date_naive() == *day)
                    .collect();
                DailyWorkoutSummary {
                    date: *day,
                    workouts: on_day.len(),
                    duration_minutes: on_day
                        .iter()
                        .filter_map(|w| w.duration_minutes)
                        .sum(),
                    calories_burned: on_day
                        .iter()
                        .filter_map(|w| w.calories_burned)
                        .sum(),
                }
            })
            .collect();

        WeeklySummaryResponse {
            week_start: week[0],
            week_end: week[6],
            total_workouts: daily_breakdown.iter().map(|d| d.workouts).sum(),
            total_duration_minutes: daily_breakdown.iter().map(|d| d.duration_minutes).sum(),
            total_calories_burned: daily_breakdown.iter().map(|d| d.calories_burned).sum(),
            daily_breakdown,
        }
    }

    /// Log a weight measurement (converted to kg)
    pub async fn log_weight(
        state: &AppState,
        req: LogWeightRequest,
    ) -> Result<WeightLogResponse, ApiError> {
        let unit = match req.unit.as_deref() {
            Some(raw) => raw
                .parse::<WeightUnit>()
                .map_err(ApiError::Validation)?,
            None => WeightUnit::Kg,
        };
        let weight_kg = unit.to_kg(req.weight);
        validate_weight(weight_kg).map_err(ApiError::Validation)?;

        let entry = WeightLog {
            id: Uuid::new_v4(),
            weight_kg,
            recorded_at: req.recorded_at,
            source: DataSource::Manual,
        };
        let response = Self::weight_response(&entry);
        state.activity.add_weight(entry).await;
        Ok(response)
    }

    /// List weight entries, most recent first
    pub async fn list_weights(state: &AppState) -> Vec<WeightLogResponse> {
        let mut weights = state.activity.snapshot().await.weights;
        weights.sort_by_key(|w| std::cmp::Reverse(w.recorded_at));
        weights.iter().map(Self::weight_response).collect()
    }

    pub async fn delete_weight(state: &AppState, id: Uuid) -> Result<(), ApiError> {
        if state.activity.delete_weight(id).await {
            Ok(())
        } else {
            Err(ApiError::NotFound("Weight entry not found".to_string()))
        }
    }

    /// Log a water intake entry
    pub async fn log_water(
        state: &AppState,
        req: LogWaterRequest,
    ) -> Result<WaterLogResponse, ApiError> {
        validate_water_amount(req.amount_ml).map_err(ApiError::Validation)?;

        let date = req.consumed_at.date_naive();
        let first_of_day = !state
            .activity
            .snapshot()
            .await
            .water
            .iter()
            .any(|w| w.consumed_at.date_naive() == date);

        let entry = WaterLog {
            id: Uuid::new_v4(),
            amount_ml: req.amount_ml,
            consumed_at: req.consumed_at,
        };
        let response = WaterLogResponse {
            id: entry.id.to_string(),
            amount_ml: entry.amount_ml,
            consumed_at: entry.consumed_at,
        };
        state.activity.add_water(entry).await;

        if first_of_day {
            ChallengeService::record_water_day(state).await;
        }
        Ok(response)
    }

    /// Total water intake for one date
    pub async fn daily_water(state: &AppState, date: NaiveDate) -> DailyWaterResponse {
        let snapshot = state.activity.snapshot().await;
        let entries: Vec<_> = snapshot
            .water
            .iter()
            .filter(|w| w.consumed_at.date_naive() == date)
            .collect();
        DailyWaterResponse {
            date,
            total_ml: entries.iter().map(|w| i64::from(w.amount_ml)).sum(),
            entry_count: entries.len(),
        }
    }

    /// Record a day's step count; the larger count wins on duplicates
    pub async fn log_steps(
        state: &AppState,
        req: LogStepsRequest,
    ) -> Result<StepLogResponse, ApiError> {
        validate_steps(req.steps).map_err(ApiError::Validation)?;

        let merged = state
            .activity
            .upsert_steps(StepLog {
                date: req.date.unwrap_or_else(|| Utc::now().date_naive()),
                steps: req.steps,
                source: DataSource::Manual,
            })
            .await;

        Ok(StepLogResponse {
            date: merged.date,
            steps: merged.steps,
            source: merged.source,
        })
    }

    /// Today's step count (0 when nothing is logged)
    pub async fn today_steps(state: &AppState) -> StepLogResponse {
        let today = Utc::now().date_naive();
        let snapshot = state.activity.snapshot().await;
        match snapshot.steps.get(&today) {
            Some(entry) => StepLogResponse {
                date: entry.date,
                steps: entry.steps,
                source: entry.source,
            },
            None => StepLogResponse {
                date: today,
                steps: 0,
                source: DataSource::Manual,
            },
        }
    }

    /// Personal records, best estimated 1RM per exercise
    pub async fn records(state: &AppState) -> Vec<PersonalRecordResponse> {
        state
            .activity
            .snapshot()
            .await
            .records
            .iter()
            .map(|r| PersonalRecordResponse {
                exercise: r.exercise.clone(),
                estimated_1rm_kg: r.estimated_1rm_kg,
                achieved_at: r.achieved_at,
            })
            .collect()
    }

    fn workout_response(workout: &WorkoutLog) -> WorkoutResponse {
        WorkoutResponse {
            id: workout.id.to_string(),
            name: workout.name.clone(),
            workout_type: workout.workout_type.clone(),
            started_at: workout.started_at,
            duration_minutes: workout.duration_minutes,
            calories_burned: workout.calories_burned,
            completed: workout.completed,
            source: workout.source,
        }
    }

    fn weight_response(entry: &WeightLog) -> WeightLogResponse {
        WeightLogResponse {
            id: entry.id.to_string(),
            weight_kg: entry.weight_kg,
            recorded_at: entry.recorded_at,
            source: entry.source,
        }
    }
}

/// Epley estimated one-rep max: `weight * (1 + reps / 30)`
pub fn estimated_1rm(weight_kg: f64, reps: u32) -> f64 {
    weight_kg * (1.0 + f64::from(reps) / 30.0)
}

/// Compare a workout's sets against stored bests and return new records
pub fn detect_new_records(records: &[PersonalRecord], workout: &WorkoutLog) -> Vec<PersonalRecord> {
    let mut new_records: Vec<PersonalRecord> = Vec::new();

    for set in &workout.sets {
        if set.reps == 0 || set.weight_kg <= 0.0 {
            continue;
        }
        let estimate = estimated_1rm(set.weight_kg, set.reps);

        let stored_best = records
            .iter()
            .find(|r| r.exercise == set.exercise)
            .map(|r| r.estimated_1rm_kg)
            .unwrap_or(0.0);
        let pending_best = new_records
            .iter()
            .find(|r| r.exercise == set.exercise)
            .map(|r| r.estimated_1rm_kg)
            .unwrap_or(0.0);

        if estimate > stored_best && estimate > pending_best {
            new_records.retain(|r| r.exercise != set.exercise);
            new_records.push(PersonalRecord {
                exercise: set.exercise.clone(),
                estimated_1rm_kg: estimate,
                achieved_at: workout.started_at,
            });
        }
    }

    new_records
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn strength_workout(sets: Vec<WorkoutSet>) -> WorkoutLog {
        WorkoutLog {
            id: Uuid::new_v4(),
            name: None,
            workout_type: "strength".to_string(),
            started_at: Utc::now(),
            duration_minutes: Some(60),
            calories_burned: None,
            completed: true,
            source: DataSource::Manual,
            sets,
        }
    }

    #[test]
    fn test_estimated_1rm_epley() {
        // 100 kg x 10 reps -> 100 * (1 + 10/30) = 133.33
        assert!((estimated_1rm(100.0, 10) - 133.333).abs() < 0.01);
        // A single rep is the lift itself plus the 1/30 margin
        assert!((estimated_1rm(100.0, 1) - 103.333).abs() < 0.01);
    }

    #[test]
    fn test_detect_new_records_beats_stored_best() {
        let records = vec![PersonalRecord {
            exercise: "squat".to_string(),
            estimated_1rm_kg: 120.0,
            achieved_at: Utc::now() - Duration::days(30),
        }];
        let workout = strength_workout(vec![
            WorkoutSet {
                exercise: "squat".to_string(),
                reps: 5,
                weight_kg: 110.0, // ~128.3, beats 120
            },
            WorkoutSet {
                exercise: "squat".to_string(),
                reps: 3,
                weight_kg: 100.0, // ~110, does not beat pending 128.3
            },
        ]);

        let new_records = detect_new_records(&records, &workout);
        assert_eq!(new_records.len(), 1);
        assert!((new_records[0].estimated_1rm_kg - 128.333).abs() < 0.01);
    }

    #[test]
    fn test_detect_new_records_ignores_weaker_sets() {
        let records = vec![PersonalRecord {
            exercise: "bench press".to_string(),
            estimated_1rm_kg: 100.0,
            achieved_at: Utc::now(),
        }];
        let workout = strength_workout(vec![WorkoutSet {
            exercise: "bench press".to_string(),
            reps: 5,
            weight_kg: 60.0,
        }]);

        assert!(detect_new_records(&records, &workout).is_empty());
    }

    #[test]
    fn test_detect_new_records_skips_bodyweight_sets() {
        let workout = strength_workout(vec![WorkoutSet {
            exercise: "push-up".to_string(),
            reps: 20,
            weight_kg: 0.0,
        }]);
        assert!(detect_new_records(&[], &workout).is_empty());
    }
}
