//! Device data import
//!
//! Sequential import from the health-data bridge: authorization, then the
//! step fetch, then the workout fetch, each independently caught so a
//! failure in one data type does not block the other. A failed fetch
//! degrades to empty data; partial data is not treated as total failure.
//!
//! There is no cancellation for an in-flight import and no guard against
//! overlapping imports: concurrent writes to the same date's step log
//! resolve by the larger count winning.

use chrono::Utc;
use fittrack_shared::models::{DataSource, StepLog, WorkoutLog};
use fittrack_shared::types::{ImportKind, ImportRequest, ImportResultResponse};
use tracing::{info, warn};
use uuid::Uuid;

use crate::device::DataKind;
use crate::error::ApiError;
use crate::services::streak;
use crate::state::AppState;

/// Device import orchestrator
pub struct ImportService;

impl ImportService {
    /// Import the requested data kinds from the device bridge
    pub async fn import(
        state: &AppState,
        req: ImportRequest,
    ) -> Result<ImportResultResponse, ApiError> {
        let now = Utc::now();
        let today = now.date_naive();
        let start = req.start.unwrap_or_else(|| {
            today
                .and_hms_opt(0, 0, 0)
                .expect("midnight is always valid")
                .and_utc()
        });
        let end = req.end.unwrap_or(now);

        let want_steps = matches!(req.kind, ImportKind::Steps | ImportKind::All);
        let want_workouts = matches!(req.kind, ImportKind::Workouts | ImportKind::All);

        let mut errors = Vec::new();
        let mut steps_imported = 0usize;
        let mut workouts_imported = 0usize;

        let kinds: Vec<DataKind> = [
            want_steps.then_some(DataKind::Steps),
            want_workouts.then_some(DataKind::Workouts),
        ]
        .into_iter()
        .flatten()
        .collect();

        if !state.device.is_available().await {
            warn!("Device bridge unavailable; nothing imported");
            errors.push("device bridge unavailable".to_string());
            return Ok(ImportResultResponse {
                success: true,
                steps_imported,
                workouts_imported,
                errors,
            });
        }

        if let Err(e) = state.device.request_authorization(&kinds).await {
            warn!("Device authorization failed: {e:#}");
            errors.push(format!("authorization: {e}"));
        }

        if want_steps {
            match state.device.step_count(start, end).await {
                Ok(steps) => {
                    let capped = u32::try_from(steps).unwrap_or(u32::MAX);
                    state
                        .activity
                        .upsert_steps(StepLog {
                            date: today,
                            steps: capped,
                            source: DataSource::DeviceBridge,
                        })
                        .await;
                    steps_imported = 1;
                }
                Err(e) => {
                    warn!("Step import failed: {e:#}");
                    errors.push(format!("steps: {e}"));
                }
            }
        }

        if want_workouts {
            match state.device.workouts(start, end).await {
                Ok(device_workouts) => {
                    workouts_imported = device_workouts.len();
                    for dw in device_workouts {
                        let date = dw.started_at.date_naive();
                        state
                            .activity
                            .add_workout(WorkoutLog {
                                id: Uuid::new_v4(),
                                name: dw.name,
                                workout_type: dw.workout_type,
                                started_at: dw.started_at,
                                duration_minutes: dw.duration_minutes,
                                calories_burned: dw.calories_burned,
                                completed: true,
                                source: DataSource::DeviceBridge,
                                sets: vec![],
                            })
                            .await;
                        state.gamification.add_workout_date(date).await;
                    }
                    if workouts_imported > 0 {
                        state
                            .gamification
                            .mutate(|s| s.streak = streak::recalculate(&s.streak, today))
                            .await;
                    }
                }
                Err(e) => {
                    warn!("Workout import failed: {e:#}");
                    errors.push(format!("workouts: {e}"));
                }
            }
        }

        info!(
            steps = steps_imported,
            workouts = workouts_imported,
            errors = errors.len(),
            "Device import finished"
        );

        Ok(ImportResultResponse {
            success: true,
            steps_imported,
            workouts_imported,
            errors,
        })
    }
}
