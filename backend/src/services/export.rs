//! CSV export of activity history

use anyhow::Result;
use fittrack_shared::models::{WeightLog, WorkoutLog};

/// Render workout history as CSV
pub fn workouts_csv(workouts: &[WorkoutLog]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "id",
        "name",
        "workout_type",
        "started_at",
        "duration_minutes",
        "calories_burned",
        "completed",
    ])?;

    for workout in workouts {
        writer.write_record([
            workout.id.to_string(),
            workout.name.clone().unwrap_or_default(),
            workout.workout_type.clone(),
            workout.started_at.to_rfc3339(),
            workout
                .duration_minutes
                .map(|m| m.to_string())
                .unwrap_or_default(),
            workout
                .calories_burned
                .map(|c| c.to_string())
                .unwrap_or_default(),
            workout.completed.to_string(),
        ])?;
    }

    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

/// Render weight history as CSV
pub fn weights_csv(weights: &[WeightLog]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["id", "weight_kg", "recorded_at"])?;

    for entry in weights {
        writer.write_record([
            entry.id.to_string(),
            format!("{:.1}", entry.weight_kg),
            entry.recorded_at.to_rfc3339(),
        ])?;
    }

    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}
