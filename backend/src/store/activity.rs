//! Activity log store
//!
//! Append-only logs of workouts, weight measurements, water intake and
//! per-day step counts: the raw evidence the evaluators read.

use chrono::NaiveDate;
use fittrack_shared::models::{PersonalRecord, StepLog, WaterLog, WeightLog, WorkoutLog};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Persister;

/// Full activity log state, persisted as one blob
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ActivityState {
    pub workouts: Vec<WorkoutLog>,
    pub weights: Vec<WeightLog>,
    pub water: Vec<WaterLog>,
    /// One entry per calendar date
    pub steps: BTreeMap<NaiveDate, StepLog>,
    /// Best estimated 1RM per exercise
    pub records: Vec<PersonalRecord>,
}

/// Store for raw activity logs
pub struct ActivityStore {
    state: RwLock<ActivityState>,
    persister: Persister,
}

impl ActivityStore {
    pub fn new(persister: Persister) -> Self {
        Self {
            state: RwLock::new(ActivityState::default()),
            persister,
        }
    }

    /// Replace in-memory state with the persisted blob, if one exists
    pub async fn rehydrate(&self) {
        if let Some(loaded) = self.persister.load::<ActivityState>().await {
            *self.state.write().await = loaded;
        }
    }

    /// Moment-in-time snapshot for evaluation passes
    pub async fn snapshot(&self) -> ActivityState {
        self.state.read().await.clone()
    }

    pub async fn add_workout(&self, workout: WorkoutLog) {
        let mut state = self.state.write().await;
        state.workouts.push(workout);
        self.persister.flush(&*state);
    }

    pub async fn delete_workout(&self, id: Uuid) -> bool {
        let mut state = self.state.write().await;
        let before = state.workouts.len();
        state.workouts.retain(|w| w.id != id);
        let deleted = state.workouts.len() != before;
        if deleted {
            self.persister.flush(&*state);
        }
        deleted
    }

    pub async fn add_weight(&self, entry: WeightLog) {
        let mut state = self.state.write().await;
        state.weights.push(entry);
        self.persister.flush(&*state);
    }

    pub async fn delete_weight(&self, id: Uuid) -> bool {
        let mut state = self.state.write().await;
        let before = state.weights.len();
        state.weights.retain(|w| w.id != id);
        let deleted = state.weights.len() != before;
        if deleted {
            self.persister.flush(&*state);
        }
        deleted
    }

    pub async fn add_water(&self, entry: WaterLog) {
        let mut state = self.state.write().await;
        state.water.push(entry);
        self.persister.flush(&*state);
    }

    /// Upsert a day's step count; on duplicate writes the larger count wins
    pub async fn upsert_steps(&self, entry: StepLog) -> StepLog {
        let mut state = self.state.write().await;
        let existing_steps = state.steps.get(&entry.date).map(|e| e.steps);
        let merged = if existing_steps.is_some_and(|steps| steps >= entry.steps) {
            state.steps[&entry.date].clone()
        } else {
            state.steps.insert(entry.date, entry.clone());
            entry
        };
        self.persister.flush(&*state);
        merged
    }

    /// Merge newly achieved personal records, replacing per-exercise bests
    pub async fn merge_records(&self, new_records: Vec<PersonalRecord>) {
        if new_records.is_empty() {
            return;
        }
        let mut state = self.state.write().await;
        for record in new_records {
            match state
                .records
                .iter_mut()
                .find(|r| r.exercise == record.exercise)
            {
                Some(existing) => *existing = record,
                None => state.records.push(record),
            }
        }
        self.persister.flush(&*state);
    }
}
