//! Gamification store
//!
//! Holds the achievement catalog state, active challenges, the streak
//! singleton and the points/level accumulator. Seeded from the static
//! catalog at creation; the catalog only returns to its initial state via
//! an explicit reset.

use chrono::NaiveDate;
use fittrack_shared::models::{Achievement, Challenge, Streak};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::Persister;
use crate::catalog;

/// Full gamification state, persisted as one blob
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamificationState {
    pub achievements: Vec<Achievement>,
    /// Active challenge set (catalog-started and user-started)
    pub challenges: Vec<Challenge>,
    pub streak: Streak,
    pub points: u32,
    pub level: u32,
}

impl GamificationState {
    /// Initial state: locked catalog, no challenges, zero streak and points
    pub fn initial() -> Self {
        Self {
            achievements: catalog::achievements(),
            challenges: Vec::new(),
            streak: Streak::default(),
            points: 0,
            level: 1,
        }
    }
}

/// Store for achievements, challenges, streak and points
pub struct GamificationStore {
    state: RwLock<GamificationState>,
    persister: Persister,
}

impl GamificationStore {
    pub fn new(persister: Persister) -> Self {
        Self {
            state: RwLock::new(GamificationState::initial()),
            persister,
        }
    }

    /// Replace in-memory state with the persisted blob, if one exists
    pub async fn rehydrate(&self) {
        if let Some(loaded) = self.persister.load::<GamificationState>().await {
            *self.state.write().await = loaded;
        }
    }

    /// Moment-in-time snapshot for evaluation passes
    pub async fn snapshot(&self) -> GamificationState {
        self.state.read().await.clone()
    }

    /// Apply a mutation to the whole state under one lock, then flush
    pub async fn mutate<F, R>(&self, mutate: F) -> R
    where
        F: FnOnce(&mut GamificationState) -> R,
    {
        let mut state = self.state.write().await;
        let result = mutate(&mut state);
        self.persister.flush(&*state);
        result
    }

    /// Record a completed-workout date for streak derivation
    pub async fn add_workout_date(&self, date: NaiveDate) {
        self.mutate(|state| {
            state.streak.workout_dates.insert(date);
        })
        .await;
    }

    /// Reset the whole gamification state to the initial catalog
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        *state = GamificationState::initial();
        self.persister.flush(&*state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn test_store() -> GamificationStore {
        GamificationStore::new(Persister::new(
            Arc::new(MemoryStore::new()),
            "test:gamification",
        ))
    }

    #[tokio::test]
    async fn test_initial_state_is_locked_catalog() {
        let snapshot = test_store().snapshot().await;
        assert!(!snapshot.achievements.is_empty());
        assert!(snapshot.achievements.iter().all(|a| !a.completed));
        assert_eq!(snapshot.points, 0);
        assert_eq!(snapshot.level, 1);
    }

    #[tokio::test]
    async fn test_reset_restores_initial_state() {
        let store = test_store();
        store
            .mutate(|state| {
                state.points = 500;
                state.level = 4;
                state.achievements[0].completed = true;
            })
            .await;

        store.reset().await;
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.points, 0);
        assert!(!snapshot.achievements[0].completed);
    }
}
