//! Goal registry
//!
//! User-defined goals with milestones. CRUD plus evaluator write-backs;
//! goals are never physically deleted except by explicit user delete.

use fittrack_shared::models::Goal;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Persister;

/// Full goal registry state, persisted as one blob
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GoalState {
    pub goals: Vec<Goal>,
}

/// Store for user-defined goals
pub struct GoalStore {
    state: RwLock<GoalState>,
    persister: Persister,
}

impl GoalStore {
    pub fn new(persister: Persister) -> Self {
        Self {
            state: RwLock::new(GoalState::default()),
            persister,
        }
    }

    /// Replace in-memory state with the persisted blob, if one exists
    pub async fn rehydrate(&self) {
        if let Some(loaded) = self.persister.load::<GoalState>().await {
            *self.state.write().await = loaded;
        }
    }

    /// Moment-in-time snapshot for evaluation passes
    pub async fn snapshot(&self) -> GoalState {
        self.state.read().await.clone()
    }

    pub async fn get(&self, id: Uuid) -> Option<Goal> {
        self.state
            .read()
            .await
            .goals
            .iter()
            .find(|g| g.id == id)
            .cloned()
    }

    pub async fn insert(&self, goal: Goal) {
        let mut state = self.state.write().await;
        state.goals.push(goal);
        self.persister.flush(&*state);
    }

    /// Apply a mutation to one goal, returning the updated copy
    pub async fn update<F>(&self, id: Uuid, mutate: F) -> Option<Goal>
    where
        F: FnOnce(&mut Goal),
    {
        let mut state = self.state.write().await;
        let goal = state.goals.iter_mut().find(|g| g.id == id)?;
        mutate(goal);
        let updated = goal.clone();
        self.persister.flush(&*state);
        Some(updated)
    }

    /// Immediate, unconditional delete
    pub async fn delete(&self, id: Uuid) -> bool {
        let mut state = self.state.write().await;
        let before = state.goals.len();
        state.goals.retain(|g| g.id != id);
        let deleted = state.goals.len() != before;
        if deleted {
            self.persister.flush(&*state);
        }
        deleted
    }
}
