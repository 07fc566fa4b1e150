//! In-memory state containers with write-through persistence
//!
//! Each store owns one state object behind an `RwLock`. Mutations replace
//! whole values and immediately trigger a best-effort asynchronous flush of
//! the full state blob through a [`Persister`]. Evaluators never reach into
//! a store mid-pass; they take a cloned snapshot and operate on that one
//! moment-in-time view.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, warn};

use crate::storage::StateStore;

mod activity;
mod gamification;
mod goals;

pub use activity::{ActivityState, ActivityStore};
pub use gamification::{GamificationState, GamificationStore};
pub use goals::{GoalState, GoalStore};

/// Fire-and-forget persistence for one store's state blob
///
/// Saves are spawned and never awaited by the mutating caller; failures are
/// logged and never retried. A crash between a mutation and its flush loses
/// that update (at-most-once).
#[derive(Clone)]
pub struct Persister {
    store: Arc<dyn StateStore>,
    key: String,
}

impl Persister {
    pub fn new(store: Arc<dyn StateStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Load and decode the persisted state, if any
    ///
    /// Undecodable blobs are discarded with a warning; there is no schema
    /// migration.
    pub async fn load<T: DeserializeOwned>(&self) -> Option<T> {
        match self.store.load(&self.key).await {
            Ok(Some(blob)) => match serde_json::from_str(&blob) {
                Ok(state) => Some(state),
                Err(e) => {
                    warn!(key = %self.key, "Discarding undecodable state blob: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key = %self.key, "Failed to load persisted state: {}", e);
                None
            }
        }
    }

    /// Queue a best-effort save of the given state
    pub fn flush<T: Serialize>(&self, state: &T) {
        let blob = match serde_json::to_string(state) {
            Ok(blob) => blob,
            Err(e) => {
                error!(key = %self.key, "Failed to serialize state: {}", e);
                return;
            }
        };

        let store = Arc::clone(&self.store);
        let key = self.key.clone();
        tokio::spawn(async move {
            if let Err(e) = store.save(&key, blob).await {
                warn!(key = %key, "Failed to persist state: {}", e);
            }
        });
    }
}
