//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! All stores live in one process; evaluation passes read cloned
//! moment-in-time snapshots rather than reaching into other stores.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::device::DeviceDataSource;
use crate::storage::StateStore;
use crate::store::{ActivityStore, GamificationStore, GoalStore, Persister};

/// Shared application state
///
/// All fields are `Arc`-wrapped; cloning is O(1).
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Goal registry
    pub goals: Arc<GoalStore>,
    /// Activity log store
    pub activity: Arc<ActivityStore>,
    /// Gamification store (achievements, challenges, streak, points)
    pub gamification: Arc<GamificationStore>,
    /// Health-device data source
    pub device: Arc<dyn DeviceDataSource>,
}

impl AppState {
    /// Create application state over the given persistence backend and
    /// device data source
    pub fn new(
        config: AppConfig,
        storage: Arc<dyn StateStore>,
        device: Arc<dyn DeviceDataSource>,
    ) -> Self {
        let prefix = config.storage.key_prefix.clone();
        let key = |suffix: &str| format!("{prefix}:{suffix}");

        Self {
            config: Arc::new(config),
            goals: Arc::new(GoalStore::new(Persister::new(
                Arc::clone(&storage),
                key("goals"),
            ))),
            activity: Arc::new(ActivityStore::new(Persister::new(
                Arc::clone(&storage),
                key("activity"),
            ))),
            gamification: Arc::new(GamificationStore::new(Persister::new(
                storage,
                key("gamification"),
            ))),
            device,
        }
    }

    /// Rehydrate every store from persisted state
    pub async fn rehydrate(&self) {
        self.goals.rehydrate().await;
        self.activity.rehydrate().await;
        self.gamification.rehydrate().await;
    }
}
