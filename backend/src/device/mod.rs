//! Health-device data source abstraction
//!
//! The native health bridges of the mobile clients are reachable through a
//! companion HTTP bridge; this module defines the async interface the
//! import service consumes. Every error from a data source is treated by
//! the caller as "no data available for this call", never as a fatal
//! failure.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod bridge;

pub use bridge::HttpBridge;

/// Data kinds a device can provide
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    Steps,
    Workouts,
}

/// A workout as reported by the device bridge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceWorkout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub workout_type: String,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<i32>,
}

/// Async interface to a health-data source
#[async_trait]
pub trait DeviceDataSource: Send + Sync {
    /// Whether the source is reachable at all
    async fn is_available(&self) -> bool;

    /// Request read authorization for the given data kinds
    async fn request_authorization(&self, kinds: &[DataKind]) -> Result<()>;

    /// Total step count over the given window
    async fn step_count(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<u64>;

    /// Workouts recorded in the given window
    async fn workouts(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DeviceWorkout>>;
}

/// Data source used when no bridge is configured; always unavailable
pub struct DisabledBridge;

#[async_trait]
impl DeviceDataSource for DisabledBridge {
    async fn is_available(&self) -> bool {
        false
    }

    async fn request_authorization(&self, _kinds: &[DataKind]) -> Result<()> {
        anyhow::bail!("Device bridge is disabled")
    }

    async fn step_count(&self, _start: DateTime<Utc>, _end: DateTime<Utc>) -> Result<u64> {
        anyhow::bail!("Device bridge is disabled")
    }

    async fn workouts(
        &self,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<DeviceWorkout>> {
        anyhow::bail!("Device bridge is disabled")
    }
}
