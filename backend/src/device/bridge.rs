//! HTTP client for the companion health-data bridge
//!
//! The bridge is a small daemon running next to the native health stack
//! (HealthKit, Health Connect) exposing typed samples over localhost HTTP.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

use super::{DataKind, DeviceDataSource, DeviceWorkout};

/// HTTP-backed device data source
pub struct HttpBridge {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct StepCountBody {
    steps: u64,
}

impl HttpBridge {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait::async_trait]
impl DeviceDataSource for HttpBridge {
    async fn is_available(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn request_authorization(&self, kinds: &[DataKind]) -> Result<()> {
        let url = format!("{}/authorize", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "kinds": kinds }))
            .send()
            .await
            .context("authorization request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("authorization denied: {}", response.status());
        }
        Ok(())
    }

    async fn step_count(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<u64> {
        let url = format!("{}/steps", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("start", start.to_rfc3339()), ("end", end.to_rfc3339())])
            .send()
            .await
            .context("step fetch failed")?
            .error_for_status()
            .context("step fetch rejected")?;

        let body: StepCountBody = response.json().await.context("step payload undecodable")?;
        Ok(body.steps)
    }

    async fn workouts(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DeviceWorkout>> {
        let url = format!("{}/workouts", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("start", start.to_rfc3339()), ("end", end.to_rfc3339())])
            .send()
            .await
            .context("workout fetch failed")?
            .error_for_status()
            .context("workout fetch rejected")?;

        let workouts: Vec<DeviceWorkout> =
            response.json().await.context("workout payload undecodable")?;
        Ok(workouts)
    }
}
