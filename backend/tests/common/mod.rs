//! Common test utilities for integration tests
//!
//! This module provides shared setup for integration tests. Tests run
//! against in-memory storage and, unless a bridge is injected, a disabled
//! device data source, so no external services are needed.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use fittrack_backend::config::AppConfig;
use fittrack_backend::device::{DeviceDataSource, DisabledBridge, HttpBridge};
use fittrack_backend::routes;
use fittrack_backend::state::AppState;
use fittrack_backend::storage::MemoryStore;
use std::sync::Arc;
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application with in-memory storage and no bridge
    pub fn new() -> Self {
        Self::with_device(Arc::new(DisabledBridge))
    }

    /// Create a test application whose device bridge points at `url`
    /// (usually a wiremock server)
    pub fn with_bridge_url(url: &str) -> Self {
        Self::with_device(Arc::new(HttpBridge::new(url.to_string())))
    }

    /// Create a test application with an explicit device data source
    pub fn with_device(device: Arc<dyn DeviceDataSource>) -> Self {
        Self::build(AppConfig::default(), device)
    }

    /// Create a test application with a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        Self::build(config, Arc::new(DisabledBridge))
    }

    fn build(config: AppConfig, device: Arc<dyn DeviceDataSource>) -> Self {
        let state = AppState::new(config, Arc::new(MemoryStore::new()), device);
        let app = routes::create_router(state.clone());
        Self { app, state }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Make a PUT request with JSON body
    pub async fn put(&self, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("PUT")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("DELETE")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();
        (status, body_str)
    }
}

/// Parse a JSON response body
pub fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap_or_else(|e| panic!("invalid JSON ({e}): {body}"))
}
