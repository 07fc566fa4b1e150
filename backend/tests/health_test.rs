//! Health endpoint integration tests

mod common;

use axum::http::StatusCode;
use common::{json, TestApp};

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();
    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_readiness_and_liveness() {
    let app = TestApp::new();

    let (status, body) = app.get("/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["ready"], true);

    let (status, body) = app.get("/health/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["alive"], true);
}
