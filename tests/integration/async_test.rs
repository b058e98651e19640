//! Integration tests for the background task endpoints.

mod helpers;

use std::time::Duration;

use http::StatusCode;
use serde_json::{Value, json};

use archive_core::config::{AppConfig, PoolConfig};

/// Poll `/api/async/stats` until `done` holds or the deadline passes.
async fn wait_for_stats(app: &helpers::TestApp, done: impl Fn(&Value) -> bool) -> Value {
    for _ in 0..200 {
        let stats = app.request("GET", "/api/async/stats", None, None).await;
        if done(&stats.body) {
            return stats.body;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("background tasks did not finish in time");
}

#[tokio::test]
async fn test_send_email_records_result() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "GET",
            "/api/async/send-email?recipient=ada%40example.com&subject=Welcome",
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["recipient"], "ada@example.com");

    let stats = wait_for_stats(&app, |s| s["totalTasks"] == 1).await;
    assert_eq!(
        stats["taskResults"]["email_1"],
        "Email sent to ada@example.com with subject: Welcome"
    );
}

#[tokio::test]
async fn test_process_document_fills_cache() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/async/process-document",
            Some(json!({ "documentId": 42 })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(response.body["operation"], "index");
    assert_eq!(response.body["documentId"], "42");

    wait_for_stats(&app, |s| s["cacheSize"] == 1).await;

    let cached = app.request("GET", "/api/async/cache/42", None, None).await;
    assert_eq!(cached.status, StatusCode::OK);
    assert_eq!(cached.body["result"], "Document 42 processed with operation: index");

    let cleared = app.request("POST", "/api/async/clear-cache", None, None).await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert_eq!(cleared.body["success"], true);

    let cached = app.request("GET", "/api/async/cache/42", None, None).await;
    assert_eq!(cached.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_batch_process() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/async/batch-process",
            Some(json!({ "documentIds": [] })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "No document IDs provided");

    let response = app
        .request(
            "POST",
            "/api/async/batch-process",
            Some(json!({ "documentIds": ["a", 2, "c"] })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(response.body["documentCount"], 3);

    let stats = wait_for_stats(&app, |s| s["cacheSize"] == 3).await;
    assert_eq!(stats["taskResults"]["doc_2"], "Document 2 processed with operation: batch");
}

#[tokio::test]
async fn test_notify_and_executor_demo() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/async/notify",
            Some(json!({ "userId": 7, "message": "Your upload was approved" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["userId"], "7");

    let stats = wait_for_stats(&app, |s| {
        s["notifications"].as_array().is_some_and(|n| !n.is_empty())
    })
    .await;
    let entry = stats["notifications"][0].as_str().unwrap();
    assert!(entry.starts_with("User: 7, Message: Your upload was approved, Time: "));

    let demo = app.request("GET", "/api/async/executor-demo", None, None).await;
    assert_eq!(demo.status, StatusCode::OK);
    assert_eq!(demo.body["fixedPoolTasks"], 5);
    assert_eq!(demo.body["cachedPoolTasks"], 3);
}

#[tokio::test]
async fn test_disabled_worker_rejects_submissions() {
    let mut config = AppConfig::default();
    config.worker.enabled = false;
    let app = helpers::TestApp::with_config(config).await;

    let response = app
        .request(
            "POST",
            "/api/async/process-document",
            Some(json!({ "documentId": "1" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_oversized_batch_is_refused_whole() {
    let mut config = AppConfig::default();
    config.worker.document_delay_ms = 0;
    config.worker.document = PoolConfig::new(1, 1);
    let app = helpers::TestApp::with_config(config).await;

    let response = app
        .request(
            "POST",
            "/api/async/batch-process",
            Some(json!({ "documentIds": [1, 2, 3, 4, 5] })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);

    let stats = app.request("GET", "/api/async/stats", None, None).await;
    assert_eq!(stats.body["cacheSize"], 0);
    assert_eq!(stats.body["totalTasks"], 0);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = helpers::TestApp::new().await;

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");

    let detailed = app.request("GET", "/api/health/detailed", None, None).await;
    assert_eq!(detailed.body["status"], "ok");
    assert_eq!(detailed.body["database"], "connected");
}
