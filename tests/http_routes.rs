//! HTTP route tests against an in-memory waitlist.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use deadw3_landing::AppState;
use deadw3_landing::api::dialogs::CountResponse;
use deadw3_landing::config::AppConfig;
use deadw3_landing::server::build_router;
use deadw3_landing::waitlist::storage::MemoryStorage;
use deadw3_landing::waitlist::store::WAITLIST_KEY;
use serde_json::{Value, json};

const PAST_SUBMIT_DELAY: Duration = Duration::from_millis(1001);

fn test_config() -> AppConfig {
    AppConfig::load_from_args(["deadw3-landing"]).unwrap()
}

fn server_with(config: AppConfig, storage: MemoryStorage) -> TestServer {
    let state = AppState::new(Arc::new(config), Arc::new(storage));
    TestServer::new(build_router(state)).unwrap()
}

fn server() -> TestServer {
    server_with(test_config(), MemoryStorage::new())
}

fn dialog_id(snapshot: &Value) -> String {
    snapshot["id"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn test_landing_page() {
    let server = server();

    let response = server.get("/").await;
    response.assert_status_ok();
    let html = response.text();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("id=\"waitlist-dialog\""));
    assert!(html.contains("hx-post=\"/waitlist/dialogs\""));
    assert!(!html.contains("analytics-id"));
}

#[tokio::test]
async fn test_landing_page_analytics_meta() {
    let mut config = test_config();
    config.integrations.analytics_enabled = true;
    config.integrations.analytics_tracking_id = Some("G-ROUTE".into());
    let server = server_with(config, MemoryStorage::new());

    let html = server.get("/").await.text();
    assert!(html.contains("name=\"analytics-id\""));
    assert!(html.contains("G-ROUTE"));
}

#[tokio::test]
async fn test_healthz() {
    let response = server().get("/healthz").await;
    response.assert_status_ok();
    response.assert_text("ok");
}

#[tokio::test(start_paused = true)]
async fn test_json_dialog_flow() {
    let server = server();

    let response = server.post("/api/dialogs").await;
    response.assert_status(StatusCode::CREATED);
    let opened: Value = response.json();
    assert_eq!(opened["state"], "idle");
    assert_eq!(opened["open"], true);
    let id = dialog_id(&opened);

    let submitted: Value = server
        .post(&format!("/api/dialogs/{id}/submit"))
        .json(&json!({ "email": "a@b.com" }))
        .await
        .json();
    assert_eq!(submitted["state"], "submitting");
    assert_eq!(submitted["input"], "a@b.com");

    tokio::time::sleep(PAST_SUBMIT_DELAY).await;

    let resolved: Value = server.get(&format!("/api/dialogs/{id}")).await.json();
    assert_eq!(resolved["state"], "accepted");

    let count: CountResponse = server.get("/api/waitlist/count").await.json();
    assert_eq!(count.count, 1);
}

#[tokio::test]
async fn test_json_validation_rejection() {
    let server = server();
    let id = dialog_id(&server.post("/api/dialogs").await.json());

    let response = server
        .post(&format!("/api/dialogs/{id}/submit"))
        .json(&json!({ "email": "not-an-email" }))
        .await;
    response.assert_status_ok();
    let rejected: Value = response.json();
    assert_eq!(rejected["state"], "rejected");
    assert_eq!(rejected["reason"], "malformed_email");
    assert_eq!(rejected["message"], "Please enter a valid email address");
}

#[tokio::test(start_paused = true)]
async fn test_json_duplicate() {
    let storage = MemoryStorage::with_slot(WAITLIST_KEY, r#"["a@b.com"]"#);
    let server = server_with(test_config(), storage);
    let id = dialog_id(&server.post("/api/dialogs").await.json());

    server
        .post(&format!("/api/dialogs/{id}/submit"))
        .json(&json!({ "email": "a@b.com" }))
        .await
        .assert_status_ok();
    tokio::time::sleep(PAST_SUBMIT_DELAY).await;

    let resolved: Value = server.get(&format!("/api/dialogs/{id}")).await.json();
    assert_eq!(resolved["state"], "duplicate");
    assert_eq!(resolved["message"], "This email is already on the waitlist");
}

#[tokio::test]
async fn test_unknown_dialog_is_not_found() {
    let server = server();
    let id = uuid::Uuid::new_v4();

    server
        .get(&format!("/api/dialogs/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .delete(&format!("/api/dialogs/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .post(&format!("/api/dialogs/{id}/submit"))
        .json(&json!({ "email": "a@b.com" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_submit_while_submitting_conflicts() {
    let server = server();
    let id = dialog_id(&server.post("/api/dialogs").await.json());
    let url = format!("/api/dialogs/{id}/submit");

    server
        .post(&url)
        .json(&json!({ "email": "a@b.com" }))
        .await
        .assert_status_ok();
    let response = server.post(&url).json(&json!({ "email": "c@d.com" })).await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"], "cannot submit while dialog is submitting");
}

#[tokio::test(start_paused = true)]
async fn test_json_close_cancels_submission() {
    let server = server();
    let id = dialog_id(&server.post("/api/dialogs").await.json());

    server
        .post(&format!("/api/dialogs/{id}/submit"))
        .json(&json!({ "email": "a@b.com" }))
        .await
        .assert_status_ok();
    tokio::time::sleep(Duration::from_millis(500)).await;
    server
        .delete(&format!("/api/dialogs/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    tokio::time::sleep(Duration::from_secs(5)).await;
    let count: CountResponse = server.get("/api/waitlist/count").await.json();
    assert_eq!(count.count, 0);
}

#[tokio::test(start_paused = true)]
async fn test_html_dialog_flow() {
    let server = server();

    let opened = server.post("/waitlist/dialogs").await;
    opened.assert_status_ok();
    let html = opened.text();
    assert!(html.contains("data-state=\"idle\""));
    assert!(html.contains("Join Waitlist"));

    let id = html
        .split("data-dialog-id=\"")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .unwrap()
        .to_owned();

    let submitting = server
        .post(&format!("/waitlist/dialogs/{id}/submit"))
        .form(&[("email", "a@b.com")])
        .await
        .text();
    assert!(submitting.contains("data-state=\"submitting\""));
    assert!(submitting.contains("dialog-poll"));

    tokio::time::sleep(PAST_SUBMIT_DELAY).await;
    let accepted = server.get(&format!("/waitlist/dialogs/{id}")).await.text();
    assert!(accepted.contains("Welcome to the Archive"));

    // Closed (manually or by the display timer): fragments come back empty.
    let closed = server.delete(&format!("/waitlist/dialogs/{id}")).await;
    closed.assert_status_ok();
    assert!(closed.text().is_empty());

    let gone = server.get(&format!("/waitlist/dialogs/{id}")).await;
    gone.assert_status_ok();
    assert!(gone.text().is_empty());
}

#[tokio::test]
async fn test_html_submit_without_field_is_missing_input() {
    let server = server();
    let html = server.post("/waitlist/dialogs").await.text();
    let id = html
        .split("data-dialog-id=\"")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .unwrap()
        .to_owned();

    let rejected = server
        .post(&format!("/waitlist/dialogs/{id}/submit"))
        .form(&[("other", "x")])
        .await
        .text();
    assert!(rejected.contains("data-state=\"rejected\""));
    assert!(rejected.contains("Email is required"));
}

#[tokio::test]
async fn test_edit_clears_rejection() {
    let server = server();
    let id = dialog_id(&server.post("/api/dialogs").await.json());

    server
        .post(&format!("/api/dialogs/{id}/submit"))
        .json(&json!({ "email": "" }))
        .await
        .assert_status_ok();

    let fragment = server
        .patch(&format!("/waitlist/dialogs/{id}/input"))
        .form(&[("email", "a@")])
        .await;
    fragment.assert_status_ok();
    let html = fragment.text();
    assert!(html.contains("id=\"email-error\""));
    assert!(!html.contains("Email is required"));

    let edited: Value = server.get(&format!("/api/dialogs/{id}")).await.json();
    assert_eq!(edited["state"], "idle");
    assert_eq!(edited["input"], "a@");
    assert_eq!(edited["message"], Value::Null);
}

#[tokio::test]
async fn test_open_at_capacity_is_unavailable() {
    let mut config = test_config();
    config.dialog.max_open = 1;
    let server = server_with(config, MemoryStorage::new());

    server
        .post("/api/dialogs")
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/api/dialogs")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    server
        .post("/waitlist/dialogs")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_html_close_of_unknown_dialog_is_empty() {
    let server = server();
    let response = server
        .delete(&format!("/waitlist/dialogs/{}", uuid::Uuid::new_v4()))
        .await;
    response.assert_status_ok();
    assert!(response.text().is_empty());
}
