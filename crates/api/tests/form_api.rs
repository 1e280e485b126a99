//! Integration tests for the form flow: render, validate, submit, results.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use advisor_core::payload::IndifferentPolicy;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use common::{body_text, get, post_form};
use serde_json::{json, Value};

type Captured = Arc<Mutex<Vec<Value>>>;

/// Backend that records every payload and answers `{"status":"received"}`.
async fn recording_backend() -> (String, Captured) {
    let captured: Captured = Arc::default();
    let router = Router::new()
        .route(
            "/evaluate",
            post(
                |State(seen): State<Captured>, Json(body): Json<Value>| async move {
                    seen.lock().unwrap().push(body);
                    Json(json!({"status": "received"}))
                },
            ),
        )
        .with_state(Arc::clone(&captured));
    (common::spawn_backend(router).await, captured)
}

// ---------------------------------------------------------------------------
// Test: GET / renders the fresh form
// ---------------------------------------------------------------------------

#[tokio::test]
async fn form_page_renders_defaults() {
    let app = common::build_test_app("http://127.0.0.1:9");
    let response = get(app, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Real Estate Advisor"));
    assert!(html.contains("action=\"/submit\""));
    assert!(html.contains("name=\"price_must_have\" checked"));
}

// ---------------------------------------------------------------------------
// Test: validation failures render inline and send nothing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn blank_url_is_reported_and_nothing_is_sent() {
    let (backend, captured) = recording_backend().await;
    let app = common::build_test_app(&backend);

    let response = post_form(app, "/submit", &[("url", ""), ("price_max", "-1")]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("URL is required"));
    assert!(html.contains("must be a number ≥ 0"));
    assert!(captured.lock().unwrap().is_empty());
}

#[tokio::test]
async fn inverted_surface_range_is_reported() {
    let (backend, captured) = recording_backend().await;
    let app = common::build_test_app(&backend);

    let response = post_form(
        app,
        "/submit",
        &[("url", "https://x.com/1"), ("sqm_min", "120"), ("sqm_max", "90")],
    )
    .await;

    let html = body_text(response).await;
    assert!(html.contains("sqm max must be greater than or equal to sqm min"));
    assert!(captured.lock().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: successful submission posts the normalized payload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn successful_submission_shows_results() {
    let (backend, captured) = recording_backend().await;
    let app = common::build_test_app(&backend);

    let response = post_form(
        app,
        "/submit",
        &[
            ("url", "https://x.com/listing"),
            ("sqm_min", "60"),
            ("garage", "yes"),
            ("garage_must_have", "on"),
            ("price_must_have", "on"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(">78%</text>"));
    assert!(html.contains("Sent to backend (received)."));
    assert!(html.contains("https://x.com/listing"));

    let payloads = captured.lock().unwrap();
    assert_eq!(payloads.len(), 1);
    let payload = &payloads[0];
    assert_eq!(payload["url"], "https://x.com/listing");
    assert_eq!(payload["price"], json!({"max": 450000.0, "must_have": true}));
    assert_eq!(
        payload["surface_sqm"],
        json!({"min": 60.0, "max": 100.0, "must_have": false})
    );
    assert_eq!(payload["bathrooms"], json!({"min": 2, "must_have": false}));
    assert_eq!(payload["floor"], json!({"min": 3, "must_have": false}));
    assert_eq!(payload["garage"], json!({"value": true, "must_have": true}));
    // Indifferent features are omitted by default.
    assert!(payload.get("elevator").is_none());
}

#[tokio::test]
async fn send_false_policy_sends_indifferent_features() {
    let (backend, captured) = recording_backend().await;
    let app = common::build_test_app_with_policy(&backend, IndifferentPolicy::SendFalse);

    post_form(
        app,
        "/submit",
        &[("url", "https://x.com/1"), ("elevator_must_have", "on")],
    )
    .await;

    let payloads = captured.lock().unwrap();
    assert_eq!(
        payloads[0]["elevator"],
        json!({"value": false, "must_have": false})
    );
}

#[tokio::test]
async fn submits_to_the_bundled_receiver() {
    let receiver = common::spawn_backend(common::build_test_app("http://127.0.0.1:9")).await;
    let app = common::build_test_app(&receiver);

    let response = post_form(app, "/submit", &[("url", "http://example.com/a")]).await;
    let html = body_text(response).await;
    assert!(html.contains("Sent to backend (received)."));
}

// ---------------------------------------------------------------------------
// Test: backend and network failures keep the form
// ---------------------------------------------------------------------------

#[tokio::test]
async fn backend_error_is_shown_on_the_form() {
    let router = Router::new().route(
        "/evaluate",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let backend = common::spawn_backend(router).await;
    let app = common::build_test_app(&backend);

    let response = post_form(app, "/submit", &[("url", "https://x.com/1"), ("floor_min", "5")]).await;

    let html = body_text(response).await;
    assert!(html.contains("<p class=\"status error\">Backend error: HTTP 500</p>"));
    // Entered values survive.
    assert!(html.contains("value=\"5\""));
    assert!(!html.contains("<svg"));
}

#[tokio::test]
async fn unreachable_backend_is_shown_on_the_form() {
    let backend = common::dead_backend().await;
    let app = common::build_test_app(&backend);

    let response = post_form(app, "/submit", &[("url", "https://x.com/1")]).await;

    let html = body_text(response).await;
    assert!(html.contains("Failed to reach backend"));
}

// ---------------------------------------------------------------------------
// Test: slow backends are bounded by the outbound timeout only
// ---------------------------------------------------------------------------

/// Backend that waits `delay` before acknowledging.
async fn slow_backend(delay: Duration) -> String {
    let router = Router::new().route(
        "/evaluate",
        post(move || async move {
            tokio::time::sleep(delay).await;
            Json(json!({"status": "received"}))
        }),
    );
    common::spawn_backend(router).await
}

#[tokio::test]
async fn inbound_timeout_does_not_cut_off_submission() {
    let backend = slow_backend(Duration::from_secs(2)).await;
    let mut config = common::test_config(&backend, IndifferentPolicy::Omit);
    config.request_timeout_secs = 1;
    let app = common::build_test_app_with_config(config);

    let response = post_form(app, "/submit", &[("url", "https://x.com/slow")]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Sent to backend (received)."));
}

#[tokio::test]
async fn backend_timeout_is_shown_on_the_form() {
    let backend = slow_backend(Duration::from_secs(3)).await;
    let mut config = common::test_config(&backend, IndifferentPolicy::Omit);
    config.backend_timeout_secs = Some(1);
    let app = common::build_test_app_with_config(config);

    let response = post_form(
        app,
        "/submit",
        &[("url", "https://x.com/slow"), ("bathrooms_min", "4")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<p class=\"status error\">Failed to reach backend: "));
    assert!(html.contains("value=\"4\""));
}
