#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use advisor_api::app::build_app;
use advisor_api::config::ServerConfig;
use advisor_api::state::AppState;
use advisor_core::payload::IndifferentPolicy;

pub use advisor_testkit::{dead_backend, spawn_backend};

pub const TEST_ORIGIN: &str = "http://localhost:3000";

/// Build a test `ServerConfig` pointing at `backend_url`.
///
/// No outbound timeout, so tests against dead backends fail on connect
/// rather than on a clock.
pub fn test_config(backend_url: &str, policy: IndifferentPolicy) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static(TEST_ORIGIN)],
        request_timeout_secs: 30,
        backend_url: backend_url.to_string(),
        backend_timeout_secs: None,
        indifferent_policy: policy,
    }
}

/// Full application router with every middleware layer, as `main.rs`
/// builds it.
pub fn build_test_app(backend_url: &str) -> Router {
    build_test_app_with_policy(backend_url, IndifferentPolicy::Omit)
}

pub fn build_test_app_with_policy(backend_url: &str, policy: IndifferentPolicy) -> Router {
    build_test_app_with_config(test_config(backend_url, policy))
}

pub fn build_test_app_with_config(config: ServerConfig) -> Router {
    let state = AppState::from_config(config).expect("http client");
    build_app(state)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST url-encoded `pairs` the way a browser submits the form.
pub async fn post_form(app: Router, uri: &str, pairs: &[(&str, &str)]) -> Response<Body> {
    let body = serde_urlencoded::to_string(pairs).unwrap();
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
