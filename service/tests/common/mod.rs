//! Common test utilities for integration tests.
//!
//! - [`app_builder::TestAppBuilder`] - Build the Axum app with mock clients
//! - [`http_mock::MockHttpServer`] - Stub congress.gov and LLM endpoints
//! - [`fixtures`] - congress.gov JSON records
//! - [`send`] - Drive a request through a router and decode the JSON reply

#![allow(dead_code)]

pub mod app_builder;
pub mod fixtures;
pub mod http_mock;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

/// Send `request` to `app` and parse the JSON response body.
///
/// An empty body parses as `Value::Null`.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response should be valid JSON")
    };
    (status, json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}
