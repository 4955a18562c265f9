//! HTTP mock server helpers for testing outbound HTTP calls.
//!
//! A thin builder over `wiremock` for declarative HTTP stubbing.
//!
//! # Quick Start
//!
//! ```ignore
//! use crate::common::http_mock::MockHttpServer;
//!
//! #[tokio::test]
//! async fn test_external_api_call() {
//!     let server = MockHttpServer::start().await;
//!
//!     server
//!         .expect_get("/bill/119")
//!         .with_header("X-API-Key", "test-key")
//!         .respond_with_json(json!({"bills": []}))
//!         .mount()
//!         .await;
//!
//!     // Point the client under test at server.url()
//! }
//! ```
//!
//! # Patterns
//!
//! - **Success response**: `.respond_with_json(value)`
//! - **Error response**: `.respond_with_status(500)`, optionally with `.with_json_response(value)`
//! - **Timeout simulation**: `.respond_with_delay(Duration::from_secs(5))`
//! - **Request verification**: `.expect_times(1)` then `server.verify().await`
//! - **Anything else**: mount a `wiremock::Mock` on `server.inner()`

#![allow(dead_code)]

use std::time::Duration;

use serde_json::Value;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A running stub server.
pub struct MockHttpServer {
    server: MockServer,
}

impl MockHttpServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the server, without a trailing slash.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// The underlying wiremock server, for custom matchers.
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Panic unless every stub with `expect_times` was hit as expected.
    pub async fn verify(&self) {
        self.server.verify().await;
    }

    /// Start stubbing a GET request to `path`.
    pub fn expect_get(&self, route: &str) -> StubBuilder<'_> {
        StubBuilder::new(self, "GET", route)
    }

    /// Start stubbing a POST request to `path`.
    pub fn expect_post(&self, route: &str) -> StubBuilder<'_> {
        StubBuilder::new(self, "POST", route)
    }
}

/// Declarative stub under construction.
pub struct StubBuilder<'a> {
    server: &'a MockHttpServer,
    method: &'static str,
    route: String,
    headers: Vec<(String, String)>,
    status: u16,
    body: Option<Value>,
    delay: Option<Duration>,
    times: Option<u64>,
}

impl<'a> StubBuilder<'a> {
    fn new(server: &'a MockHttpServer, method: &'static str, route: &str) -> Self {
        Self {
            server,
            method,
            route: route.to_string(),
            headers: Vec::new(),
            status: 200,
            body: None,
            delay: None,
            times: None,
        }
    }

    /// Only match requests carrying this header value.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Respond 200 with `body` as JSON.
    pub fn respond_with_json(mut self, body: Value) -> Self {
        self.status = 200;
        self.body = Some(body);
        self
    }

    pub fn respond_with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Attach a JSON body without changing the status.
    pub fn with_json_response(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn respond_with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn expect_times(mut self, times: u64) -> Self {
        self.times = Some(times);
        self
    }

    pub async fn mount(self) {
        let mut response = ResponseTemplate::new(self.status);
        if let Some(body) = self.body {
            response = response.set_body_json(body);
        }
        if let Some(delay) = self.delay {
            response = response.set_delay(delay);
        }

        let mut mock = Mock::given(method(self.method)).and(path(self.route.as_str()));
        for (name, value) in &self.headers {
            mock = mock.and(header(name.as_str(), value.as_str()));
        }

        let mut mock = mock.respond_with(response);
        if let Some(times) = self.times {
            mock = mock.expect(times);
        }

        mock.mount(self.server.inner()).await;
    }
}
