//! Test app builder that goes through the production router assembly with
//! mock clients injected.
//!
//! # Usage
//!
//! ```ignore
//! use crate::common::app_builder::TestAppBuilder;
//!
//! #[tokio::test]
//! async fn test_with_full_app() {
//!     let congress = Arc::new(MockCongressClient::new());
//!     let app = TestAppBuilder::new()
//!         .with_congress(congress.clone())
//!         .with_cors(&["http://localhost:3000"])
//!         .build();
//!
//!     // Use app.oneshot(...) to send requests
//! }
//! ```

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use congress_pulse_api::{
    app::build_app,
    build_info::BuildInfoProvider,
    config::Config,
    congress::{mock::MockCongressClient, CongressApiClient},
    rest::AppState,
};
use cp_llm::{mock::MockCompletionClient, CompletionClient};

/// Builder for test applications.
///
/// Without `with_llm`, AI endpoints behave as if no API key were configured.
pub struct TestAppBuilder {
    congress: Arc<dyn CongressApiClient>,
    llm: Option<Arc<dyn CompletionClient>>,
    config: Config,
    build_info: Option<BuildInfoProvider>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppBuilder {
    /// Default configuration, an empty congress.gov mock and no LLM.
    #[must_use]
    pub fn new() -> Self {
        let mut config = Config::default();
        config.congress.api_key = "test-api-key".to_string();

        Self {
            congress: Arc::new(MockCongressClient::new()),
            llm: None,
            config,
            build_info: None,
        }
    }

    #[must_use]
    pub fn with_congress(mut self, congress: Arc<MockCongressClient>) -> Self {
        self.congress = congress;
        self
    }

    #[must_use]
    pub fn with_llm(mut self, llm: Arc<MockCompletionClient>) -> Self {
        let llm: Arc<dyn CompletionClient> = llm;
        self.llm = Some(llm);
        self
    }

    /// Configure CORS with specific allowed origins.
    ///
    /// Pass an empty slice to block all cross-origin requests.
    /// Pass `&["*"]` to allow any origin.
    #[must_use]
    pub fn with_cors(mut self, origins: &[&str]) -> Self {
        self.config.cors.allowed_origins = origins.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Include Swagger UI (/swagger-ui).
    #[must_use]
    pub fn with_swagger(mut self) -> Self {
        self.config.swagger.enabled = true;
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.config.congress.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_build_info(mut self, provider: BuildInfoProvider) -> Self {
        self.build_info = Some(provider);
        self
    }

    /// Build the Axum router exactly as main.rs does.
    #[must_use]
    pub fn build(self) -> Router {
        let build_info = self
            .build_info
            .unwrap_or_else(BuildInfoProvider::from_env)
            .build_info();

        let state = Arc::new(AppState {
            congress: self.congress,
            llm: self.llm,
            congress_config: self.config.congress.clone(),
            llm_config: self.config.llm.clone(),
        });

        build_app(state, build_info, &self.config)
    }
}
