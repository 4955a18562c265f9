//! congress.gov API client module.
//!
//! Fetches bill listings, bill detail records and bill actions from the
//! congress.gov v3 API.
//!
//! # Architecture
//!
//! - [`CongressApiClient`] - Trait defining API operations
//! - [`HttpCongressClient`] - Real HTTP implementation using reqwest
//! - [`mock::MockCongressClient`] - Mock for unit tests (behind `test-utils` feature)
//!
//! # Testing Patterns
//!
//! Handlers take an `Arc<dyn CongressApiClient>`, so REST tests inject
//! `MockCongressClient`:
//!
//! ```ignore
//! use congress_pulse_api::congress::mock::MockCongressClient;
//!
//! let mock = MockCongressClient::new();
//! mock.set_list_bills_result(Ok(vec![json!({ "type": "HR", ... })]));
//! ```
//!
//! `HttpCongressClient` itself is tested against `MockHttpServer`:
//!
//! ```ignore
//! let server = MockHttpServer::start().await;
//!
//! server
//!     .expect_get("/bill/119/hr/2316")
//!     .with_header("X-API-Key", "test-key")
//!     .respond_with_json(json!({ "bill": { ... } }))
//!     .mount()
//!     .await;
//!
//! let client = HttpCongressClient::new(server.url(), "test-key");
//! let bill = client.get_bill(&id).await.unwrap();
//! ```

mod client;
mod types;

pub use client::{CongressApiClient, CongressApiError, HttpCongressClient};
pub use types::{ActionsResponse, BillResponse, BillsResponse};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;
