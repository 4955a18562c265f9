//! congress.gov client for bill data.
//!
//! ```ignore
//! use congress_pulse_api::congress::{CongressApiClient, HttpCongressClient};
//!
//! let client = HttpCongressClient::new("https://api.congress.gov/v3", "my-api-key");
//! let page = client.list_bills(119, 50, None).await?;
//! let report = cp_bills::normalize_feed(page);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use cp_bills::{BillId, RawBillDetail};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use super::types::{ActionsResponse, BillResponse, BillsResponse};

/// Errors that can occur when calling the congress.gov API.
#[derive(Debug, Error)]
pub enum CongressApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Bill not found
    #[error("Bill not found: {0}")]
    NotFound(String),

    /// API returned an error response
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
}

/// Trait for congress.gov operations.
///
/// Listing and action entries come back as raw JSON; normalizing them is
/// the caller's job.
#[async_trait]
pub trait CongressApiClient: Send + Sync {
    /// Most recently updated bills of `congress`, at most `limit` of them.
    ///
    /// `from` narrows the listing to bills updated on or after that day.
    async fn list_bills(
        &self,
        congress: u32,
        limit: u32,
        from: Option<NaiveDate>,
    ) -> Result<Vec<Value>, CongressApiError>;

    /// Detail record of a single bill.
    async fn get_bill(&self, id: &BillId) -> Result<RawBillDetail, CongressApiError>;

    /// Recorded actions on a bill, in API order.
    async fn list_actions(&self, id: &BillId, limit: u32)
        -> Result<Vec<Value>, CongressApiError>;
}

/// Per-request timeout used unless [`HttpCongressClient::with_timeout`] says otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP-based implementation of `CongressApiClient`.
pub struct HttpCongressClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl HttpCongressClient {
    /// Create a new client with the given base URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Create a client with a custom `reqwest::Client` (timeouts, proxies).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Bound every request to `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// GET `{base_url}/{path_and_query}` and decode the JSON body.
    ///
    /// A 404 becomes [`CongressApiError::NotFound`] carrying `subject`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
        subject: &str,
    ) -> Result<T, CongressApiError> {
        let url = format!("{}/{path_and_query}", self.base_url);
        tracing::debug!(%url, "congress.gov request");

        let response = self
            .client
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CongressApiError::NotFound(subject.to_string()));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CongressApiError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl CongressApiClient for HttpCongressClient {
    async fn list_bills(
        &self,
        congress: u32,
        limit: u32,
        from: Option<NaiveDate>,
    ) -> Result<Vec<Value>, CongressApiError> {
        let mut path = format!("bill/{congress}?limit={limit}&sort=updateDate+desc");
        if let Some(day) = from {
            path = format!("{path}&fromDateTime={}T00:00:00Z", day.format("%Y-%m-%d"));
        }

        let page: BillsResponse = self
            .get_json(&path, &format!("bills of Congress {congress}"))
            .await?;
        Ok(page.bills)
    }

    async fn get_bill(&self, id: &BillId) -> Result<RawBillDetail, CongressApiError> {
        let response: BillResponse = self.get_json(&id.api_path(), &id.to_string()).await?;
        Ok(response.bill)
    }

    async fn list_actions(
        &self,
        id: &BillId,
        limit: u32,
    ) -> Result<Vec<Value>, CongressApiError> {
        let path = format!("{}/actions?limit={limit}", id.api_path());
        let response: ActionsResponse = self.get_json(&path, &id.to_string()).await?;
        Ok(response.actions)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{BillId, CongressApiClient, CongressApiError, NaiveDate, RawBillDetail, Value};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Arguments of one `list_bills` call.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ListBillsCall {
        pub congress: u32,
        pub limit: u32,
        pub from: Option<NaiveDate>,
    }

    /// Mock implementation of `CongressApiClient` for unit tests.
    ///
    /// Configure responses with `set_*_result` methods; each result is
    /// returned once. Verify calls with the `*_calls()` accessors.
    pub struct MockCongressClient {
        list_bills_result: Mutex<Option<Result<Vec<Value>, CongressApiError>>>,
        get_bill_result: Mutex<Option<Result<RawBillDetail, CongressApiError>>>,
        list_actions_result: Mutex<Option<Result<Vec<Value>, CongressApiError>>>,
        list_bills_calls: Mutex<Vec<ListBillsCall>>,
        get_bill_calls: Mutex<Vec<BillId>>,
        list_actions_calls: Mutex<Vec<(BillId, u32)>>,
    }

    impl MockCongressClient {
        pub fn new() -> Self {
            Self {
                list_bills_result: Mutex::new(None),
                get_bill_result: Mutex::new(None),
                list_actions_result: Mutex::new(None),
                list_bills_calls: Mutex::new(Vec::new()),
                get_bill_calls: Mutex::new(Vec::new()),
                list_actions_calls: Mutex::new(Vec::new()),
            }
        }

        /// Set the result for the next `list_bills` call.
        pub fn set_list_bills_result(&self, result: Result<Vec<Value>, CongressApiError>) {
            *self.list_bills_result.lock().unwrap() = Some(result);
        }

        /// Set the result for the next `get_bill` call.
        pub fn set_get_bill_result(&self, result: Result<RawBillDetail, CongressApiError>) {
            *self.get_bill_result.lock().unwrap() = Some(result);
        }

        /// Set the result for the next `list_actions` call.
        pub fn set_list_actions_result(&self, result: Result<Vec<Value>, CongressApiError>) {
            *self.list_actions_result.lock().unwrap() = Some(result);
        }

        pub fn list_bills_calls(&self) -> Vec<ListBillsCall> {
            self.list_bills_calls.lock().unwrap().clone()
        }

        pub fn get_bill_calls(&self) -> Vec<BillId> {
            self.get_bill_calls.lock().unwrap().clone()
        }

        pub fn list_actions_calls(&self) -> Vec<(BillId, u32)> {
            self.list_actions_calls.lock().unwrap().clone()
        }
    }

    impl Default for MockCongressClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl CongressApiClient for MockCongressClient {
        async fn list_bills(
            &self,
            congress: u32,
            limit: u32,
            from: Option<NaiveDate>,
        ) -> Result<Vec<Value>, CongressApiError> {
            self.list_bills_calls.lock().unwrap().push(ListBillsCall {
                congress,
                limit,
                from,
            });

            self.list_bills_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn get_bill(&self, id: &BillId) -> Result<RawBillDetail, CongressApiError> {
            self.get_bill_calls.lock().unwrap().push(*id);

            self.get_bill_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(CongressApiError::NotFound(id.to_string())))
        }

        async fn list_actions(
            &self,
            id: &BillId,
            limit: u32,
        ) -> Result<Vec<Value>, CongressApiError> {
            self.list_actions_calls
                .lock()
                .unwrap()
                .push((*id, limit));

            self.list_actions_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }
}
