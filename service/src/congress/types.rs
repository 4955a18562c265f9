//! Envelopes of the congress.gov v3 responses.
//!
//! Listing and action entries stay as raw JSON so one malformed entry can be
//! reported and skipped instead of failing the whole page.

use cp_bills::RawBillDetail;
use serde::Deserialize;
use serde_json::Value;

/// Response from the bill listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BillsResponse {
    #[serde(default)]
    pub bills: Vec<Value>,
}

/// Response from the bill detail endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BillResponse {
    pub bill: RawBillDetail,
}

/// Response from the bill actions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionsResponse {
    #[serde(default)]
    pub actions: Vec<Value>,
}
