//! Record shapes as served by the congress.gov v3 API.
//!
//! Every field is optional here so that a record missing a required field
//! can be reported precisely by the normalizer instead of failing the
//! whole response at deserialization time.

use serde::{de, Deserialize, Deserializer, Serialize};

/// A bill as it appears in the `GET /bill/{congress}` listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawBill {
    #[serde(rename = "type")]
    pub bill_type: Option<String>,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub number: Option<u32>,
    pub title: Option<String>,
    pub origin_chamber: Option<String>,
    pub latest_action: Option<RawLatestAction>,
    pub update_date: Option<String>,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub congress: Option<u32>,
    pub url: Option<String>,
    pub policy_area: Option<RawNamed>,
    pub cosponsors: Option<RawCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawLatestAction {
    pub text: Option<String>,
    pub action_date: Option<String>,
}

/// Any `{ "name": ... }` object (policy area, committee, source system).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawNamed {
    pub name: Option<String>,
}

/// Any `{ "count": ... }` summary object (cosponsors, actions, amendments).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCount {
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub count: Option<u32>,
}

/// A bill's sponsor entry from the bill detail endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSponsor {
    pub full_name: Option<String>,
    pub party: Option<String>,
    pub state: Option<String>,
}

/// The `bill` object from `GET /bill/{congress}/{type}/{number}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawBillDetail {
    #[serde(rename = "type")]
    pub bill_type: Option<String>,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub number: Option<u32>,
    pub title: Option<String>,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub congress: Option<u32>,
    pub introduced_date: Option<String>,
    pub policy_area: Option<RawNamed>,
    pub sponsors: Vec<RawSponsor>,
    pub cosponsors: Option<RawCount>,
    pub actions: Option<RawCount>,
    pub amendments: Option<RawCount>,
    pub latest_action: Option<RawLatestAction>,
    pub committee_reports: Option<Vec<serde_json::Value>>,
    pub related_bills: Option<RawCount>,
    pub constitutional_authority_statement_text: Option<String>,
}

/// One entry of `GET /bill/{congress}/{type}/{number}/actions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawAction {
    pub action_date: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub action_type: Option<String>,
    pub action_code: Option<String>,
    pub source_system: Option<RawNamed>,
    pub action_time: Option<String>,
    pub committees: Vec<RawNamed>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Text(String),
}

/// congress.gov serves bill numbers as strings and congress numbers as
/// integers; accept either form for both. Empty strings read as absent.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => u32::try_from(n).map(Some).map_err(de::Error::custom),
        Some(NumberOrText::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(s)) => s.trim().parse().map(Some).map_err(de::Error::custom),
    }
}
