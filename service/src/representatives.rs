//! Look up a constituent's members of Congress from a street address.
//!
//! congress.gov has no address lookup, so the chat model is asked for the
//! House representative and both senators as a JSON object.

use cp_llm::{ChatMessage, CompletionClient, CompletionRequest};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::config::LlmConfig;

const LOOKUP_ROLE: &str = "You are a helpful assistant that provides accurate information \
about U.S. congressional representatives and their contact information. Always return valid JSON.";

/// Placeholder for a phone number the model did not supply.
pub const NOT_AVAILABLE: &str = "N/A";

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// Missing or null phone numbers become [`NOT_AVAILABLE`].
fn phone<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(not_available))
}

/// Missing or null text becomes empty.
fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HouseRepresentative {
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub party: String,
    /// `"ST-N"`, e.g. `"OR-3"`
    #[serde(default, deserialize_with = "text")]
    pub district: String,
    #[serde(default = "not_available", deserialize_with = "phone")]
    pub dc_phone: String,
    #[serde(default = "not_available", deserialize_with = "phone")]
    pub local_phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Senator {
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub party: String,
    #[serde(default = "not_available", deserialize_with = "phone")]
    pub dc_phone: String,
    #[serde(default = "not_available", deserialize_with = "phone")]
    pub local_phone: String,
}

/// Members of Congress representing one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Representatives {
    #[serde(default)]
    pub house_representative: Option<HouseRepresentative>,
    #[serde(default)]
    pub senators: Vec<Senator>,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("address must not be blank")]
    BlankAddress,

    #[error("representative lookup failed: {0}")]
    Upstream(anyhow::Error),

    #[error("representative lookup returned invalid JSON: {0}")]
    InvalidReply(#[from] serde_json::Error),
}

#[must_use]
pub fn lookup_prompt(address: &str) -> String {
    format!(
        r#"Given the following address, please identify:
1. The U.S. House Representative for this district
2. Both U.S. Senators for this state

For each representative, provide:
- Full name
- Party affiliation
- District (for House member only)
- DC office phone number
- Local/district office phone number

Address: {address}

Return the information in JSON format with this structure:
{{
    "house_representative": {{
        "name": "Full Name",
        "party": "Party",
        "district": "State-District",
        "dc_phone": "(202) XXX-XXXX",
        "local_phone": "(XXX) XXX-XXXX"
    }},
    "senators": [
        {{
            "name": "Full Name",
            "party": "Party",
            "dc_phone": "(202) XXX-XXXX",
            "local_phone": "(XXX) XXX-XXXX"
        }}
    ]
}}
"#
    )
}

/// Ask the model for the members of Congress representing `address`.
///
/// # Errors
///
/// [`LookupError::BlankAddress`] for an empty address, [`LookupError::Upstream`]
/// if the completion fails and [`LookupError::InvalidReply`] if the reply
/// does not parse.
pub async fn lookup_representatives(
    llm: &dyn CompletionClient,
    config: &LlmConfig,
    address: &str,
) -> Result<Representatives, LookupError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(LookupError::BlankAddress);
    }

    let request = CompletionRequest::new(
        config.model.clone(),
        vec![
            ChatMessage::system(LOOKUP_ROLE),
            ChatMessage::user(lookup_prompt(address)),
        ],
    )
    .temperature(config.lookup_temperature)
    .json_object();

    let reply = llm
        .complete(&request)
        .await
        .map_err(LookupError::Upstream)?;
    let representatives: Representatives = serde_json::from_str(&reply)?;

    tracing::info!(
        has_house = representatives.house_representative.is_some(),
        senators = representatives.senators.len(),
        "representative lookup finished"
    );
    Ok(representatives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cp_llm::{mock::MockCompletionClient, ResponseFormat};
    use serde_json::json;

    #[tokio::test]
    async fn fills_missing_contact_details() {
        let llm = MockCompletionClient::new();
        llm.push_reply(Ok(json!({
            "house_representative": {"name": "Jane Doe", "party": "Democrat", "dc_phone": null},
            "senators": [
                {"name": "Sam Roe", "party": "Republican", "dc_phone": "(202) 224-0000"},
                {"name": "Alex Poe"}
            ]
        })
        .to_string()));

        let found = lookup_representatives(&llm, &LlmConfig::default(), " 1 Main St, Portland, OR ")
            .await
            .unwrap();

        let house = found.house_representative.unwrap();
        assert_eq!(house.district, "");
        assert_eq!(house.dc_phone, NOT_AVAILABLE);
        assert_eq!(house.local_phone, NOT_AVAILABLE);
        assert_eq!(found.senators[0].dc_phone, "(202) 224-0000");
        assert_eq!(found.senators[1].party, "");

        let request = &llm.requests()[0];
        assert_eq!(request.response_format, Some(ResponseFormat::JsonObject));
        assert!(request.messages[1]
            .content
            .contains("Address: 1 Main St, Portland, OR\n"));
    }

    #[tokio::test]
    async fn blank_address_is_rejected_without_calling_model() {
        let llm = MockCompletionClient::new();
        let result = lookup_representatives(&llm, &LlmConfig::default(), "   ").await;

        assert!(matches!(result, Err(LookupError::BlankAddress)));
        assert!(llm.requests().is_empty());
    }

    #[tokio::test]
    async fn non_json_reply_is_invalid() {
        let llm = MockCompletionClient::new();
        llm.push_reply(Ok("I'm not sure.".into()));

        let result = lookup_representatives(&llm, &LlmConfig::default(), "1 Main St").await;
        assert!(matches!(result, Err(LookupError::InvalidReply(_))));
    }

    #[test]
    fn empty_object_means_nobody_found() {
        let found: Representatives = serde_json::from_str("{}").unwrap();
        assert_eq!(found.house_representative, None);
        assert!(found.senators.is_empty());
    }
}
