//! AI-assisted bill analysis.

use cp_bills::BillOverview;
use cp_llm::{ChatMessage, CompletionClient, CompletionRequest};

use crate::config::LlmConfig;

const ANALYST_ROLE: &str = "You are a policy analyst expert who provides balanced, \
objective analysis of legislation.";

/// User prompt asking for a summary, pros, cons and an overall assessment
/// of the bill described by `bill_context`.
#[must_use]
pub fn analysis_prompt(bill_context: &str) -> String {
    format!(
        "Please analyze the following congressional bill and provide:\n\
         1. A concise summary of what the bill does\n\
         2. Key pros (potential benefits)\n\
         3. Key cons (potential concerns or drawbacks)\n\
         4. Overall assessment\n\
         \n\
         Bill Information:\n\
         {bill_context}\n"
    )
}

/// Build the completion request for analyzing `bill`.
#[must_use]
pub fn analysis_request(config: &LlmConfig, bill: &BillOverview) -> CompletionRequest {
    CompletionRequest::new(
        config.model.clone(),
        vec![
            ChatMessage::system(ANALYST_ROLE),
            ChatMessage::user(analysis_prompt(&bill.analysis_context())),
        ],
    )
    .temperature(config.analysis_temperature)
    .max_tokens(config.analysis_max_tokens)
}

/// Ask the model for an analysis of `bill`. The reply text is returned as is.
///
/// # Errors
///
/// Returns an error if the completion call fails.
pub async fn analyze_bill(
    llm: &dyn CompletionClient,
    config: &LlmConfig,
    bill: &BillOverview,
) -> anyhow::Result<String> {
    let request = analysis_request(config, bill);
    tracing::info!(bill = %bill.bill_number, model = %request.model, "requesting bill analysis");
    llm.complete(&request).await
}
