//! REST API handlers and `OpenAPI` documentation.
//!
//! Every handler reads the shared [`AppState`] from an `Extension` and
//! reports failures as RFC 7807 [`ProblemDetails`].

// The OpenApi derive macro generates code that triggers this lint
#![allow(clippy::needless_for_each)]

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use cp_bills::journey::{self, ActionSummary, BillAction, Milestone};
use cp_bills::{
    filter, normalize_feed, sort_recent_first, BillId, BillIdError, BillOverview, ChamberFilter,
    FilterSpec, LegislativeStage, NormalizedBill, UnknownStage,
};
use cp_llm::CompletionClient;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::analysis::analyze_bill;
use crate::build_info::BuildInfo;
use crate::config::{CongressConfig, LlmConfig};
use crate::congress::{CongressApiClient, CongressApiError};
use crate::representatives::{
    lookup_representatives, HouseRepresentative, LookupError, Representatives, Senator,
};

const PROBLEM_TYPE_BASE: &str = "https://congress-pulse.dev/errors";

/// Shared handler dependencies.
pub struct AppState {
    pub congress: Arc<dyn CongressApiClient>,
    /// `None` when no LLM key is configured
    pub llm: Option<Arc<dyn CompletionClient>>,
    pub congress_config: CongressConfig,
    pub llm_config: LlmConfig,
}

impl AppState {
    fn llm(&self) -> Result<&dyn CompletionClient, ProblemDetails> {
        self.llm.as_deref().ok_or_else(|| {
            ProblemDetails::service_unavailable("AI features require an LLM API key")
        })
    }
}

/// Serialize a `StatusCode` as its `u16` representation.
#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires `&T` signature
fn serialize_status_code<S: Serializer>(status: &StatusCode, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u16(status.as_u16())
}

/// RFC 7807 Problem Details error response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    /// URI reference identifying the problem type
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short human-readable summary
    pub title: String,
    /// HTTP status code
    #[serde(serialize_with = "serialize_status_code")]
    #[schema(value_type = u16)]
    pub status: StatusCode,
    /// Human-readable explanation specific to this occurrence
    pub detail: String,
    /// URI reference identifying the specific occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ProblemExtensions>,
}

/// Machine-readable error code and offending field.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemExtensions {
    pub code: String,
    /// Field that caused the error (for validation errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ProblemDetails {
    fn new(
        status: StatusCode,
        slug: &str,
        title: &str,
        code: &str,
        field: Option<&str>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            problem_type: format!("{PROBLEM_TYPE_BASE}/{slug}"),
            title: title.to_string(),
            status,
            detail: detail.into(),
            instance: None,
            extensions: Some(ProblemExtensions {
                code: code.to_string(),
                field: field.map(str::to_string),
            }),
        }
    }

    /// A request parameter failed validation.
    #[must_use]
    pub fn validation(field: &str, detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "validation",
            "Bad Request",
            "VALIDATION_ERROR",
            Some(field),
            detail,
        )
    }

    #[must_use]
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "not-found",
            "Not Found",
            "NOT_FOUND",
            None,
            detail,
        )
    }

    /// congress.gov or the LLM provider failed or answered nonsense.
    #[must_use]
    pub fn upstream(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_GATEWAY,
            "upstream",
            "Bad Gateway",
            "UPSTREAM_ERROR",
            None,
            detail,
        )
    }

    #[must_use]
    pub fn service_unavailable(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "unavailable",
            "Service Unavailable",
            "SERVICE_UNAVAILABLE",
            None,
            detail,
        )
    }

    /// Create an internal server error response.
    #[must_use]
    pub fn internal_error(detail: &str) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal",
            "Internal Server Error",
            "INTERNAL_ERROR",
            None,
            detail,
        )
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<CongressApiError> for ProblemDetails {
    fn from(err: CongressApiError) -> Self {
        match err {
            CongressApiError::NotFound(subject) => {
                Self::not_found(format!("{subject} was not found on congress.gov"))
            }
            other => {
                tracing::error!(error = %other, "congress.gov request failed");
                Self::upstream(other.to_string())
            }
        }
    }
}

impl From<LookupError> for ProblemDetails {
    fn from(err: LookupError) -> Self {
        if matches!(err, LookupError::BlankAddress) {
            return Self::validation("address", err.to_string());
        }
        tracing::error!(error = %err, "representative lookup failed");
        Self::upstream(err.to_string())
    }
}

/// Query parameters of `GET /bills`.
///
/// Values arrive as text so that bad input is reported as problem details
/// naming the offending parameter.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BillListQuery {
    /// Earliest latest-action date, `YYYY-MM-DD`
    pub from: Option<String>,
    /// Latest latest-action date, `YYYY-MM-DD`
    pub to: Option<String>,
    /// `all`, `house` or `senate`
    pub chamber: Option<String>,
    /// Comma-separated stage labels, e.g. `Passed House,Became Law`
    pub stages: Option<String>,
    pub min_cosponsors: Option<String>,
    /// Congress to list; defaults to the configured one
    pub congress: Option<String>,
}

fn blank_to_none(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, ProblemDetails> {
    blank_to_none(value)
        .map(|v| {
            NaiveDate::parse_from_str(v, "%Y-%m-%d").map_err(|_| {
                ProblemDetails::validation(field, format!("{field} must be YYYY-MM-DD, got {v:?}"))
            })
        })
        .transpose()
}

fn parse_number(field: &str, value: Option<&str>) -> Result<Option<u32>, ProblemDetails> {
    blank_to_none(value)
        .map(|v| {
            v.parse::<u32>().map_err(|_| {
                ProblemDetails::validation(
                    field,
                    format!("{field} must be a non-negative integer, got {v:?}"),
                )
            })
        })
        .transpose()
}

impl BillListQuery {
    /// Convert the query into filter criteria.
    ///
    /// # Errors
    ///
    /// Returns a validation problem naming the first unparseable parameter.
    pub fn filter_spec(&self) -> Result<FilterSpec, ProblemDetails> {
        let chamber = blank_to_none(self.chamber.as_deref())
            .map(str::parse::<ChamberFilter>)
            .transpose()
            .map_err(|e| ProblemDetails::validation("chamber", e.to_string()))?
            .unwrap_or_default();

        let stages = blank_to_none(self.stages.as_deref())
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|label| !label.is_empty())
                    .map(str::parse::<LegislativeStage>)
                    .collect::<Result<Vec<_>, UnknownStage>>()
            })
            .transpose()
            .map_err(|e| ProblemDetails::validation("stages", e.to_string()))?
            .unwrap_or_default();

        Ok(FilterSpec {
            start: parse_date("from", self.from.as_deref())?,
            end: parse_date("to", self.to.as_deref())?,
            chamber,
            stages,
            min_cosponsors: parse_number("min_cosponsors", self.min_cosponsors.as_deref())?
                .unwrap_or(0),
        })
    }

    fn congress(&self) -> Result<Option<u32>, ProblemDetails> {
        parse_number("congress", self.congress.as_deref())
    }
}

/// Filtered listing of recently updated bills.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BillList {
    /// Matching bills, most recently updated first
    pub bills: Vec<NormalizedBill>,
    pub count: usize,
    /// Listing entries dropped as malformed
    pub skipped: usize,
    /// Descriptions of the criteria that were applied
    pub active_filters: Vec<String>,
}

/// A bill's action history with its summary and milestones.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Journey {
    pub summary: ActionSummary,
    /// Key events, oldest first
    pub milestones: Vec<Milestone>,
    /// All actions, newest first
    pub actions: Vec<BillAction>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BillAnalysis {
    pub bill: BillOverview,
    /// Model-written analysis, passed through unmodified
    pub analysis: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RepresentativeLookup {
    pub address: String,
}

fn bill_id(congress: &str, bill_type: &str, number: &str) -> Result<BillId, ProblemDetails> {
    let congress: u32 = congress.parse().map_err(|_| {
        ProblemDetails::validation("congress", format!("invalid congress: {congress}"))
    })?;
    let bill_type = bill_type
        .parse()
        .map_err(|e: BillIdError| ProblemDetails::validation("bill_type", e.to_string()))?;
    let number: u32 = number.parse().map_err(|_| {
        ProblemDetails::validation("number", format!("invalid bill number: {number}"))
    })?;
    Ok(BillId::new(congress, bill_type, number))
}

async fn fetch_overview(state: &AppState, id: &BillId) -> Result<BillOverview, ProblemDetails> {
    let raw = state.congress.get_bill(id).await?;
    BillOverview::from_raw(raw).map_err(|e| {
        tracing::error!(bill = %id, error = %e, "malformed bill detail");
        ProblemDetails::upstream(format!("congress.gov returned a malformed record for {id}: {e}"))
    })
}

/// `OpenAPI` documentation for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Congress Pulse API",
        version = "1.0.0",
        description = "Recent congressional bills, their journeys and AI-assisted analysis",
        license(name = "MIT")
    ),
    servers(
        (url = "/api/v1", description = "REST API v1")
    ),
    paths(
        list_bills,
        get_bill,
        get_bill_actions,
        analyze,
        find_representatives,
        get_build_info
    ),
    components(schemas(
        BuildInfo,
        ProblemDetails,
        ProblemExtensions,
        BillList,
        Journey,
        BillAnalysis,
        RepresentativeLookup,
        Representatives,
        HouseRepresentative,
        Senator
    ))
)]
pub struct ApiDoc;

/// Routes nested under `/api/v1`.
pub fn router() -> Router {
    Router::new()
        .route("/bills", get(list_bills))
        .route("/bills/{congress}/{bill_type}/{number}", get(get_bill))
        .route(
            "/bills/{congress}/{bill_type}/{number}/actions",
            get(get_bill_actions),
        )
        .route(
            "/bills/{congress}/{bill_type}/{number}/analysis",
            post(analyze),
        )
        .route("/representatives", post(find_representatives))
        .route("/build-info", get(get_build_info))
}

/// List recent bills
///
/// Fetches the most recently updated bills from congress.gov, normalizes
/// them and applies the requested filters.
///
/// # Errors
///
/// Returns `ProblemDetails` on invalid parameters or upstream failure.
#[utoipa::path(
    get,
    path = "/bills",
    tag = "Bills",
    params(BillListQuery),
    responses(
        (status = 200, description = "Filtered bills", body = BillList),
        (status = 400, description = "Invalid filter parameter", body = ProblemDetails),
        (status = 502, description = "congress.gov request failed", body = ProblemDetails)
    )
)]
pub async fn list_bills(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<BillListQuery>,
) -> Result<Json<BillList>, ProblemDetails> {
    let spec = query.filter_spec()?;
    let congress = query.congress()?.unwrap_or(state.congress_config.congress);

    let records = state
        .congress
        .list_bills(congress, state.congress_config.page_size, spec.start)
        .await?;

    let mut report = normalize_feed(records);
    sort_recent_first(&mut report.bills);
    let bills = filter(&report.bills, &spec);

    tracing::info!(
        congress,
        filtered = spec.is_active(),
        fetched = report.bills.len(),
        skipped = report.failures.len(),
        matched = bills.len(),
        "listed bills"
    );

    Ok(Json(BillList {
        count: bills.len(),
        bills,
        skipped: report.failures.len(),
        active_filters: spec.active_filters(),
    }))
}

/// Get a bill
///
/// # Errors
///
/// Returns `ProblemDetails` for an unknown bill or upstream failure.
#[utoipa::path(
    get,
    path = "/bills/{congress}/{bill_type}/{number}",
    tag = "Bills",
    params(
        ("congress" = u32, Path, description = "Congress number, e.g. 119"),
        ("bill_type" = String, Path, description = "hr, s, hjres, sjres, hconres, sconres, hres or sres"),
        ("number" = u32, Path, description = "Bill number")
    ),
    responses(
        (status = 200, description = "Bill metadata", body = BillOverview),
        (status = 400, description = "Invalid bill identifier", body = ProblemDetails),
        (status = 404, description = "Bill not found", body = ProblemDetails),
        (status = 502, description = "congress.gov request failed", body = ProblemDetails)
    )
)]
pub async fn get_bill(
    Extension(state): Extension<Arc<AppState>>,
    Path((congress, bill_type, number)): Path<(String, String, String)>,
) -> Result<Json<BillOverview>, ProblemDetails> {
    let id = bill_id(&congress, &bill_type, &number)?;
    Ok(Json(fetch_overview(&state, &id).await?))
}

/// Get a bill's legislative journey
///
/// # Errors
///
/// Returns `ProblemDetails` for an unknown bill or upstream failure.
#[utoipa::path(
    get,
    path = "/bills/{congress}/{bill_type}/{number}/actions",
    tag = "Bills",
    params(
        ("congress" = u32, Path, description = "Congress number, e.g. 119"),
        ("bill_type" = String, Path, description = "hr, s, hjres, sjres, hconres, sconres, hres or sres"),
        ("number" = u32, Path, description = "Bill number")
    ),
    responses(
        (status = 200, description = "Actions, summary and milestones", body = Journey),
        (status = 400, description = "Invalid bill identifier", body = ProblemDetails),
        (status = 404, description = "Bill not found", body = ProblemDetails),
        (status = 502, description = "congress.gov request failed", body = ProblemDetails)
    )
)]
pub async fn get_bill_actions(
    Extension(state): Extension<Arc<AppState>>,
    Path((congress, bill_type, number)): Path<(String, String, String)>,
) -> Result<Json<Journey>, ProblemDetails> {
    let id = bill_id(&congress, &bill_type, &number)?;
    let records = state
        .congress
        .list_actions(&id, state.congress_config.actions_limit)
        .await?;

    let actions = journey::normalize_actions(records);
    Ok(Json(Journey {
        summary: journey::summarize(&actions, Utc::now().date_naive()),
        milestones: journey::milestones(&actions),
        actions,
    }))
}

/// Analyze a bill
///
/// Asks the configured chat model for a summary, pros, cons and an overall
/// assessment of the bill.
///
/// # Errors
///
/// Returns `ProblemDetails` when no LLM is configured or a call fails.
#[utoipa::path(
    post,
    path = "/bills/{congress}/{bill_type}/{number}/analysis",
    tag = "Analysis",
    params(
        ("congress" = u32, Path, description = "Congress number, e.g. 119"),
        ("bill_type" = String, Path, description = "hr, s, hjres, sjres, hconres, sconres, hres or sres"),
        ("number" = u32, Path, description = "Bill number")
    ),
    responses(
        (status = 200, description = "Bill and its analysis", body = BillAnalysis),
        (status = 400, description = "Invalid bill identifier", body = ProblemDetails),
        (status = 404, description = "Bill not found", body = ProblemDetails),
        (status = 502, description = "Upstream request failed", body = ProblemDetails),
        (status = 503, description = "No LLM API key configured", body = ProblemDetails)
    )
)]
pub async fn analyze(
    Extension(state): Extension<Arc<AppState>>,
    Path((congress, bill_type, number)): Path<(String, String, String)>,
) -> Result<Json<BillAnalysis>, ProblemDetails> {
    let id = bill_id(&congress, &bill_type, &number)?;
    let llm = state.llm()?;
    let bill = fetch_overview(&state, &id).await?;

    let analysis = analyze_bill(llm, &state.llm_config, &bill)
        .await
        .map_err(|e| {
            tracing::error!(bill = %id, error = %e, "bill analysis failed");
            ProblemDetails::upstream(format!("analysis failed: {e}"))
        })?;

    Ok(Json(BillAnalysis { bill, analysis }))
}

/// Find representatives for an address
///
/// # Errors
///
/// Returns `ProblemDetails` for a blank address, a missing LLM key or a
/// failed lookup.
#[utoipa::path(
    post,
    path = "/representatives",
    tag = "Representatives",
    request_body = RepresentativeLookup,
    responses(
        (status = 200, description = "House representative and senators", body = Representatives),
        (status = 400, description = "Blank address", body = ProblemDetails),
        (status = 502, description = "Lookup failed", body = ProblemDetails),
        (status = 503, description = "No LLM API key configured", body = ProblemDetails)
    )
)]
pub async fn find_representatives(
    Extension(state): Extension<Arc<AppState>>,
    Json(lookup): Json<RepresentativeLookup>,
) -> Result<Json<Representatives>, ProblemDetails> {
    let llm = state.llm()?;
    let found = lookup_representatives(llm, &state.llm_config, &lookup.address).await?;
    Ok(Json(found))
}

/// Get build information
///
/// Returns metadata about the running service including version, git SHA, and build time.
///
/// # Errors
///
/// Returns `ProblemDetails` on internal server errors.
#[utoipa::path(
    get,
    path = "/build-info",
    tag = "System",
    responses(
        (status = 200, description = "Build information retrieved successfully", body = BuildInfo),
        (status = 500, description = "Internal server error", body = ProblemDetails)
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn get_build_info(
    Extension(build_info): Extension<BuildInfo>,
) -> Result<Json<BuildInfo>, ProblemDetails> {
    Ok(Json(build_info))
}
