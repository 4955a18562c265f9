//! Flattened view of a single bill's detail record.

use serde::{Deserialize, Serialize};

use crate::normalize::MalformedRecord;
use crate::raw::{RawBillDetail, RawCount};

/// Policy area shown on the detail page when none has been assigned.
pub const POLICY_AREA_PENDING: &str = "Not yet assigned";

/// Latest recorded action, as shown beside a bill's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LatestAction {
    pub text: String,
    pub action_date: String,
}

/// Metadata of one bill, flattened from the bill detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BillOverview {
    pub title: String,
    pub bill_number: String,
    pub congress: u32,
    pub introduced_date: Option<String>,
    pub policy_area: String,
    /// Primary sponsor as `"Full Name (P-ST)"`
    pub sponsor: Option<String>,
    pub cosponsor_count: u32,
    pub action_count: u32,
    pub amendment_count: Option<u32>,
    pub latest_action: Option<LatestAction>,
    pub committee_report_count: Option<usize>,
    pub related_bill_count: Option<u32>,
    pub constitutional_authority: Option<String>,
}

fn count(summary: Option<&RawCount>) -> Option<u32> {
    summary.and_then(|c| c.count)
}

impl BillOverview {
    /// Flatten a raw bill detail record.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedRecord::MissingField`] if the title, type, number
    /// or congress is missing.
    pub fn from_raw(raw: RawBillDetail) -> Result<Self, MalformedRecord> {
        let title = raw.title.ok_or(MalformedRecord::MissingField("title"))?;
        let bill_type = raw.bill_type.ok_or(MalformedRecord::MissingField("type"))?;
        let number = raw.number.ok_or(MalformedRecord::MissingField("number"))?;
        let congress = raw.congress.ok_or(MalformedRecord::MissingField("congress"))?;

        let sponsor = raw.sponsors.first().and_then(|s| {
            let name = s.full_name.as_deref()?;
            Some(format!(
                "{name} ({}-{})",
                s.party.as_deref().unwrap_or_default(),
                s.state.as_deref().unwrap_or_default()
            ))
        });

        let latest_action = raw.latest_action.and_then(|action| {
            Some(LatestAction {
                text: action.text?,
                action_date: action.action_date.unwrap_or_default(),
            })
        });

        Ok(Self {
            title,
            bill_number: format!("{bill_type} {number}"),
            congress,
            introduced_date: raw.introduced_date,
            policy_area: raw
                .policy_area
                .and_then(|area| area.name)
                .unwrap_or_else(|| POLICY_AREA_PENDING.to_string()),
            sponsor,
            cosponsor_count: count(raw.cosponsors.as_ref()).unwrap_or(0),
            action_count: count(raw.actions.as_ref()).unwrap_or(0),
            amendment_count: count(raw.amendments.as_ref()),
            latest_action,
            committee_report_count: raw
                .committee_reports
                .as_ref()
                .filter(|reports| !reports.is_empty())
                .map(Vec::len),
            related_bill_count: count(raw.related_bills.as_ref()),
            constitutional_authority: raw
                .constitutional_authority_statement_text
                .filter(|text| !text.trim().is_empty()),
        })
    }

    /// Plain-text rendering of the bill's facts, used as context for analysis.
    #[must_use]
    pub fn analysis_context(&self) -> String {
        let mut lines = vec![
            format!("Bill: {}", self.title),
            format!("Bill Number: {}", self.bill_number),
            format!("Congress: {}", self.congress),
            format!(
                "Introduced Date: {}",
                self.introduced_date.as_deref().unwrap_or("Not available")
            ),
        ];

        if let Some(sponsor) = &self.sponsor {
            lines.push(format!("Sponsor: {sponsor}"));
        }
        lines.push(format!("Cosponsors: {}", self.cosponsor_count));
        if self.policy_area != POLICY_AREA_PENDING {
            lines.push(format!("Policy Area: {}", self.policy_area));
        }
        if let Some(action) = &self.latest_action {
            lines.push(format!(
                "Latest Action: {} (Date: {})",
                action.text, action.action_date
            ));
        }
        if let Some(authority) = &self.constitutional_authority {
            lines.push(String::new());
            lines.push("Constitutional Authority:".to_string());
            lines.push(authority.clone());
        }

        lines.extend([String::new(), String::new(), "Additional Information:".to_string()]);
        lines.push(format!("- Total Actions: {}", self.action_count));
        if let Some(amendments) = self.amendment_count {
            lines.push(format!("- Amendments: {amendments}"));
        }
        if let Some(reports) = self.committee_report_count {
            lines.push(format!("- Committee Reports: {reports}"));
        }
        if let Some(related) = self.related_bill_count {
            lines.push(format!("- Related Bills: {related}"));
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}
