//! Client-side filtering of normalized bills.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::normalize::{Chamber, NormalizedBill};
use crate::stage::LegislativeStage;

/// Chamber criterion of a [`FilterSpec`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ChamberFilter {
    #[default]
    All,
    House,
    Senate,
}

impl ChamberFilter {
    /// The chamber a bill must originate in, if restricted.
    #[must_use]
    pub const fn chamber(self) -> Option<Chamber> {
        match self {
            Self::All => None,
            Self::House => Some(Chamber::House),
            Self::Senate => Some(Chamber::Senate),
        }
    }
}

impl From<Chamber> for ChamberFilter {
    fn from(chamber: Chamber) -> Self {
        match chamber {
            Chamber::House => Self::House,
            Chamber::Senate => Self::Senate,
        }
    }
}

impl fmt::Display for ChamberFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.chamber() {
            Some(chamber) => chamber.fmt(f),
            None => f.write_str("All"),
        }
    }
}

impl FromStr for ChamberFilter {
    type Err = crate::normalize::UnknownChamber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<Chamber>().map(Self::from)
    }
}

/// Criteria selected by a user for one filtering pass. Every criterion is
/// optional and active criteria are AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Inclusive lower bound on `action_date`.
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound on `action_date`.
    pub end: Option<NaiveDate>,
    pub chamber: ChamberFilter,
    /// Requested stages in the order they were chosen; empty means no
    /// stage criterion. Repeats are ignored.
    pub stages: Vec<LegislativeStage>,
    /// Minimum cosponsor count; 0 means no cosponsor criterion.
    pub min_cosponsors: u32,
}

impl FilterSpec {
    /// Lower-cased substrings for the requested stages.
    fn stage_patterns(&self) -> Vec<String> {
        self.stages
            .iter()
            .filter_map(|stage| stage.filter_pattern())
            .map(str::to_lowercase)
            .collect()
    }

    /// Whether any criterion would exclude a bill.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.start.is_some()
            || self.end.is_some()
            || self.chamber != ChamberFilter::All
            || !self.stage_patterns().is_empty()
            || self.min_cosponsors > 0
    }

    /// Human-readable description of every active criterion, in display order.
    #[must_use]
    pub fn active_filters(&self) -> Vec<String> {
        let mut active = Vec::new();

        match (self.start, self.end) {
            (Some(start), Some(end)) => active.push(format!(
                "Action Date: {} to {}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            )),
            (Some(start), None) => {
                active.push(format!("Action Date From: {}", start.format("%Y-%m-%d")));
            }
            (None, Some(end)) => {
                active.push(format!("Action Date To: {}", end.format("%Y-%m-%d")));
            }
            (None, None) => {}
        }

        if let Some(chamber) = self.chamber.chamber() {
            active.push(format!("Chamber: {chamber}"));
        }

        if !self.stages.is_empty() {
            let mut labels: Vec<&str> = Vec::with_capacity(self.stages.len());
            for stage in &self.stages {
                if !labels.contains(&stage.label()) {
                    labels.push(stage.label());
                }
            }
            active.push(format!("Legislative Stage: {}", labels.join(", ")));
        }

        if self.min_cosponsors > 0 {
            active.push(format!("Min Cosponsors: {}", self.min_cosponsors));
        }

        active
    }
}

/// Return the bills matching every active criterion of `spec`, in input order.
#[must_use]
pub fn filter(bills: &[NormalizedBill], spec: &FilterSpec) -> Vec<NormalizedBill> {
    let patterns = spec.stage_patterns();
    let wanted_chamber = spec.chamber.chamber();

    bills
        .iter()
        .filter(|bill| spec.start.is_none_or(|start| bill.action_date >= start))
        .filter(|bill| spec.end.is_none_or(|end| bill.action_date <= end))
        .filter(|bill| wanted_chamber.is_none_or(|chamber| bill.origin_chamber == chamber))
        .filter(|bill| {
            if patterns.is_empty() {
                return true;
            }
            let text = bill.latest_action_text.to_lowercase();
            patterns.iter().any(|pattern| text.contains(pattern.as_str()))
        })
        .filter(|bill| spec.min_cosponsors == 0 || bill.cosponsor_count >= spec.min_cosponsors)
        .cloned()
        .collect()
}
