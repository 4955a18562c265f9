//! Legislative stage classification.
//!
//! congress.gov only exposes the latest action as free text, so a bill's
//! stage is derived by matching well-known phrases in that text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Coarse progress of a bill, derived from its latest action text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum LegislativeStage {
    #[serde(rename = "Introduced")]
    Introduced,
    #[serde(rename = "Referred to Committee")]
    ReferredToCommittee,
    #[serde(rename = "Reported by Committee")]
    ReportedByCommittee,
    #[serde(rename = "Passed House")]
    PassedHouse,
    #[serde(rename = "Passed Senate")]
    PassedSenate,
    #[serde(rename = "To President")]
    ToPresident,
    #[serde(rename = "Became Law")]
    BecameLaw,
    #[serde(rename = "In Progress")]
    InProgress,
}

/// Classification rules, evaluated top to bottom against lower-cased text.
///
/// The order reflects wording precedence in the congress.gov feed rather
/// than the order in which a bill moves through Congress.
const CLASSIFICATION_RULES: &[(&[&str], LegislativeStage)] = &[
    (
        &["became public law", "became law"],
        LegislativeStage::BecameLaw,
    ),
    (&["presented to president"], LegislativeStage::ToPresident),
    (&["passed senate"], LegislativeStage::PassedSenate),
    (&["passed house"], LegislativeStage::PassedHouse),
    (&["reported"], LegislativeStage::ReportedByCommittee),
    (&["referred to"], LegislativeStage::ReferredToCommittee),
    (&["introduced"], LegislativeStage::Introduced),
];

impl LegislativeStage {
    /// Every stage a user can select as a filter, in display order.
    pub const FILTERABLE: [Self; 7] = [
        Self::Introduced,
        Self::ReferredToCommittee,
        Self::ReportedByCommittee,
        Self::PassedHouse,
        Self::PassedSenate,
        Self::ToPresident,
        Self::BecameLaw,
    ];

    /// Classify a latest-action text. The first matching rule wins.
    #[must_use]
    pub fn classify(action_text: &str) -> Self {
        let lowered = action_text.to_lowercase();
        CLASSIFICATION_RULES
            .iter()
            .find(|(phrases, _)| phrases.iter().any(|phrase| lowered.contains(phrase)))
            .map_or(Self::InProgress, |(_, stage)| *stage)
    }

    /// Human-readable label, as shown in the bill table and accepted by filters.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Introduced => "Introduced",
            Self::ReferredToCommittee => "Referred to Committee",
            Self::ReportedByCommittee => "Reported by Committee",
            Self::PassedHouse => "Passed House",
            Self::PassedSenate => "Passed Senate",
            Self::ToPresident => "To President",
            Self::BecameLaw => "Became Law",
            Self::InProgress => "In Progress",
        }
    }

    /// Substring searched for (case-insensitively) when this stage is used as a filter.
    ///
    /// `InProgress` is a fallback classification and has no pattern.
    #[must_use]
    pub const fn filter_pattern(self) -> Option<&'static str> {
        match self {
            Self::Introduced => Some("Introduced"),
            Self::ReferredToCommittee => Some("Referred to"),
            Self::ReportedByCommittee => Some("Reported"),
            Self::PassedHouse => Some("Passed House"),
            Self::PassedSenate => Some("Passed Senate"),
            Self::ToPresident => Some("Presented to President"),
            Self::BecameLaw => Some("Became Public Law"),
            Self::InProgress => None,
        }
    }
}

impl fmt::Display for LegislativeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Error returned when a stage label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown legislative stage: {0}")]
pub struct UnknownStage(pub String);

impl FromStr for LegislativeStage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::FILTERABLE
            .into_iter()
            .chain(std::iter::once(Self::InProgress))
            .find(|stage| stage.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownStage(s.to_string()))
    }
}
