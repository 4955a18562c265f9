//! A bill's legislative journey: its recorded actions, summary counts and
//! the milestones worth highlighting on a timeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::normalize::{parse_feed_date, MalformedRecord};
use crate::raw::RawAction;

/// A recorded action on a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BillAction {
    pub date: NaiveDate,
    pub text: String,
    /// congress.gov action type, e.g. `Floor`, `Committee`, `IntroReferral`
    pub action_type: String,
    pub action_code: String,
    pub source_system: String,
    pub action_time: String,
    /// First committee named on the action, or empty
    pub committee: String,
}

impl BillAction {
    /// Flatten a raw action.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedRecord`] if the date or text is missing, or the
    /// date does not parse.
    pub fn from_raw(raw: RawAction) -> Result<Self, MalformedRecord> {
        let date = raw
            .action_date
            .ok_or(MalformedRecord::MissingField("actionDate"))?;
        let text = raw.text.ok_or(MalformedRecord::MissingField("text"))?;

        Ok(Self {
            date: parse_feed_date("actionDate", &date)?,
            text,
            action_type: raw.action_type.unwrap_or_else(|| "Unknown".to_string()),
            action_code: raw.action_code.unwrap_or_default(),
            source_system: raw
                .source_system
                .and_then(|s| s.name)
                .unwrap_or_default(),
            action_time: raw.action_time.unwrap_or_default(),
            committee: raw
                .committees
                .into_iter()
                .next()
                .and_then(|c| c.name)
                .unwrap_or_default(),
        })
    }

    fn mentions(&self, needle: &str) -> bool {
        self.text.to_lowercase().contains(needle)
    }

    fn mentions_any(&self, needles: &[&str]) -> bool {
        let text = self.text.to_lowercase();
        needles.iter().any(|needle| text.contains(needle))
    }
}

/// Flatten a feed of raw actions, newest first. Unusable entries are logged
/// and skipped.
#[must_use]
pub fn normalize_actions<I>(records: I) -> Vec<BillAction>
where
    I: IntoIterator<Item = serde_json::Value>,
{
    let mut actions: Vec<BillAction> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let outcome = serde_json::from_value::<RawAction>(record)
                .map_err(|e| MalformedRecord::Shape(e.to_string()))
                .and_then(BillAction::from_raw);
            match outcome {
                Ok(action) => Some(action),
                Err(error) => {
                    tracing::warn!(index, %error, "dropping bill action");
                    None
                }
            }
        })
        .collect();

    actions.sort_by(|a, b| b.date.cmp(&a.date));
    actions
}

/// Headline numbers for a bill's activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ActionSummary {
    pub total: usize,
    pub floor: usize,
    pub committee: usize,
    /// Days between the earliest recorded action and `today`
    pub days_since_introduction: Option<i64>,
}

#[must_use]
pub fn summarize(actions: &[BillAction], today: NaiveDate) -> ActionSummary {
    ActionSummary {
        total: actions.len(),
        floor: actions.iter().filter(|a| a.action_type == "Floor").count(),
        committee: actions
            .iter()
            .filter(|a| a.action_type == "Committee")
            .count(),
        days_since_introduction: actions
            .iter()
            .map(|a| a.date)
            .min()
            .map(|first| (today - first).num_days()),
    }
}

/// Kind of event highlighted on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum MilestoneEvent {
    #[serde(rename = "Introduction")]
    Introduction,
    #[serde(rename = "Committee Referral")]
    CommitteeReferral,
    #[serde(rename = "Floor Vote")]
    FloorVote,
    #[serde(rename = "Senate Action")]
    SenateAction,
}

impl MilestoneEvent {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Introduction => "Introduction",
            Self::CommitteeReferral => "Committee Referral",
            Self::FloorVote => "Floor Vote",
            Self::SenateAction => "Senate Action",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Milestone {
    pub date: NaiveDate,
    pub event: MilestoneEvent,
    pub description: String,
}

impl Milestone {
    fn from_action(event: MilestoneEvent, action: &BillAction) -> Self {
        Self {
            date: action.date,
            event,
            description: action.text.clone(),
        }
    }
}

/// Pick out the key milestones among a bill's actions, oldest first.
///
/// Introduction and committee referral use the earliest matching action;
/// every floor vote and every Senate passage or receipt is listed.
#[must_use]
pub fn milestones(actions: &[BillAction]) -> Vec<Milestone> {
    let earliest = |needle: &str| {
        actions
            .iter()
            .filter(|a| a.mentions(needle))
            .min_by_key(|a| a.date)
    };

    let mut found = Vec::new();

    if let Some(action) = earliest("introduced") {
        found.push(Milestone::from_action(MilestoneEvent::Introduction, action));
    }
    if let Some(action) = earliest("referred to") {
        found.push(Milestone::from_action(
            MilestoneEvent::CommitteeReferral,
            action,
        ));
    }

    found.extend(
        actions
            .iter()
            .filter(|a| a.action_type == "Floor" && a.mentions_any(&["vote", "passed", "failed"]))
            .map(|a| Milestone::from_action(MilestoneEvent::FloorVote, a)),
    );
    found.extend(
        actions
            .iter()
            .filter(|a| a.mentions("senate") && a.mentions_any(&["passed", "received"]))
            .map(|a| Milestone::from_action(MilestoneEvent::SenateAction, a)),
    );

    found.sort_by_key(|m| m.date);
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn action(date: &str, action_type: &str, text: &str) -> BillAction {
        BillAction {
            date: parse_feed_date("actionDate", date).unwrap(),
            text: text.into(),
            action_type: action_type.into(),
            action_code: String::new(),
            source_system: String::new(),
            action_time: String::new(),
            committee: String::new(),
        }
    }

    fn journey() -> Vec<BillAction> {
        vec![
            action("2025-05-01", "Floor", "Received in the Senate."),
            action(
                "2025-04-30",
                "Floor",
                "On passage Passed by the Yeas and Nays: 310 - 115.",
            ),
            action("2025-04-02", "Committee", "Ordered to be Reported."),
            action(
                "2025-03-27",
                "IntroReferral",
                "Referred to the House Committee on Ways and Means.",
            ),
            action("2025-03-27", "IntroReferral", "Introduced in House"),
        ]
    }

    #[test]
    fn flattens_raw_action_with_defaults() {
        let raw: RawAction = serde_json::from_value(json!({
            "actionDate": "2025-03-27",
            "text": "Introduced in House"
        }))
        .unwrap();

        let action = BillAction::from_raw(raw).unwrap();
        assert_eq!(action.action_type, "Unknown");
        assert_eq!(action.committee, "");
        assert_eq!(action.source_system, "");
    }

    #[test]
    fn normalize_actions_sorts_newest_first_and_skips_bad_entries() {
        let actions = normalize_actions(vec![
            json!({"actionDate": "2025-03-27", "text": "Introduced in House", "type": "IntroReferral"}),
            json!({"actionDate": "not a date", "text": "???"}),
            json!({"actionDate": "2025-04-30", "text": "Passed House", "type": "Floor"}),
        ]);

        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].text, "Passed House");
        assert_eq!(actions[1].text, "Introduced in House");
    }

    #[test]
    fn summary_counts_by_type() {
        let today = NaiveDate::from_ymd_opt(2025, 4, 6).unwrap();
        let summary = summarize(&journey(), today);

        assert_eq!(summary.total, 5);
        assert_eq!(summary.floor, 2);
        assert_eq!(summary.committee, 1);
        assert_eq!(summary.days_since_introduction, Some(10));
    }

    #[test]
    fn summary_of_no_actions_has_no_age() {
        let today = NaiveDate::from_ymd_opt(2025, 4, 6).unwrap();
        let summary = summarize(&[], today);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.days_since_introduction, None);
    }

    #[test]
    fn milestones_are_chronological() {
        let found = milestones(&journey());
        let events: Vec<_> = found.iter().map(|m| m.event).collect();

        assert_eq!(
            events,
            vec![
                MilestoneEvent::Introduction,
                MilestoneEvent::CommitteeReferral,
                MilestoneEvent::FloorVote,
                MilestoneEvent::SenateAction,
            ]
        );
        assert_eq!(found[0].description, "Introduced in House");
    }

    #[test]
    fn introduction_uses_earliest_match() {
        let actions = vec![
            action("2025-06-01", "Floor", "Motion to reconsider the introduced text"),
            action("2025-01-15", "IntroReferral", "Introduced in Senate"),
        ];
        let found = milestones(&actions);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].description, "Introduced in Senate");
    }

    #[test]
    fn no_matching_actions_means_no_milestones() {
        let actions = vec![action("2025-06-01", "Committee", "Hearings held.")];
        assert!(milestones(&actions).is_empty());
    }
}
