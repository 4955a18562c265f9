//! Flattening of raw congress.gov bill records into [`NormalizedBill`]s.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::raw::RawBill;
use crate::stage::LegislativeStage;

/// Policy area reported for bills that have not been assigned one yet.
pub const POLICY_AREA_NOT_ASSIGNED: &str = "Not Assigned";

/// Chamber in which a bill originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Chamber {
    House,
    Senate,
}

impl Chamber {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::House => "House",
            Self::Senate => "Senate",
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a chamber name is neither House nor Senate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown chamber: {0}")]
pub struct UnknownChamber(pub String);

impl FromStr for Chamber {
    type Err = UnknownChamber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "house" => Ok(Self::House),
            "senate" => Ok(Self::Senate),
            _ => Err(UnknownChamber(s.to_string())),
        }
    }
}

/// A bill flattened into uniform field names with typed dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NormalizedBill {
    /// `"{type} {number}"`, e.g. `"HR 2316"`
    pub bill_number: String,
    pub title: String,
    pub origin_chamber: Chamber,
    pub latest_action_text: String,
    pub action_date: NaiveDate,
    pub update_date: NaiveDate,
    pub congress: u32,
    pub url: String,
    pub policy_area: String,
    pub cosponsor_count: u32,
    pub legislative_stage: LegislativeStage,
}

/// A raw record that could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedRecord {
    /// A required field is absent (or null).
    #[error("malformed record: missing required field `{0}`")]
    MissingField(&'static str),

    /// A date field could not be parsed as a calendar date.
    #[error("malformed record: field `{field}` has unparseable date `{value}`")]
    InvalidDate { field: &'static str, value: String },

    /// The origin chamber is neither House nor Senate.
    #[error("malformed record: unknown origin chamber `{0}`")]
    UnknownChamber(String),

    /// The record does not have the shape of a bill at all.
    #[error("malformed record: {0}")]
    Shape(String),
}

/// Normalize a single raw bill.
///
/// # Errors
///
/// Returns [`MalformedRecord`] if a required field is missing, a date does
/// not parse, or the origin chamber is unknown.
pub fn normalize(raw: RawBill) -> Result<NormalizedBill, MalformedRecord> {
    let bill_type = raw.bill_type.ok_or(MalformedRecord::MissingField("type"))?;
    let number = raw.number.ok_or(MalformedRecord::MissingField("number"))?;
    let title = raw.title.ok_or(MalformedRecord::MissingField("title"))?;
    let origin_chamber = raw
        .origin_chamber
        .ok_or(MalformedRecord::MissingField("originChamber"))?;
    let latest_action = raw
        .latest_action
        .ok_or(MalformedRecord::MissingField("latestAction.text"))?;
    let latest_action_text = latest_action
        .text
        .ok_or(MalformedRecord::MissingField("latestAction.text"))?;
    let action_date = latest_action
        .action_date
        .ok_or(MalformedRecord::MissingField("latestAction.actionDate"))?;
    let update_date = raw
        .update_date
        .ok_or(MalformedRecord::MissingField("updateDate"))?;
    let congress = raw.congress.ok_or(MalformedRecord::MissingField("congress"))?;
    let url = raw.url.ok_or(MalformedRecord::MissingField("url"))?;

    let origin_chamber = origin_chamber
        .parse::<Chamber>()
        .map_err(|e| MalformedRecord::UnknownChamber(e.0))?;
    let action_date = parse_feed_date("latestAction.actionDate", &action_date)?;
    let update_date = parse_feed_date("updateDate", &update_date)?;

    let policy_area = raw
        .policy_area
        .and_then(|area| area.name)
        .unwrap_or_else(|| POLICY_AREA_NOT_ASSIGNED.to_string());
    let cosponsor_count = raw.cosponsors.and_then(|c| c.count).unwrap_or(0);
    let legislative_stage = LegislativeStage::classify(&latest_action_text);

    Ok(NormalizedBill {
        bill_number: format!("{bill_type} {number}"),
        title,
        origin_chamber,
        latest_action_text,
        action_date,
        update_date,
        congress,
        url,
        policy_area,
        cosponsor_count,
        legislative_stage,
    })
}

/// Parse a congress.gov date or date-time string into a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 date-times (the date in the given offset)
/// and naive `YYYY-MM-DDTHH:MM:SS` timestamps.
///
/// # Errors
///
/// Returns [`MalformedRecord::InvalidDate`] naming `field` when no form matches.
pub fn parse_feed_date(field: &'static str, value: &str) -> Result<NaiveDate, MalformedRecord> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .map_err(|_| MalformedRecord::InvalidDate {
            field,
            value: value.to_string(),
        })
}

/// Outcome of normalizing a whole feed: the records that survived and the
/// ones that did not, by their position in the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedReport {
    pub bills: Vec<NormalizedBill>,
    pub failures: Vec<(usize, MalformedRecord)>,
}

/// Normalize every record of a feed independently.
///
/// A bad record never discards the rest of the feed; it is logged and
/// reported in [`FeedReport::failures`]. Input order is preserved.
#[must_use]
pub fn normalize_feed<I>(records: I) -> FeedReport
where
    I: IntoIterator<Item = serde_json::Value>,
{
    let mut report = FeedReport::default();

    for (index, record) in records.into_iter().enumerate() {
        let outcome = serde_json::from_value::<RawBill>(record)
            .map_err(|e| MalformedRecord::Shape(e.to_string()))
            .and_then(normalize);

        match outcome {
            Ok(bill) => report.bills.push(bill),
            Err(error) => {
                tracing::warn!(index, %error, "dropping bill record");
                report.failures.push((index, error));
            }
        }
    }

    tracing::debug!(
        normalized = report.bills.len(),
        dropped = report.failures.len(),
        "normalized bill feed"
    );
    report
}

/// Order bills most recently updated first. Ties keep their feed order.
pub fn sort_recent_first(bills: &mut [NormalizedBill]) {
    bills.sort_by(|a, b| b.update_date.cmp(&a.update_date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{RawCount, RawLatestAction, RawNamed};
    use serde_json::json;

    fn raw_bill() -> RawBill {
        RawBill {
            bill_type: Some("HR".into()),
            number: Some(2316),
            title: Some("Example Relief Act".into()),
            origin_chamber: Some("House".into()),
            latest_action: Some(RawLatestAction {
                text: Some("Referred to the Committee on Ways and Means".into()),
                action_date: Some("2025-03-27".into()),
            }),
            update_date: Some("2025-04-02T06:08:24Z".into()),
            congress: Some(119),
            url: Some("https://api.congress.gov/v3/bill/119/hr/2316".into()),
            policy_area: None,
            cosponsors: None,
        }
    }

    #[test]
    fn normalizes_well_formed_record() {
        let bill = normalize(raw_bill()).unwrap();

        assert_eq!(bill.bill_number, "HR 2316");
        assert_eq!(bill.origin_chamber, Chamber::House);
        assert_eq!(bill.action_date, NaiveDate::from_ymd_opt(2025, 3, 27).unwrap());
        assert_eq!(bill.update_date, NaiveDate::from_ymd_opt(2025, 4, 2).unwrap());
        assert_eq!(bill.congress, 119);
        assert_eq!(bill.policy_area, POLICY_AREA_NOT_ASSIGNED);
        assert_eq!(bill.cosponsor_count, 0);
        assert_eq!(bill.legislative_stage, LegislativeStage::ReferredToCommittee);
    }

    #[test]
    fn keeps_policy_area_and_cosponsors_when_present() {
        let mut raw = raw_bill();
        raw.policy_area = Some(RawNamed {
            name: Some("Taxation".into()),
        });
        raw.cosponsors = Some(RawCount { count: Some(14) });

        let bill = normalize(raw).unwrap();
        assert_eq!(bill.policy_area, "Taxation");
        assert_eq!(bill.cosponsor_count, 14);
    }

    #[test]
    fn null_policy_area_name_is_not_assigned() {
        let mut raw = raw_bill();
        raw.policy_area = Some(RawNamed { name: None });
        assert_eq!(normalize(raw).unwrap().policy_area, POLICY_AREA_NOT_ASSIGNED);
    }

    #[test]
    fn reports_each_missing_required_field() {
        let cases: [(fn(&mut RawBill), &str); 9] = [
            (|r| r.bill_type = None, "type"),
            (|r| r.number = None, "number"),
            (|r| r.title = None, "title"),
            (|r| r.origin_chamber = None, "originChamber"),
            (
                |r| {
                    if let Some(action) = r.latest_action.as_mut() {
                        action.text = None;
                    }
                },
                "latestAction.text",
            ),
            (
                |r| {
                    if let Some(action) = r.latest_action.as_mut() {
                        action.action_date = None;
                    }
                },
                "latestAction.actionDate",
            ),
            (|r| r.update_date = None, "updateDate"),
            (|r| r.congress = None, "congress"),
            (|r| r.url = None, "url"),
        ];

        for (strip, field) in cases {
            let mut raw = raw_bill();
            strip(&mut raw);
            assert_eq!(
                normalize(raw),
                Err(MalformedRecord::MissingField(field)),
                "field {field}"
            );
        }
    }

    #[test]
    fn unparseable_date_is_malformed_not_zeroed() {
        let mut raw = raw_bill();
        raw.update_date = Some("last tuesday".into());
        assert_eq!(
            normalize(raw),
            Err(MalformedRecord::InvalidDate {
                field: "updateDate",
                value: "last tuesday".into()
            })
        );
    }

    #[test]
    fn impossible_calendar_date_is_malformed() {
        let mut raw = raw_bill();
        if let Some(action) = raw.latest_action.as_mut() {
            action.action_date = Some("2025-02-30".into());
        }
        assert!(matches!(
            normalize(raw),
            Err(MalformedRecord::InvalidDate { field: "latestAction.actionDate", .. })
        ));
    }

    #[test]
    fn unknown_chamber_is_malformed() {
        let mut raw = raw_bill();
        raw.origin_chamber = Some("Joint".into());
        assert_eq!(
            normalize(raw),
            Err(MalformedRecord::UnknownChamber("Joint".into()))
        );
    }

    #[test]
    fn feed_dates_accept_supported_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        for value in [
            "2024-01-10",
            "2024-01-10T12:30:00Z",
            "2024-01-10T23:30:00-05:00",
            "2024-01-10T08:00:00",
            " 2024-01-10 ",
        ] {
            assert_eq!(parse_feed_date("updateDate", value), Ok(expected), "{value}");
        }
    }

    #[test]
    fn feed_survives_bad_records() {
        let good = serde_json::to_value(raw_bill()).unwrap();
        let report = normalize_feed(vec![
            json!({"title": "no type"}),
            good.clone(),
            json!("not an object"),
            good,
        ]);

        assert_eq!(report.bills.len(), 2);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0], (0, MalformedRecord::MissingField("type")));
        assert_eq!(report.failures[1].0, 2);
        assert!(matches!(report.failures[1].1, MalformedRecord::Shape(_)));
    }

    #[test]
    fn sorts_by_update_date_descending_stably() {
        let mut older = normalize(raw_bill()).unwrap();
        older.update_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        older.bill_number = "HR 1".into();
        let mut newer = older.clone();
        newer.update_date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        newer.bill_number = "HR 2".into();
        let mut tie = older.clone();
        tie.bill_number = "HR 3".into();

        let mut bills = vec![older, newer, tie];
        sort_recent_first(&mut bills);

        let order: Vec<_> = bills.iter().map(|b| b.bill_number.as_str()).collect();
        assert_eq!(order, ["HR 2", "HR 1", "HR 3"]);
    }
}
