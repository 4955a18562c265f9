//! congress.gov records shaped like real API responses.

use serde_json::{json, Value};

/// An entry of the bill listing endpoint.
pub fn listed_bill(
    bill_type: &str,
    number: &str,
    chamber: &str,
    action_date: &str,
    action_text: &str,
    update_date: &str,
) -> Value {
    json!({
        "congress": 119,
        "type": bill_type,
        "number": number,
        "title": format!("{bill_type} {number} Act"),
        "originChamber": chamber,
        "originChamberCode": &chamber[..1],
        "latestAction": {"actionDate": action_date, "text": action_text},
        "updateDate": update_date,
        "updateDateIncludingText": update_date,
        "url": format!("https://api.congress.gov/v3/bill/119/{}/{number}?format=json", bill_type.to_lowercase()),
    })
}

/// A small listing: two House bills, one Senate bill and one malformed entry.
pub fn listing() -> Vec<Value> {
    let mut with_cosponsors = listed_bill(
        "S",
        "812",
        "Senate",
        "2025-03-03",
        "Passed Senate without amendment by Unanimous Consent.",
        "2025-03-05",
    );
    with_cosponsors["cosponsors"] = json!({"count": 7});
    with_cosponsors["policyArea"] = json!({"name": "Health"});

    vec![
        listed_bill(
            "HR",
            "2316",
            "House",
            "2025-03-27",
            "Referred to the House Committee on Ways and Means.",
            "2025-03-28T09:12:44Z",
        ),
        with_cosponsors,
        json!({"type": "HR", "number": "9", "title": "No action yet"}),
        listed_bill(
            "HR",
            "1",
            "House",
            "2025-01-20",
            "Became Public Law No: 119-1.",
            "2025-04-01",
        ),
    ]
}

/// Body of the bill detail endpoint.
pub fn bill_detail() -> Value {
    json!({
        "bill": {
            "congress": 119,
            "type": "HR",
            "number": "2316",
            "title": "Example Relief Act",
            "introducedDate": "2025-03-27",
            "policyArea": {"name": "Taxation"},
            "sponsors": [{"fullName": "Rep. Doe, Jane [D-OR-3]", "party": "D", "state": "OR"}],
            "cosponsors": {"count": 4},
            "actions": {"count": 3},
            "latestAction": {"actionDate": "2025-03-27", "text": "Referred to the House Committee on Ways and Means."}
        }
    })
}

/// Entries of the bill actions endpoint, newest first as the API returns them.
pub fn actions() -> Vec<Value> {
    vec![
        json!({"actionDate": "2025-05-01", "text": "Received in the Senate.", "type": "Floor",
               "sourceSystem": {"code": 0, "name": "Senate"}}),
        json!({"actionDate": "2025-04-30", "text": "On passage Passed by the Yeas and Nays: 310 - 115.",
               "type": "Floor", "actionCode": "8000", "sourceSystem": {"code": 2, "name": "House floor actions"}}),
        json!({"actionDate": "2025-03-27", "text": "Referred to the House Committee on Ways and Means.",
               "type": "IntroReferral", "committees": [{"name": "Ways and Means Committee"}]}),
        json!({"actionDate": "2025-03-27", "text": "Introduced in House", "type": "IntroReferral"}),
    ]
}
