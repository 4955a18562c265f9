//! Bill normalization and filtering for Congress Pulse.
//!
//! Everything in this crate is a pure transformation over records already
//! fetched from congress.gov:
//!
//! - [`normalize`] flattens a [`RawBill`] into a [`NormalizedBill`] and
//!   classifies its [`LegislativeStage`]
//! - [`filter`] selects the bills matching a [`FilterSpec`]
//! - [`BillOverview`] and [`journey`] flatten a single bill's detail and
//!   action history

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

mod detail;
mod filter;
mod id;
pub mod journey;
mod normalize;
pub mod raw;
mod stage;

pub use detail::{BillOverview, LatestAction, POLICY_AREA_PENDING};
pub use filter::{filter, ChamberFilter, FilterSpec};
pub use id::{BillId, BillIdError, BillType};
pub use journey::{BillAction, Milestone, MilestoneEvent};
pub use normalize::{
    normalize, normalize_feed, parse_feed_date, sort_recent_first, Chamber, FeedReport,
    MalformedRecord, NormalizedBill, UnknownChamber, POLICY_AREA_NOT_ASSIGNED,
};
pub use raw::{RawBill, RawBillDetail};
pub use stage::{LegislativeStage, UnknownStage};
