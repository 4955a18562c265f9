//! Bill identifiers: congress, bill type and number.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kinds of measure congress.gov tracks under `/bill`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum BillType {
    Hr,
    S,
    Hjres,
    Sjres,
    Hconres,
    Sconres,
    Hres,
    Sres,
}

impl BillType {
    pub const ALL: [Self; 8] = [
        Self::Hr,
        Self::S,
        Self::Hjres,
        Self::Sjres,
        Self::Hconres,
        Self::Sconres,
        Self::Hres,
        Self::Sres,
    ];

    /// Lower-case path segment used by the congress.gov API.
    #[must_use]
    pub const fn as_path(self) -> &'static str {
        match self {
            Self::Hr => "hr",
            Self::S => "s",
            Self::Hjres => "hjres",
            Self::Sjres => "sjres",
            Self::Hconres => "hconres",
            Self::Sconres => "sconres",
            Self::Hres => "hres",
            Self::Sres => "sres",
        }
    }
}

impl fmt::Display for BillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

/// Errors raised while parsing bill identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BillIdError {
    #[error("unknown bill type: {0}")]
    UnknownType(String),

    #[error("invalid bill number: {0}")]
    InvalidNumber(String),

    #[error("expected \"TYPE NUMBER\", got: {0}")]
    Malformed(String),
}

impl FromStr for BillType {
    type Err = BillIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_path() == wanted)
            .ok_or_else(|| BillIdError::UnknownType(s.to_string()))
    }
}

/// Identifies one bill within a congress, e.g. H.R. 2316 of the 119th.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BillId {
    pub congress: u32,
    pub bill_type: BillType,
    pub number: u32,
}

impl BillId {
    #[must_use]
    pub const fn new(congress: u32, bill_type: BillType, number: u32) -> Self {
        Self {
            congress,
            bill_type,
            number,
        }
    }

    /// Recover an identifier from a normalized `bill_number` such as `"HR 2316"`.
    ///
    /// # Errors
    ///
    /// Returns [`BillIdError`] unless the text is exactly a known bill type
    /// and a number separated by whitespace.
    pub fn from_bill_number(bill_number: &str, congress: u32) -> Result<Self, BillIdError> {
        let parts: Vec<&str> = bill_number.split_whitespace().collect();
        let [bill_type, number] = parts.as_slice() else {
            return Err(BillIdError::Malformed(bill_number.to_string()));
        };

        let bill_type = bill_type.parse()?;
        let number = number
            .parse()
            .map_err(|_| BillIdError::InvalidNumber((*number).to_string()))?;

        Ok(Self::new(congress, bill_type, number))
    }

    /// Path of this bill relative to the API root: `bill/{congress}/{type}/{number}`.
    #[must_use]
    pub fn api_path(&self) -> String {
        format!("bill/{}/{}/{}", self.congress, self.bill_type, self.number)
    }
}

impl fmt::Display for BillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, Congress {}",
            self.bill_type.as_path().to_ascii_uppercase(),
            self.number,
            self.congress
        )
    }
}
