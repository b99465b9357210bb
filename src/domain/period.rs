use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DatasetError;

/// Billing period a transaction belongs to, serialized in the `YYYY-MM` form
/// produced by month inputs and stored datasets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Parses a `YYYY-MM` string, rejecting anything that is not a year plus
    /// a month in 1-12.
    pub fn parse(raw: &str) -> Result<Self, DatasetError> {
        let malformed = || DatasetError::MalformedPeriod(raw.to_string());
        let (year_part, month_part) = raw.split_once('-').ok_or_else(malformed)?;
        let year: i32 = year_part.parse().map_err(|_| malformed())?;
        let month: u32 = month_part.parse().map_err(|_| malformed())?;
        if !(1..=12).contains(&month) {
            return Err(malformed());
        }
        Ok(Self { year, month })
    }

    /// True when the month component is a real calendar month.
    pub fn is_valid_month(&self) -> bool {
        (1..=12).contains(&self.month)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for Period {
    type Error = DatasetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Period::parse(&value)
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}
