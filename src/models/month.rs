use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::price::PriceRecord;
use crate::error::DashboardError;
use crate::thai_date;

// ---------------------------------------------------------------------------
// MonthPeriod — A Gregorian calendar month
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthPeriod {
    pub year: i32,
    pub month: u32,
}

impl MonthPeriod {
    /// Build a period, rejecting months outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Heading in Thai with a Buddhist-era year, e.g. `"พฤษภาคม 2568"`.
    pub fn thai_label(&self) -> String {
        thai_date::thai_month_label(self.year, self.month).unwrap_or_else(|| self.to_string())
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthPeriod {
    type Err = DashboardError;

    /// Parse `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DashboardError::InvalidArgument(format!("Invalid month: {}", s));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthPeriod::new(year, month).ok_or_else(invalid)
    }
}

// ---------------------------------------------------------------------------
// MonthPage — One page of the monthly history table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MonthPage {
    /// Zero-based page index; 0 is the oldest month in the window.
    pub index: usize,
    pub total_pages: usize,
    pub month: MonthPeriod,
    pub label: String,
    pub has_prev: bool,
    pub has_next: bool,
    pub rows: Vec<PriceRecord>,
}
