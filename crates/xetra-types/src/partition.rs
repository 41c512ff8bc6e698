//! Reference dates, extraction cutoffs and source partition keys.

use chrono::{Days, NaiveDate};
use std::str::FromStr;

use crate::DateError;

/// Date format used by reference dates and partition key segments.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an ISO `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns an error if the input is not a valid date.
pub fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| DateError::Invalid(s.to_string()))
}

/// Extracts the partition date from an object key.
///
/// Source keys start with the trading day, e.g.
/// `2022-12-25/2022-12-25_BINS_XETR08.csv`. Returns `None` when the first
/// segment is not a date, and for folder markers such as `2022-12-25/`.
#[must_use]
pub fn partition_date(key: &str) -> Option<NaiveDate> {
    if key.ends_with('/') {
        return None;
    }
    let segment = key.split('/').next()?;
    NaiveDate::parse_from_str(segment, DATE_FORMAT).ok()
}

/// The dates an extraction run is scoped to.
///
/// The cutoff is one day before the reference date so that the previous
/// day's closing price is available for the percent change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionWindow {
    /// Date the report is requested for.
    pub reference: NaiveDate,
    /// Earliest partition date included (inclusive).
    pub cutoff: NaiveDate,
}

impl ExtractionWindow {
    /// Creates the window for a reference date.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference date has no previous day.
    pub fn new(reference: NaiveDate) -> Result<Self, DateError> {
        let cutoff = reference
            .checked_sub_days(Days::new(1))
            .ok_or(DateError::NoPreviousDay(reference))?;
        Ok(Self { reference, cutoff })
    }

    /// Returns true if a partition dated `date` belongs to the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.cutoff
    }
}

impl FromStr for ExtractionWindow {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse_date(s)?)
    }
}

impl std::fmt::Display for ExtractionWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} onwards (reference {})", self.cutoff, self.reference)
    }
}
