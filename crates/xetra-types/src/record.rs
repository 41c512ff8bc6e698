//! Raw trading record representation.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single per-minute trading record for one security.
///
/// Source files hold one record per security and minute bucket in which at
/// least one trade happened. Several records share the same `(isin, date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    /// International Securities Identification Number.
    pub isin: String,
    /// Trading day.
    pub date: NaiveDate,
    /// Start of the minute bucket.
    pub time: NaiveTime,
    /// First traded price in the bucket.
    pub start_price: f64,
    /// Highest traded price in the bucket.
    pub max_price: f64,
    /// Lowest traded price in the bucket.
    pub min_price: f64,
    /// Last traded price in the bucket.
    pub end_price: f64,
    /// Number of shares traded in the bucket.
    pub traded_volume: u64,
}

impl TickRecord {
    /// Creates a new record.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        isin: impl Into<String>,
        date: NaiveDate,
        time: NaiveTime,
        start_price: f64,
        max_price: f64,
        min_price: f64,
        end_price: f64,
        traded_volume: u64,
    ) -> Self {
        Self {
            isin: isin.into(),
            date,
            time,
            start_price,
            max_price,
            min_price,
            end_price,
            traded_volume,
        }
    }

    /// Returns the `(isin, date)` key this record is grouped under.
    #[must_use]
    pub fn day_key(&self) -> (&str, NaiveDate) {
        (self.isin.as_str(), self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_key() {
        let date = NaiveDate::from_ymd_opt(2022, 12, 25).unwrap();
        let time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let record = TickRecord::new("AT0000A0E9W5", date, time, 10.0, 10.6, 9.8, 10.5, 100);

        assert_eq!(record.day_key(), ("AT0000A0E9W5", date));
    }
}
