//! Daily summary row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregated trading statistics for one security on one day.
///
/// Prices are in EUR, the only currency traded on the source market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// International Securities Identification Number.
    pub isin: String,
    /// Trading day.
    pub date: NaiveDate,
    /// Start price of the day's earliest record.
    pub opening_price_eur: f64,
    /// End price of the day's latest record.
    pub closing_price_eur: f64,
    /// Lowest price traded during the day.
    pub minimum_price_eur: f64,
    /// Highest price traded during the day.
    pub maximum_price_eur: f64,
    /// Total shares traded during the day.
    pub daily_traded_volume: u64,
    /// Percent change against the previous closing price, if one is known.
    pub change_prev_closing_pct: Option<f64>,
}

impl DailySummary {
    /// Returns the `(isin, date)` key of this row.
    #[must_use]
    pub fn day_key(&self) -> (&str, NaiveDate) {
        (self.isin.as_str(), self.date)
    }
}
