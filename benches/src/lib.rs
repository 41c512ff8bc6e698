//! Synthetic Xetra data for benchmarks.
//!
//! Generates deterministic per-minute records shaped like the public Xetra
//! files, either as typed records or as CSV objects keyed by trading day.

use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use xetra_lib::TickRecord;

/// Header of generated CSV objects.
pub const CSV_HEADER: &str = "ISIN,Mnemonic,SecurityDesc,SecurityType,Currency,SecurityID,Date,Time,StartPrice,MaxPrice,MinPrice,EndPrice,NumberOfTrades,TradedVolume";

/// Shape of a generated data set.
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    /// Number of securities.
    pub isins: usize,
    /// Number of consecutive trading days.
    pub days: u64,
    /// Records per security and day (at most 510, one per minute from 08:00).
    pub minutes: u32,
    /// First trading day.
    pub start: NaiveDate,
    /// Seed of the price walk.
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            isins: 100,
            days: 2,
            minutes: 120,
            start: NaiveDate::from_ymd_opt(2022, 12, 24).unwrap_or_default(),
            seed: 42,
        }
    }
}

impl SyntheticConfig {
    /// Returns the total number of records generated.
    #[must_use]
    pub fn total_records(&self) -> u64 {
        self.isins as u64 * self.days * u64::from(self.minutes)
    }

    /// Returns the trading days covered.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.days).filter_map(|d| self.start.checked_add_days(Days::new(d)))
    }

    /// Generates the records of one day.
    #[must_use]
    pub fn records_for(&self, date: NaiveDate) -> Vec<TickRecord> {
        let mut rng = Lcg::new(self.seed ^ u64::from(date.ordinal()));
        let open = NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default();
        let mut records = Vec::with_capacity(self.isins * self.minutes as usize);

        for i in 0..self.isins {
            let isin = format!("DE{i:010}");
            let mut price = 10.0 + (i % 90) as f64;
            // Shuffle minute order so aggregation cannot rely on sorted input
            let offset = rng.next_u64() % u64::from(self.minutes.max(1));
            for m in 0..self.minutes {
                let minute = (u64::from(m) + offset) % u64::from(self.minutes);
                let start = price;
                price = (price * (1.0 + rng.unit() * 0.004 - 0.002)).max(0.01);
                let (low, high) = if start < price { (start, price) } else { (price, start) };
                records.push(TickRecord::new(
                    isin.clone(),
                    date,
                    open + chrono::Duration::minutes(minute as i64),
                    start,
                    high * (1.0 + rng.unit() * 0.001),
                    low * (1.0 - rng.unit() * 0.001),
                    price,
                    rng.next_u64() % 10_000,
                ));
            }
        }
        records
    }

    /// Generates every record, day by day.
    #[must_use]
    pub fn records(&self) -> Vec<TickRecord> {
        self.dates().flat_map(|d| self.records_for(d)).collect()
    }

    /// Generates one CSV object per day, keyed `YYYY-MM-DD/...csv`.
    #[must_use]
    pub fn objects(&self) -> Vec<(String, String)> {
        self.dates()
            .map(|date| {
                let key = format!("{date}/{date}_BINS_XETR.csv");
                (key, to_csv(&self.records_for(date)))
            })
            .collect()
    }
}

/// Renders records as a Xetra-style CSV object.
#[must_use]
pub fn to_csv(records: &[TickRecord]) -> String {
    let mut out = String::with_capacity(records.len() * 120);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for r in records {
        out.push_str(&format!(
            "{},MN,SECURITY,Common stock,EUR,1,{},{},{},{},{},{},1,{}\n",
            r.isin,
            r.date,
            r.time.format("%H:%M"),
            r.start_price,
            r.max_price,
            r.min_price,
            r.end_price,
            r.traded_volume
        ));
    }
    out
}

/// Linear congruential generator for reproducible data.
#[derive(Debug)]
struct Lcg(u64);

impl Lcg {
    const fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    fn unit(&mut self) -> f64 {
        self.next_u64() as f64 / (1u64 << 31) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let config = SyntheticConfig {
            isins: 3,
            minutes: 10,
            ..Default::default()
        };
        assert_eq!(config.records(), config.records());
        assert_eq!(config.records().len() as u64, config.total_records());
    }

    #[test]
    fn test_objects_keyed_by_day() {
        let objects = SyntheticConfig::default().objects();
        assert_eq!(objects.len(), 2);
        assert!(objects[0].0.starts_with("2022-12-24/"));
        assert!(objects[1].1.starts_with(CSV_HEADER));
    }
}
