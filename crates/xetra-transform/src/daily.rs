//! Tick records to daily summaries.

use chrono::{NaiveDate, NaiveTime};
use xetra_types::{DailySummary, TickRecord};

use crate::change::apply_previous_close;
use crate::group::{Accumulator, First, GroupBy, Last, Max, Min, Sum};
use crate::round::round_summary;

/// Aggregates tick records into one summary per `(isin, date)`.
///
/// Records may arrive in any order. Summaries are emitted sorted by ISIN
/// and then date, with the previous-close change filled in and every price
/// rounded to two decimals.
#[derive(Debug, Default)]
pub struct DailyAggregator {
    days: GroupBy<(String, NaiveDate), DayBuilder>,
    records: usize,
}

impl DailyAggregator {
    /// Creates an empty aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record to its day.
    pub fn process(&mut self, record: &TickRecord) {
        self.days.push((record.isin.clone(), record.date), record);
        self.records += 1;
    }

    /// Returns the number of records processed so far.
    #[must_use]
    pub const fn records(&self) -> usize {
        self.records
    }

    /// Returns the number of distinct `(isin, date)` days seen so far.
    #[must_use]
    pub fn days(&self) -> usize {
        self.days.len()
    }

    /// Finishes aggregation.
    #[must_use]
    pub fn finish(self) -> Vec<DailySummary> {
        let mut summaries: Vec<DailySummary> = self
            .days
            .into_groups()
            .map(|((isin, date), day)| day.finish(isin, date))
            .collect();

        apply_previous_close(&mut summaries);
        summaries.iter_mut().for_each(round_summary);

        tracing::info!(
            records = self.records,
            summaries = summaries.len(),
            "aggregated daily summaries"
        );
        summaries
    }
}

impl Extend<TickRecord> for DailyAggregator {
    fn extend<I: IntoIterator<Item = TickRecord>>(&mut self, iter: I) {
        for record in iter {
            self.process(&record);
        }
    }
}

/// Aggregates a table of tick records into daily summaries.
#[must_use]
pub fn summarize(records: &[TickRecord]) -> Vec<DailySummary> {
    let mut aggregator = DailyAggregator::new();
    for record in records {
        aggregator.process(record);
    }
    aggregator.finish()
}

/// Running statistics for one security on one day.
#[derive(Debug)]
struct DayBuilder {
    open: First<NaiveTime, f64>,
    close: Last<NaiveTime, f64>,
    low: Min,
    high: Max,
    volume: Sum,
}

impl Accumulator<TickRecord> for DayBuilder {
    fn start(record: &TickRecord) -> Self {
        Self {
            open: First::new(record.time, record.start_price),
            close: Last::new(record.time, record.end_price),
            low: Min::new(record.min_price),
            high: Max::new(record.max_price),
            volume: Sum::new(record.traded_volume),
        }
    }

    fn update(&mut self, record: &TickRecord) {
        self.open.push(record.time, record.start_price);
        self.close.push(record.time, record.end_price);
        self.low.push(record.min_price);
        self.high.push(record.max_price);
        self.volume.push(record.traded_volume);
    }
}

impl DayBuilder {
    /// Builds the unrounded summary row.
    fn finish(self, isin: String, date: NaiveDate) -> DailySummary {
        DailySummary {
            isin,
            date,
            opening_price_eur: *self.open.value(),
            closing_price_eur: *self.close.value(),
            minimum_price_eur: self.low.value(),
            maximum_price_eur: self.high.value(),
            daily_traded_volume: self.volume.value(),
            change_prev_closing_pct: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 12, day).unwrap()
    }

    fn record(isin: &str, day: u32, hm: (u32, u32), prices: [f64; 4], volume: u64) -> TickRecord {
        let [start, max, min, end] = prices;
        TickRecord::new(
            isin,
            date(day),
            NaiveTime::from_hms_opt(hm.0, hm.1, 0).unwrap(),
            start,
            max,
            min,
            end,
            volume,
        )
    }

    #[test]
    fn test_reference_day() {
        let records = vec![
            record("AT0000A0E9W5", 24, (16, 0), [9.9, 10.1, 9.7, 10.0], 50),
            record("AT0000A0E9W5", 25, (8, 0), [10.0, 10.6, 9.8, 10.5], 100),
            record("AT0000A0E9W5", 25, (9, 0), [10.4, 11.2, 10.0, 11.0], 200),
        ];

        let summaries = summarize(&records);
        assert_eq!(summaries.len(), 2);

        let day = &summaries[1];
        assert_eq!(day.date, date(25));
        assert_relative_eq!(day.opening_price_eur, 10.0);
        assert_relative_eq!(day.closing_price_eur, 11.0);
        assert_relative_eq!(day.minimum_price_eur, 9.8);
        assert_relative_eq!(day.maximum_price_eur, 11.2);
        assert_eq!(day.daily_traded_volume, 300);
        assert_relative_eq!(day.change_prev_closing_pct.unwrap(), 10.0);
        assert_eq!(summaries[0].change_prev_closing_pct, None);
    }

    #[test]
    fn test_unordered_input() {
        let records = vec![
            record("DE0005772206", 25, (12, 30), [40.2, 40.9, 40.1, 40.8], 7),
            record("DE0005772206", 25, (8, 0), [39.5, 39.9, 39.1, 39.6], 3),
            record("DE0005772206", 25, (10, 15), [39.6, 41.0, 38.9, 40.2], 5),
        ];

        let summaries = summarize(&records);
        assert_eq!(summaries.len(), 1);

        let day = &summaries[0];
        assert_relative_eq!(day.opening_price_eur, 39.5);
        assert_relative_eq!(day.closing_price_eur, 40.8);
        assert_relative_eq!(day.minimum_price_eur, 38.9);
        assert_relative_eq!(day.maximum_price_eur, 41.0);
        assert_eq!(day.daily_traded_volume, 15);
    }

    #[test]
    fn test_equal_times_keep_input_order() {
        let records = vec![
            record("DE0005772206", 25, (8, 0), [1.0, 1.0, 1.0, 1.0], 1),
            record("DE0005772206", 25, (8, 0), [2.0, 2.0, 2.0, 2.0], 1),
            record("DE0005772206", 25, (9, 0), [3.0, 3.0, 3.0, 3.0], 1),
            record("DE0005772206", 25, (9, 0), [4.0, 4.0, 4.0, 4.0], 1),
        ];

        let day = &summarize(&records)[0];
        assert_relative_eq!(day.opening_price_eur, 1.0);
        assert_relative_eq!(day.closing_price_eur, 4.0);
    }

    #[test]
    fn test_rows_sorted_and_unique() {
        let records = vec![
            record("DE0005772206", 25, (8, 0), [40.0; 4], 1),
            record("AT0000A0E9W5", 25, (8, 0), [10.0; 4], 1),
            record("DE0005772206", 24, (8, 0), [39.0; 4], 1),
            record("AT0000A0E9W5", 25, (9, 0), [10.5; 4], 1),
            record("AT0000A0E9W5", 24, (9, 0), [9.5; 4], 1),
        ];

        let summaries = summarize(&records);
        let keys: Vec<_> = summaries.iter().map(DailySummary::day_key).collect();
        assert_eq!(
            keys,
            vec![
                ("AT0000A0E9W5", date(24)),
                ("AT0000A0E9W5", date(25)),
                ("DE0005772206", date(24)),
                ("DE0005772206", date(25)),
            ]
        );
        assert_eq!(keys.iter().collect::<HashSet<_>>().len(), keys.len());
    }

    #[test]
    fn test_extrema_and_volume() {
        let records = vec![
            record("AT0000A0E9W5", 25, (8, 0), [10.0, 10.3, 9.95, 10.1], 1_000_000),
            record("AT0000A0E9W5", 25, (8, 1), [10.1, 10.2, 9.5, 9.9], 2_500_000),
            record("AT0000A0E9W5", 25, (8, 2), [9.9, 12.0, 9.9, 11.0], 1),
        ];

        let day = &summarize(&records)[0];
        assert_relative_eq!(day.minimum_price_eur, 9.5);
        assert_relative_eq!(day.maximum_price_eur, 12.0);
        assert!(day.maximum_price_eur >= day.minimum_price_eur);
        assert_eq!(day.daily_traded_volume, 3_500_001);
    }

    #[test]
    fn test_prices_rounded() {
        let records = vec![
            record("AT0000A0E9W5", 24, (8, 0), [3.0, 3.0, 3.0, 3.0], 1),
            record("AT0000A0E9W5", 25, (8, 0), [10.123, 10.876, 9.994, 3.1], 1),
        ];

        let day = &summarize(&records)[1];
        assert_relative_eq!(day.opening_price_eur, 10.12);
        assert_relative_eq!(day.maximum_price_eur, 10.88);
        assert_relative_eq!(day.minimum_price_eur, 9.99);
        assert_relative_eq!(day.change_prev_closing_pct.unwrap(), 3.33);
    }

    #[test]
    fn test_empty_input() {
        assert!(summarize(&[]).is_empty());
    }

    #[test]
    fn test_extend_counts() {
        let mut aggregator = DailyAggregator::new();
        aggregator.extend(vec![
            record("AT0000A0E9W5", 25, (8, 0), [10.0; 4], 1),
            record("AT0000A0E9W5", 25, (9, 0), [10.0; 4], 1),
            record("AT0000A0E9W5", 26, (9, 0), [10.0; 4], 1),
        ]);

        assert_eq!(aggregator.records(), 3);
        assert_eq!(aggregator.days(), 2);
        assert_eq!(aggregator.finish().len(), 2);
    }
}
