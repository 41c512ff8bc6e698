//! CSV output format.

use std::io::Write;
use xetra_types::{DATE_FORMAT, DailySummary};

use crate::{FormatError, Formatter};

/// CSV formatter.
///
/// A missing percent change is written as an empty field.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    /// Creates a new CSV formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Formatter for CsvFormatter {
    fn write_summaries<W: Write + Send>(
        &self,
        rows: &[DailySummary],
        mut writer: W,
    ) -> Result<(), FormatError> {
        writeln!(
            writer,
            "isin,date,opening_price_eur,closing_price_eur,minimum_price_eur,maximum_price_eur,daily_traded_volume,change_prev_closing_pct"
        )?;

        for row in rows {
            let change = row
                .change_prev_closing_pct
                .map(|c| c.to_string())
                .unwrap_or_default();
            writeln!(
                writer,
                "{},{},{},{},{},{},{},{}",
                row.isin,
                row.date.format(DATE_FORMAT),
                row.opening_price_eur,
                row.closing_price_eur,
                row.minimum_price_eur,
                row.maximum_price_eur,
                row.daily_traded_volume,
                change
            )?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}
