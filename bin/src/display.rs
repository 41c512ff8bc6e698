//! Display utilities and output formatting for the xetra CLI.

use anyhow::Result;
use clap::ValueEnum;
use std::io::Write;
use xetra_lib::prelude::*;

/// Output format for printed reports.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Table,
    Csv,
    Json,
    Ndjson,
}

/// Write summary rows in the specified format.
pub(crate) fn write_rows<W: Write + Send>(
    rows: &[DailySummary],
    format: Format,
    writer: W,
) -> Result<()> {
    match format {
        Format::Table => write_table(rows, writer)?,
        Format::Csv => CsvFormatter::new().write_summaries(rows, writer)?,
        Format::Json => JsonFormatter::new()
            .with_pretty(true)
            .write_summaries(rows, writer)?,
        Format::Ndjson => JsonFormatter::ndjson().write_summaries(rows, writer)?,
    }
    Ok(())
}

/// Write rows as an aligned table.
fn write_table<W: Write>(rows: &[DailySummary], mut writer: W) -> Result<()> {
    writeln!(
        writer,
        "{:<14} {:<10} {:>10} {:>10} {:>10} {:>10} {:>14} {:>9}",
        "ISIN", "DATE", "OPEN", "CLOSE", "MIN", "MAX", "VOLUME", "CHANGE%"
    )?;
    writeln!(writer, "{}", "-".repeat(96))?;

    for row in rows {
        let change = row
            .change_prev_closing_pct
            .map_or_else(|| "-".to_string(), |c| format!("{c:.2}"));
        writeln!(
            writer,
            "{:<14} {:<10} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>14} {:>9}",
            row.isin,
            row.date,
            row.opening_price_eur,
            row.closing_price_eur,
            row.minimum_price_eur,
            row.maximum_price_eur,
            row.daily_traded_volume,
            change
        )?;
    }

    writeln!(writer, "\nTotal: {} rows", rows.len())?;
    Ok(())
}
