//! Day-over-day change against the previous closing price.

use xetra_types::DailySummary;

use crate::round::round2;

/// Returns the percent change from `previous` to `close`, rounded to two
/// decimals.
///
/// Returns `None` when there is no previous close, the previous close is
/// zero, or the result is not finite.
#[must_use]
pub fn percent_change(close: f64, previous: Option<f64>) -> Option<f64> {
    let previous = previous.filter(|p| *p != 0.0)?;
    let change = (close - previous) / previous * 100.0;
    change.is_finite().then(|| round2(change))
}

/// Fills `change_prev_closing_pct` in a single forward pass.
///
/// Rows must be sorted by ISIN and then date. The first row of each ISIN
/// has no previous close, even when the true previous trading day exists
/// outside the table.
pub fn apply_previous_close(rows: &mut [DailySummary]) {
    let mut previous: Option<(&str, f64)> = None;
    let mut changes = Vec::with_capacity(rows.len());

    for row in rows.iter() {
        let prev_close = previous
            .filter(|(isin, _)| *isin == row.isin)
            .map(|(_, close)| close);
        changes.push(percent_change(row.closing_price_eur, prev_close));
        previous = Some((row.isin.as_str(), row.closing_price_eur));
    }

    for (row, change) in rows.iter_mut().zip(changes) {
        row.change_prev_closing_pct = change;
    }
}
