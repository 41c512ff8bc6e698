//! Two-decimal rounding of summary columns.

use xetra_types::DailySummary;

/// Rounds to two decimals, resolving halves to the even neighbour of the
/// scaled value.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Rounds every floating-point column of a summary to two decimals.
pub fn round_summary(summary: &mut DailySummary) {
    summary.opening_price_eur = round2(summary.opening_price_eur);
    summary.closing_price_eur = round2(summary.closing_price_eur);
    summary.minimum_price_eur = round2(summary.minimum_price_eur);
    summary.maximum_price_eur = round2(summary.maximum_price_eur);
    summary.change_prev_closing_pct = summary.change_prev_closing_pct.map(round2);
}
