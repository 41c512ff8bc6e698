//! Daily summary aggregation for the xetra daily report ETL.
//!
//! This crate provides the transformation stage:
//!
//! - [`GroupBy`] - Grouped aggregation with first/last/min/max/sum reducers
//! - [`DailyAggregator`] - Tick records to one [`xetra_types::DailySummary`] per security and day
//! - [`percent_change`] - Day-over-day change against the previous close

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/xetra/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod change;
mod daily;
mod group;
mod round;

pub use change::{apply_previous_close, percent_change};
pub use daily::{DailyAggregator, summarize};
pub use group::{Accumulator, First, GroupBy, Last, Max, Min, Sum};
pub use round::{round2, round_summary};
