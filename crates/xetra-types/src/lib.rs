//! Core types for the xetra daily report ETL.
//!
//! This crate provides the fundamental data structures shared by every stage:
//!
//! - [`TickRecord`] - A single per-minute trading record read from a source file
//! - [`DailySummary`] - One aggregated row per security and trading day
//! - [`ExtractionWindow`] - Reference date and the derived extraction cutoff
//! - [`XetraError`] - Error type surfaced by the pipeline

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/xetra/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod partition;
mod record;
mod summary;

pub use error::{DateError, Result, XetraError};
pub use partition::{DATE_FORMAT, ExtractionWindow, parse_date, partition_date};
pub use record::TickRecord;
pub use summary::DailySummary;
