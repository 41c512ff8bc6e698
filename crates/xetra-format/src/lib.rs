//! Report formatters for the xetra daily report ETL.
//!
//! This crate provides writers for daily summary tables:
//!
//! - [`ParquetFormatter`] - Apache Parquet, the stored report format, with a reader for verification
//! - [`CsvFormatter`] - CSV format
//! - [`JsonFormatter`] - JSON array or NDJSON format

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/xetra/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod parquet;

pub use crate::csv::CsvFormatter;
pub use crate::parquet::{ParquetFormatter, read_summaries, report_schema};
pub use formatter::{FormatError, Formatter};
pub use json::JsonFormatter;
