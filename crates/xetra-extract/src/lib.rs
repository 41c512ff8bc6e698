//! Source listing and CSV decoding for the xetra daily report ETL.
//!
//! This crate provides the extraction stage:
//!
//! - [`SourceSchema`] - Required columns resolved against each file's header
//! - [`decode_records`] - CSV decoding into [`xetra_types::TickRecord`]s
//! - [`Extractor`] - Lists, filters, fetches and concatenates source objects

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/xetra/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod decode;
mod extractor;
mod schema;

pub use decode::decode_records;
pub use extractor::{Extraction, Extractor, SourceBatch};
pub use schema::{Column, NullCounts, SourceSchema};

use thiserror::Error;
use xetra_store::StoreError;
use xetra_types::XetraError;

/// Errors that can occur during extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Listing or reading from the source store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The CSV reader rejected the object.
    #[error("Malformed CSV in '{key}': {source}")]
    Csv {
        /// Object key.
        key: String,
        /// The underlying CSV error.
        source: csv_async::Error,
    },

    /// A required column is absent from the header.
    #[error("'{key}' has no '{column}' column")]
    MissingColumn {
        /// Object key.
        key: String,
        /// Header name of the missing column.
        column: &'static str,
    },

    /// Required cells are empty.
    #[error("'{key}' has {} empty required values, first at line {line} ({column}); per column: {nulls}", .nulls.total())]
    MissingValues {
        /// Object key.
        key: String,
        /// Line of the first empty cell.
        line: u64,
        /// Column of the first empty cell.
        column: &'static str,
        /// Empty cells per column over the whole object.
        nulls: NullCounts,
    },

    /// A value cannot be parsed into its column type.
    #[error("'{key}' line {line}: invalid {column} value '{value}'")]
    InvalidValue {
        /// Object key.
        key: String,
        /// Line of the record.
        line: u64,
        /// Column of the value.
        column: &'static str,
        /// The raw value.
        value: String,
    },
}

impl From<ExtractError> for XetraError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Store(e) => e.into(),
            ExtractError::MissingColumn { .. } => Self::Schema(err.to_string()),
            _ => Self::Parse(err.to_string()),
        }
    }
}
