//! Report storage and verification for the xetra daily report ETL.
//!
//! This crate provides the load stage:
//!
//! - [`ReportKey`] - Timestamped object key of a daily report
//! - [`Loader`] - Writes the Parquet report and reads it back for verification
//! - [`Verification`] - Outcome of comparing a stored report with the in-memory table

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/xetra/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod key;
mod loader;

pub use key::{DEFAULT_REPORT_PREFIX, KEY_TIMESTAMP_FORMAT, ReportKey};
pub use loader::{Loader, Verification};

use thiserror::Error;
use xetra_format::FormatError;
use xetra_store::StoreError;
use xetra_types::XetraError;

/// Errors that can occur while storing or verifying a report.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Writing to or reading from the target store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Encoding or decoding the report failed.
    #[error(transparent)]
    Format(#[from] FormatError),
}

impl From<LoadError> for XetraError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Store(e) => e.into(),
            LoadError::Format(e) => e.into(),
        }
    }
}
