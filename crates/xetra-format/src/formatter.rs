//! Output format abstraction.

use std::io::Write;
use thiserror::Error;
use xetra_types::{DailySummary, XetraError};

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Arrow/Parquet error.
    #[error("Parquet error: {0}")]
    Parquet(String),

    /// A stored report does not have the report schema.
    #[error("Unexpected report schema: {0}")]
    Schema(String),
}

impl From<FormatError> for XetraError {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::Io(e) => Self::Io(e),
            other => Self::Format(other.to_string()),
        }
    }
}

/// Trait for summary table formatters.
pub trait Formatter: Send + Sync {
    /// Writes daily summaries to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_summaries<W: Write + Send>(
        &self,
        rows: &[DailySummary],
        writer: W,
    ) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}
