//! Error types for xetra.

use thiserror::Error;

/// Result type alias for xetra operations.
pub type Result<T> = std::result::Result<T, XetraError>;

/// Errors that can abort an ETL run.
#[derive(Error, Debug)]
pub enum XetraError {
    /// Listing, reading or writing an object failed.
    #[error("Object store error: {0}")]
    Store(String),

    /// A source file does not match the expected column layout.
    #[error("Schema error: {0}")]
    Schema(String),

    /// A source value could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serializing or deserializing the report failed.
    #[error("Format error: {0}")]
    Format(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid reference or partition date.
    #[error(transparent)]
    Date(#[from] DateError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error for dates that cannot be used as a reference date.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The input is not an ISO `YYYY-MM-DD` date.
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    Invalid(String),

    /// The reference date has no previous day.
    #[error("Date {0} has no previous day")]
    NoPreviousDay(chrono::NaiveDate),
}
