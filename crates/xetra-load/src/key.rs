//! Report key naming.

use chrono::NaiveDateTime;
use derive_more::{Display, From, Into};

/// Default prefix of report keys.
pub const DEFAULT_REPORT_PREFIX: &str = "xetra_daily_report";

/// Timestamp layout embedded in report keys.
pub const KEY_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Object key of a stored daily report, e.g.
/// `xetra_daily_report20221225_173012.parquet`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
pub struct ReportKey(String);

impl ReportKey {
    /// Builds the key for a report written at `at`, truncated to seconds.
    #[must_use]
    pub fn new(prefix: &str, at: NaiveDateTime, extension: &str) -> Self {
        Self(format!(
            "{prefix}{}.{extension}",
            at.format(KEY_TIMESTAMP_FORMAT)
        ))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the write time back out of a key with the given prefix.
    #[must_use]
    pub fn timestamp(&self, prefix: &str) -> Option<NaiveDateTime> {
        let stem = self.0.strip_prefix(prefix)?;
        let (stamp, _) = stem.split_once('.')?;
        NaiveDateTime::parse_from_str(stamp, KEY_TIMESTAMP_FORMAT).ok()
    }
}

impl AsRef<str> for ReportKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
