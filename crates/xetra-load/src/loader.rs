//! Report writing and read-back verification.

use chrono::NaiveDateTime;
use xetra_format::{Formatter, ParquetFormatter, read_summaries};
use xetra_store::ObjectStore;
use xetra_types::DailySummary;

use crate::{DEFAULT_REPORT_PREFIX, LoadError, ReportKey};

/// Outcome of comparing a stored report with the table it was written from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// Key of the stored report.
    pub key: ReportKey,
    /// Rows in the in-memory table.
    pub expected_rows: usize,
    /// Rows decoded from the stored object.
    pub stored_rows: usize,
    /// Index of the first differing row, if any row differs.
    pub first_mismatch: Option<usize>,
}

impl Verification {
    /// Returns true if the stored report reproduces the table exactly.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.expected_rows == self.stored_rows && self.first_mismatch.is_none()
    }
}

/// Writes daily reports to a target store.
#[derive(Debug, Clone)]
pub struct Loader<'a> {
    store: &'a dyn ObjectStore,
    formatter: ParquetFormatter,
    prefix: String,
}

impl<'a> Loader<'a> {
    /// Creates a loader with the default key prefix and Parquet settings.
    #[must_use]
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self {
            store,
            formatter: ParquetFormatter::new(),
            prefix: DEFAULT_REPORT_PREFIX.to_string(),
        }
    }

    /// Sets the key prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the Parquet writer settings.
    #[must_use]
    pub fn with_formatter(mut self, formatter: ParquetFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Returns the key prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the key a report written at `at` is stored under.
    #[must_use]
    pub fn key_for(&self, at: NaiveDateTime) -> ReportKey {
        ReportKey::new(&self.prefix, at, self.formatter.extension())
    }

    /// Serializes the table to Parquet and stores it under a key stamped
    /// with `at`.
    ///
    /// An empty table is stored as a valid zero-row file.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the store write fails.
    pub async fn write(
        &self,
        rows: &[DailySummary],
        at: NaiveDateTime,
    ) -> Result<ReportKey, LoadError> {
        let body = self.formatter.to_bytes(rows)?;
        let key = self.key_for(at);
        let size = body.len();

        self.store.put(key.as_str(), body).await?;

        tracing::info!(
            location = %self.store.location(),
            key = %key,
            rows = rows.len(),
            bytes = size,
            "stored report"
        );
        Ok(key)
    }

    /// Reads a stored report back and compares it with `expected`.
    ///
    /// A mismatch is logged and returned, not raised.
    ///
    /// # Errors
    ///
    /// Returns an error if the object cannot be read or decoded.
    pub async fn verify(
        &self,
        key: &ReportKey,
        expected: &[DailySummary],
    ) -> Result<Verification, LoadError> {
        let body = self.store.get(key.as_str()).await?;
        let stored = read_summaries(body)?;

        let verification = Verification {
            key: key.clone(),
            expected_rows: expected.len(),
            stored_rows: stored.len(),
            first_mismatch: expected
                .iter()
                .zip(&stored)
                .position(|(want, got)| want != got),
        };

        if verification.is_match() {
            tracing::info!(key = %key, rows = stored.len(), "verified stored report");
        } else {
            tracing::warn!(
                key = %key,
                expected_rows = verification.expected_rows,
                stored_rows = verification.stored_rows,
                first_mismatch = ?verification.first_mismatch,
                "stored report differs from the computed table"
            );
        }
        Ok(verification)
    }

    /// Reads a stored report.
    ///
    /// # Errors
    ///
    /// Returns an error if the object cannot be read or decoded.
    pub async fn read(&self, key: &str) -> Result<Vec<DailySummary>, LoadError> {
        let body = self.store.get(key).await?;
        Ok(read_summaries(body)?)
    }

    /// Lists the reports in the target store, oldest first.
    ///
    /// Only keys carrying this loader's prefix and extension are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be listed.
    pub async fn reports(&self) -> Result<Vec<ReportKey>, LoadError> {
        let suffix = format!(".{}", self.formatter.extension());
        let mut keys: Vec<ReportKey> = self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|key| key.starts_with(&self.prefix) && key.ends_with(&suffix))
            .map(ReportKey::from)
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use xetra_store::{MemoryStore, StoreError};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 12, 25)
            .unwrap()
            .and_hms_opt(hour, 30, 12)
            .unwrap()
    }

    fn create_test_rows() -> Vec<DailySummary> {
        vec![DailySummary {
            isin: "AT0000A0E9W5".to_string(),
            date: NaiveDate::from_ymd_opt(2022, 12, 25).unwrap(),
            opening_price_eur: 10.0,
            closing_price_eur: 11.0,
            minimum_price_eur: 9.8,
            maximum_price_eur: 11.2,
            daily_traded_volume: 300,
            change_prev_closing_pct: Some(10.0),
        }]
    }

    #[tokio::test]
    async fn test_write_and_verify() {
        let store = MemoryStore::new();
        let loader = Loader::new(&store);
        let rows = create_test_rows();

        let key = loader.write(&rows, at(17)).await.unwrap();
        assert_eq!(key.as_str(), "xetra_daily_report20221225_173012.parquet");
        assert_eq!(store.len(), 1);

        let verification = loader.verify(&key, &rows).await.unwrap();
        assert!(verification.is_match());
        assert_eq!(verification.stored_rows, 1);
    }

    #[tokio::test]
    async fn test_verify_reports_mismatch() {
        let store = MemoryStore::new();
        let loader = Loader::new(&store);
        let rows = create_test_rows();
        let key = loader.write(&rows, at(17)).await.unwrap();

        let mut changed = rows.clone();
        changed[0].closing_price_eur = 11.5;

        let verification = loader.verify(&key, &changed).await.unwrap();
        assert!(!verification.is_match());
        assert_eq!(verification.first_mismatch, Some(0));
    }

    #[tokio::test]
    async fn test_empty_table() {
        let store = MemoryStore::new();
        let loader = Loader::new(&store);

        let key = loader.write(&[], at(8)).await.unwrap();
        assert!(loader.read(key.as_str()).await.unwrap().is_empty());
        assert!(loader.verify(&key, &[]).await.unwrap().is_match());
    }

    #[tokio::test]
    async fn test_verify_missing_object() {
        let store = MemoryStore::new();
        let loader = Loader::new(&store);
        let key = loader.key_for(at(9));

        let result = loader.verify(&key, &[]).await;
        assert!(matches!(result, Err(LoadError::Store(StoreError::NotFound(_)))));
    }

    #[tokio::test]
    async fn test_reports_listing() {
        let store = MemoryStore::with_objects([("notes.txt", "x"), ("daily_x.csv", "y")]);
        let loader = Loader::new(&store).with_prefix("daily_");

        loader.write(&create_test_rows(), at(18)).await.unwrap();
        loader.write(&create_test_rows(), at(9)).await.unwrap();

        let reports = loader.reports().await.unwrap();
        let names: Vec<_> = reports.iter().map(ReportKey::as_str).collect();
        assert_eq!(
            names,
            vec![
                "daily_20221225_093012.parquet",
                "daily_20221225_183012.parquet"
            ]
        );
    }
}
