//! Source object listing and sequential fetch.

use futures::stream::{self, Stream, StreamExt};
use std::pin::pin;
use xetra_store::ObjectStore;
use xetra_types::{ExtractionWindow, TickRecord, partition_date};

use crate::{ExtractError, decode_records};

/// The records decoded from one source object.
#[derive(Debug, Clone)]
pub struct SourceBatch {
    /// Object key.
    pub key: String,
    /// Records in file order.
    pub records: Vec<TickRecord>,
}

impl SourceBatch {
    /// Returns true if the object held no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }
}

/// The unified table produced by an extraction.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// All records, concatenated in listing order.
    pub records: Vec<TickRecord>,
    /// Number of source objects read.
    pub objects: usize,
}

/// Reads source objects from a store.
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'a> {
    store: &'a dyn ObjectStore,
}

impl<'a> Extractor<'a> {
    /// Creates an extractor over a source store.
    #[must_use]
    pub const fn new(store: &'a dyn ObjectStore) -> Self {
        Self { store }
    }

    /// Lists the keys whose partition date falls inside the window.
    ///
    /// Keys without a leading date segment and folder markers are skipped
    /// with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be listed.
    pub async fn plan(&self, window: &ExtractionWindow) -> Result<Vec<String>, ExtractError> {
        let keys = self.store.list().await?;
        let listed = keys.len();

        let selected: Vec<String> = keys
            .into_iter()
            .filter(|key| match partition_date(key) {
                Some(date) => window.contains(date),
                None if key.ends_with('/') => {
                    tracing::warn!(key = %key, "skipping folder marker");
                    false
                }
                None => {
                    tracing::warn!(key = %key, "skipping object without a partition date");
                    false
                }
            })
            .collect();

        tracing::info!(
            location = %self.store.location(),
            listed,
            selected = selected.len(),
            cutoff = %window.cutoff,
            "planned extraction"
        );
        Ok(selected)
    }

    /// Creates a stream that fetches and decodes the given keys one by one.
    ///
    /// Objects are read strictly in order; the next read starts only after
    /// the previous object has been decoded.
    pub fn batches(
        &self,
        keys: Vec<String>,
    ) -> impl Stream<Item = Result<SourceBatch, ExtractError>> + use<'a> {
        let store = self.store;
        stream::iter(keys).then(move |key| async move {
            let body = store.get(&key).await?;
            let records = decode_records(&key, &body).await?;
            tracing::debug!(key = %key, records = records.len(), "decoded object");
            Ok(SourceBatch { key, records })
        })
    }

    /// Fetches the given keys in order and hands each decoded batch to
    /// `on_batch`. Returns the number of objects read.
    ///
    /// # Errors
    ///
    /// Returns the first read or decode error. Batches already handed over
    /// stay with the caller.
    pub async fn for_each_batch(
        &self,
        keys: Vec<String>,
        mut on_batch: impl FnMut(SourceBatch),
    ) -> Result<usize, ExtractError> {
        let mut objects = 0;
        let mut batches = pin!(self.batches(keys));

        while let Some(batch) = batches.next().await {
            on_batch(batch?);
            objects += 1;
        }
        Ok(objects)
    }

    /// Fetches every object in the window and concatenates the records.
    ///
    /// An empty window yields an empty extraction.
    ///
    /// # Errors
    ///
    /// Returns the first listing, read or decode error; nothing is returned
    /// for a partially read window.
    pub async fn extract(&self, window: &ExtractionWindow) -> Result<Extraction, ExtractError> {
        let keys = self.plan(window).await?;
        let mut records = Vec::new();
        let objects = self
            .for_each_batch(keys, |batch| records.extend(batch.records))
            .await?;

        tracing::info!(objects, records = records.len(), "extracted source records");
        Ok(Extraction { records, objects })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use chrono::NaiveDate;
    use xetra_store::{MemoryStore, StoreError};

    const HEADER: &str = "ISIN,Mnemonic,SecurityDesc,SecurityType,Currency,SecurityID,Date,Time,StartPrice,MaxPrice,MinPrice,EndPrice,NumberOfTrades,TradedVolume";

    fn object(date: &str, rows: &[(&str, &str, f64)]) -> String {
        let mut out = format!("{HEADER}\n");
        for (isin, time, price) in rows {
            out.push_str(&format!(
                "{isin},M,DESC,Common stock,EUR,1,{date},{time},{price},{price},{price},{price},1,10\n"
            ));
        }
        out
    }

    fn source_store() -> MemoryStore {
        MemoryStore::with_objects([
            (
                "2022-12-23/2022-12-23_BINS_XETR08.csv",
                object("2022-12-23", &[("AT0000A0E9W5", "08:00", 9.0)]),
            ),
            (
                "2022-12-24/2022-12-24_BINS_XETR08.csv",
                object("2022-12-24", &[("AT0000A0E9W5", "08:00", 10.0)]),
            ),
            (
                "2022-12-25/2022-12-25_BINS_XETR08.csv",
                object(
                    "2022-12-25",
                    &[("AT0000A0E9W5", "08:00", 10.5), ("DE0005772206", "08:00", 40.0)],
                ),
            ),
            ("manifest.json", "{}".to_string()),
        ])
    }

    fn window(s: &str) -> ExtractionWindow {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_plan_applies_cutoff() {
        let store = source_store();
        let keys = Extractor::new(&store).plan(&window("2022-12-25")).await.unwrap();

        assert_eq!(
            keys,
            vec![
                "2022-12-24/2022-12-24_BINS_XETR08.csv",
                "2022-12-25/2022-12-25_BINS_XETR08.csv",
            ]
        );
    }

    #[tokio::test]
    async fn test_folder_markers_are_skipped() {
        let store = MemoryStore::with_objects([
            ("2022-12-25/", String::new()),
            (
                "2022-12-25/a.csv",
                object("2022-12-25", &[("AT0000A0E9W5", "08:00", 10.5)]),
            ),
        ]);
        let extractor = Extractor::new(&store);

        let keys = extractor.plan(&window("2022-12-25")).await.unwrap();
        assert_eq!(keys, vec!["2022-12-25/a.csv"]);

        let extraction = extractor.extract(&window("2022-12-25")).await.unwrap();
        assert_eq!(extraction.objects, 1);
        assert_eq!(extraction.records.len(), 1);
    }

    #[tokio::test]
    async fn test_for_each_batch_in_key_order() {
        let store = source_store();
        let keys = vec![
            "2022-12-25/2022-12-25_BINS_XETR08.csv".to_string(),
            "2022-12-23/2022-12-23_BINS_XETR08.csv".to_string(),
        ];

        let mut seen = Vec::new();
        let objects = Extractor::new(&store)
            .for_each_batch(keys, |batch| seen.push((batch.key.clone(), batch.len())))
            .await
            .unwrap();

        assert_eq!(objects, 2);
        assert_eq!(
            seen,
            vec![
                ("2022-12-25/2022-12-25_BINS_XETR08.csv".to_string(), 2),
                ("2022-12-23/2022-12-23_BINS_XETR08.csv".to_string(), 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_extract_concatenates_in_listing_order() {
        let store = source_store();
        let extraction = Extractor::new(&store)
            .extract(&window("2022-12-25"))
            .await
            .unwrap();

        assert_eq!(extraction.objects, 2);
        assert_eq!(extraction.records.len(), 3);
        assert_eq!(
            extraction.records[0].date,
            NaiveDate::from_ymd_opt(2022, 12, 24).unwrap()
        );
        assert_eq!(extraction.records[2].isin, "DE0005772206");
    }

    #[tokio::test]
    async fn test_extract_empty_window() {
        let store = source_store();
        let extraction = Extractor::new(&store)
            .extract(&window("2023-06-01"))
            .await
            .unwrap();

        assert_eq!(extraction.objects, 0);
        assert!(extraction.records.is_empty());
    }

    #[tokio::test]
    async fn test_decode_error_aborts() {
        let store = MemoryStore::with_objects([
            (
                "2022-12-24/good.csv",
                object("2022-12-24", &[("AT0000A0E9W5", "08:00", 10.0)]),
            ),
            ("2022-12-25/bad.csv", "ISIN,Date\nX,2022-12-25\n".to_string()),
        ]);

        let result = Extractor::new(&store).extract(&window("2022-12-25")).await;
        assert!(matches!(result, Err(ExtractError::MissingColumn { .. })));
    }

    #[derive(Debug)]
    struct FailingStore;

    #[async_trait]
    impl ObjectStore for FailingStore {
        async fn list(&self) -> Result<Vec<String>, StoreError> {
            Ok(vec!["2022-12-25/a.csv".to_string()])
        }

        async fn get(&self, _key: &str) -> Result<Bytes, StoreError> {
            Err(StoreError::Request("connection reset".to_string()))
        }

        async fn put(&self, _key: &str, _body: Bytes) -> Result<(), StoreError> {
            Err(StoreError::Request("read only".to_string()))
        }

        fn location(&self) -> String {
            "failing://".to_string()
        }
    }

    #[tokio::test]
    async fn test_read_failure_aborts() {
        let result = Extractor::new(&FailingStore)
            .extract(&window("2022-12-25"))
            .await;
        assert!(matches!(result, Err(ExtractError::Store(_))));
    }
}
