//! End-to-end extract, transform and load.

use chrono::{Local, NaiveDateTime};
use xetra_extract::{Extractor, SourceBatch};
use xetra_load::{Loader, ReportKey, Verification};
use xetra_store::ObjectStore;
use xetra_transform::DailyAggregator;
use xetra_types::{ExtractionWindow, Result};

use crate::EtlConfig;

/// Stage events reported while a run progresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// The source objects inside the window are known.
    Planned {
        /// Number of objects to read.
        objects: usize,
    },
    /// One source object has been read and decoded.
    Extracted {
        /// Object key.
        key: String,
        /// Records decoded from the object.
        records: usize,
    },
    /// Daily summaries have been computed.
    Transformed {
        /// Number of summary rows.
        rows: usize,
    },
    /// The report has been written.
    Stored {
        /// Report key.
        key: ReportKey,
    },
}

/// Outcome of one ETL run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// The extraction window.
    pub window: ExtractionWindow,
    /// Source objects read.
    pub objects: usize,
    /// Tick records extracted.
    pub records: usize,
    /// Summary rows written.
    pub rows: usize,
    /// Key of the stored report.
    pub key: ReportKey,
    /// Read-back check, if enabled.
    pub verification: Option<Verification>,
}

/// Runs the daily report job against a source and a target store.
#[derive(Debug)]
pub struct EtlPipeline {
    source: Box<dyn ObjectStore>,
    target: Box<dyn ObjectStore>,
    report_prefix: String,
    verify: bool,
}

impl EtlPipeline {
    /// Creates a pipeline with the default key prefix and verification on.
    #[must_use]
    pub fn new(source: Box<dyn ObjectStore>, target: Box<dyn ObjectStore>) -> Self {
        let defaults = EtlConfig::default();
        Self {
            source,
            target,
            report_prefix: defaults.report_prefix,
            verify: defaults.verify,
        }
    }

    /// Opens the stores named in a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a store cannot be opened.
    pub fn from_config(config: &EtlConfig) -> Result<Self> {
        Ok(Self::new(config.source.open()?, config.target.open()?)
            .with_report_prefix(config.report_prefix.clone())
            .with_verify(config.verify))
    }

    /// Sets the report key prefix.
    #[must_use]
    pub fn with_report_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.report_prefix = prefix.into();
        self
    }

    /// Sets whether the stored report is read back and compared.
    #[must_use]
    pub const fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Returns the source store.
    #[must_use]
    pub fn source(&self) -> &dyn ObjectStore {
        self.source.as_ref()
    }

    /// Returns the target store.
    #[must_use]
    pub fn target(&self) -> &dyn ObjectStore {
        self.target.as_ref()
    }

    /// Returns a loader over the target store.
    #[must_use]
    pub fn loader(&self) -> Loader<'_> {
        Loader::new(self.target.as_ref()).with_prefix(self.report_prefix.clone())
    }

    /// Runs the job, stamping the report key with the local time.
    ///
    /// # Errors
    ///
    /// See [`EtlPipeline::run_at`].
    pub async fn run(&self, window: &ExtractionWindow) -> Result<RunSummary> {
        self.run_with_progress(window, |_| {}).await
    }

    /// Runs the job stamped with the local time, reporting each stage.
    ///
    /// # Errors
    ///
    /// See [`EtlPipeline::run_at`].
    pub async fn run_with_progress(
        &self,
        window: &ExtractionWindow,
        on_progress: impl FnMut(&Progress),
    ) -> Result<RunSummary> {
        self.run_at(window, Local::now().naive_local(), on_progress)
            .await
    }

    /// Runs the job with an explicit write time, reporting each stage.
    ///
    /// Nothing is written unless every source object was read and decoded.
    /// A verification mismatch is returned in the summary, not raised.
    ///
    /// # Errors
    ///
    /// Returns the first listing, read, decode, encode or write error.
    pub async fn run_at(
        &self,
        window: &ExtractionWindow,
        at: NaiveDateTime,
        mut on_progress: impl FnMut(&Progress),
    ) -> Result<RunSummary> {
        tracing::info!(
            reference = %window.reference,
            cutoff = %window.cutoff,
            source = %self.source.location(),
            target = %self.target.location(),
            "starting daily report run"
        );

        let extractor = Extractor::new(self.source.as_ref());
        let keys = extractor.plan(window).await?;
        let objects = keys.len();
        on_progress(&Progress::Planned { objects });

        let mut aggregator = DailyAggregator::new();
        extractor
            .for_each_batch(keys, |SourceBatch { key, records }| {
                on_progress(&Progress::Extracted {
                    key,
                    records: records.len(),
                });
                aggregator.extend(records);
            })
            .await?;

        let records = aggregator.records();
        if records == 0 {
            tracing::warn!(cutoff = %window.cutoff, "no source records inside the window");
        }

        let summaries = aggregator.finish();
        on_progress(&Progress::Transformed {
            rows: summaries.len(),
        });

        let loader = self.loader();
        let key = loader.write(&summaries, at).await?;
        on_progress(&Progress::Stored { key: key.clone() });

        let verification = if self.verify {
            Some(loader.verify(&key, &summaries).await?)
        } else {
            None
        };

        Ok(RunSummary {
            window: *window,
            objects,
            records,
            rows: summaries.len(),
            key,
            verification,
        })
    }
}
