//! Daily Xetra trading report ETL.
//!
//! This is a facade crate that re-exports functionality from the xetra
//! workspace crates and wires the stages into an [`EtlPipeline`].
//!
//! # Quick Start
//!
//! ```ignore
//! use xetra_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EtlConfig::from_file("xetra.toml".as_ref())?;
//!     let pipeline = EtlPipeline::from_config(&config)?;
//!
//!     let window: ExtractionWindow = "2022-12-25".parse()?;
//!     let summary = pipeline.run(&window).await?;
//!     println!("Wrote {} rows to {}", summary.rows, summary.key);
//!
//!     Ok(())
//! }
//! ```

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/xetra/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod pipeline;

pub use config::{ConfigError, EtlConfig, StoreConfig};
pub use pipeline::{EtlPipeline, Progress, RunSummary};

// Re-export core types
pub use xetra_types::*;

// Re-export storage backends
pub use xetra_store::{LocalStore, MemoryStore, ObjectStore, StoreError};

#[cfg(feature = "s3")]
pub use xetra_store::{S3Config, S3Store};

// Re-export stages
pub use xetra_extract::{
    Column, ExtractError, Extraction, Extractor, NullCounts, SourceBatch, SourceSchema,
    decode_records,
};
pub use xetra_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, ParquetFormatter, read_summaries,
};
pub use xetra_load::{DEFAULT_REPORT_PREFIX, LoadError, Loader, ReportKey, Verification};
pub use xetra_transform::{DailyAggregator, summarize};

/// Prelude module for convenient imports.
///
/// ```
/// use xetra_lib::prelude::*;
/// ```
pub mod prelude {
    pub use xetra_types::{DailySummary, ExtractionWindow, Result, TickRecord, XetraError};

    pub use xetra_store::{LocalStore, MemoryStore, ObjectStore};

    pub use xetra_format::{CsvFormatter, Formatter, JsonFormatter, ParquetFormatter};

    pub use xetra_load::{Loader, ReportKey, Verification};

    pub use xetra_transform::{DailyAggregator, summarize};

    pub use crate::{EtlConfig, EtlPipeline, Progress, RunSummary, StoreConfig};
}
