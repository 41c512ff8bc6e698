//! Object store backends for the xetra daily report ETL.
//!
//! Every stage talks to storage through the [`ObjectStore`] trait:
//!
//! - [`LocalStore`] - A directory on the local filesystem acting as a bucket
//! - [`MemoryStore`] - An in-process bucket, used for dry runs and tests
//! - [`S3Store`] - An S3 (or S3-compatible) bucket

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/xetra/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod local;
mod memory;
#[cfg(feature = "s3")]
mod s3;
mod store;

pub use local::LocalStore;
pub use memory::MemoryStore;
#[cfg(feature = "s3")]
pub use s3::{S3Config, S3Store};
pub use store::{ObjectStore, StoreError, validate_key};
