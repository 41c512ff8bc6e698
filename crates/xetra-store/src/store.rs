//! Storage abstraction shared by the extractor and the loader.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use xetra_types::XetraError;

/// Errors that can occur while talking to an object store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The requested object does not exist.
    #[error("Object not found: {0}")]
    NotFound(String),

    /// The key cannot be mapped onto the store.
    #[error("Invalid object key '{0}'")]
    InvalidKey(String),

    /// Local filesystem error.
    #[error("I/O error on '{key}': {source}")]
    Io {
        /// The key or path being accessed.
        key: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Remote request failed.
    #[error("Request failed: {0}")]
    Request(String),
}

impl From<StoreError> for XetraError {
    fn from(err: StoreError) -> Self {
        Self::Store(err.to_string())
    }
}

/// A flat key/value bucket of immutable objects.
///
/// Keys use `/` as the segment separator regardless of backend.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug {
    /// Lists every key in the bucket in lexicographic order.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket cannot be listed.
    async fn list(&self) -> Result<Vec<String>, StoreError>;

    /// Reads the full body of an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is missing or cannot be read.
    async fn get(&self, key: &str) -> Result<Bytes, StoreError>;

    /// Stores an object, replacing any object with the same key.
    ///
    /// # Errors
    ///
    /// Returns an error if the object cannot be written.
    async fn put(&self, key: &str, body: Bytes) -> Result<(), StoreError>;

    /// Returns a human-readable location of the bucket.
    fn location(&self) -> String;
}

/// Checks that a key is relative and free of empty or parent segments.
///
/// # Errors
///
/// Returns [`StoreError::InvalidKey`] if the key is rejected.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let invalid = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");

    if invalid {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}
