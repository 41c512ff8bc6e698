//! ETL configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use xetra_load::DEFAULT_REPORT_PREFIX;
use xetra_store::{LocalStore, ObjectStore, StoreError};
use xetra_types::XetraError;

#[cfg(feature = "s3")]
use xetra_store::{S3Config, S3Store};

/// Errors that can occur while loading configuration or opening stores.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file cannot be read.
    #[error("Failed to read config '{}': {source}", path.display())]
    Read {
        /// Path of the configuration file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for [`EtlConfig`].
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration cannot be rendered as TOML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A configured store cannot be opened.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ConfigError> for XetraError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Store(e) => e.into(),
            other => Self::Config(other.to_string()),
        }
    }
}

/// Location of a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    /// A directory on the local filesystem.
    Local {
        /// Directory acting as the bucket root.
        root: PathBuf,
    },
    /// An S3 or S3-compatible bucket.
    #[cfg(feature = "s3")]
    S3(S3Config),
}

impl StoreConfig {
    /// Creates a local directory store config.
    #[must_use]
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self::Local { root: root.into() }
    }

    /// Opens the configured store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store client cannot be created.
    pub fn open(&self) -> Result<Box<dyn ObjectStore>, ConfigError> {
        match self {
            Self::Local { root } => Ok(Box::new(LocalStore::new(root.clone()))),
            #[cfg(feature = "s3")]
            Self::S3(config) => Ok(Box::new(S3Store::new(config)?)),
        }
    }
}

/// Configuration of one ETL run.
///
/// ```toml
/// report_prefix = "xetra_daily_report"
/// verify = true
///
/// [source]
/// kind = "s3"
/// bucket = "xetra-source"
/// region = "eu-central-1"
///
/// [target]
/// kind = "local"
/// root = "./data/target"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtlConfig {
    /// Bucket holding the per-day source CSV objects.
    pub source: StoreConfig,
    /// Bucket receiving the Parquet reports.
    pub target: StoreConfig,
    /// Prefix of report keys.
    pub report_prefix: String,
    /// Whether to read the stored report back and compare it.
    pub verify: bool,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            source: StoreConfig::local("data/source"),
            target: StoreConfig::local("data/target"),
            report_prefix: DEFAULT_REPORT_PREFIX.to_string(),
            verify: true,
        }
    }
}

impl EtlConfig {
    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parses a configuration from TOML. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Sets the source store.
    #[must_use]
    pub fn with_source(mut self, source: StoreConfig) -> Self {
        self.source = source;
        self
    }

    /// Sets the target store.
    #[must_use]
    pub fn with_target(mut self, target: StoreConfig) -> Self {
        self.target = target;
        self
    }

    /// Sets the report key prefix.
    #[must_use]
    pub fn with_report_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.report_prefix = prefix.into();
        self
    }

    /// Sets whether the stored report is verified.
    #[must_use]
    pub const fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}
