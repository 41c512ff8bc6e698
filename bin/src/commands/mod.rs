//! Command implementations.

pub(crate) mod inspect;
pub(crate) mod reports;
pub(crate) mod run;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use xetra_lib::{EtlConfig, StoreConfig};

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "xetra.toml";

/// Loads the configuration, falling back to `xetra.toml` and then defaults.
pub(crate) fn load_config(path: Option<&Path>) -> Result<EtlConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !local.is_file() {
                return Ok(EtlConfig::default());
            }
            local
        }
    };

    tracing::debug!(path = %path.display(), "loading config");
    EtlConfig::from_file(&path).with_context(|| format!("Failed to load {}", path.display()))
}

/// Returns the configured target, or a local directory override.
pub(crate) fn target_store(config: &EtlConfig, dir: Option<PathBuf>) -> StoreConfig {
    dir.map_or_else(|| config.target.clone(), StoreConfig::local)
}
