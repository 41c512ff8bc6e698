//! Reports command implementation.
//!
//! This module lists the daily reports stored in the target.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use xetra_lib::prelude::*;

use super::{load_config, target_store};

/// List stored reports, oldest first.
pub(crate) async fn list_reports(config_path: Option<&Path>, target: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    let store = target_store(&config, target)
        .open()
        .context("Failed to open target store")?;
    let loader = Loader::new(store.as_ref()).with_prefix(config.report_prefix.clone());

    let reports = loader
        .reports()
        .await
        .with_context(|| format!("Failed to list {}", store.location()))?;

    if reports.is_empty() {
        println!("No reports found in {}.", store.location());
        return Ok(());
    }

    println!("{:<50} {:<20}", "KEY", "WRITTEN");
    println!("{}", "-".repeat(71));

    for key in &reports {
        let written = key
            .timestamp(loader.prefix())
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        println!("{:<50} {:<20}", key, written);
    }

    println!("\nTotal: {} reports", reports.len());
    Ok(())
}
