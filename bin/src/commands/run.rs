//! Run command implementation.
//!
//! This module runs the daily report job and shows progress over the source objects.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use xetra_lib::prelude::*;

use super::{load_config, target_store};

/// Command-line overrides for a run.
#[derive(Debug, Default)]
pub(crate) struct RunOptions {
    pub(crate) source: Option<PathBuf>,
    pub(crate) target: Option<PathBuf>,
    pub(crate) prefix: Option<String>,
    pub(crate) verify: bool,
}

/// Extract, aggregate and store the report for a reference date.
pub(crate) async fn run(
    date: &str,
    config_path: Option<&Path>,
    options: RunOptions,
    quiet: bool,
) -> Result<()> {
    let window: ExtractionWindow = date
        .parse()
        .with_context(|| format!("Invalid reference date: {date}"))?;

    let mut config = load_config(config_path)?;
    if let Some(dir) = options.source {
        config.source = StoreConfig::local(dir);
    }
    config.target = target_store(&config, options.target);
    if let Some(prefix) = options.prefix {
        config.report_prefix = prefix;
    }
    config.verify = config.verify && options.verify;

    let pipeline = EtlPipeline::from_config(&config).context("Failed to open stores")?;

    // Setup progress bar
    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} objects ({percent}%) {msg}")?
                .progress_chars("=>-"),
        );
        pb.set_message(window.to_string());
        pb
    };

    let summary = pipeline
        .run_with_progress(&window, |event| match event {
            Progress::Planned { objects } => progress.set_length(*objects as u64),
            Progress::Extracted { key, .. } => {
                progress.inc(1);
                progress.set_message(key.clone());
            }
            Progress::Transformed { rows } => {
                progress.set_message(format!("aggregated {rows} rows"));
            }
            Progress::Stored { key } => progress.set_message(format!("stored {key}")),
        })
        .await;

    let summary = match summary {
        Ok(summary) => summary,
        Err(e) => {
            progress.abandon_with_message("failed");
            return Err(e).with_context(|| format!("Report run for {date} failed"));
        }
    };

    progress.finish_with_message(format!(
        "Read {} records from {} objects",
        summary.records, summary.objects
    ));

    if let Some(verification) = summary.verification.as_ref().filter(|v| !v.is_match()) {
        eprintln!(
            "Warning: stored report differs from the computed table ({} stored rows, {} expected, first mismatch at {:?})",
            verification.stored_rows, verification.expected_rows, verification.first_mismatch
        );
    }

    if !quiet {
        println!(
            "Wrote {} rows to {}/{}",
            summary.rows,
            pipeline.target().location(),
            summary.key
        );
    } else {
        println!("{}", summary.key);
    }

    Ok(())
}
