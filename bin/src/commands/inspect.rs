//! Inspect command implementation.

use anyhow::{Context, Result};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use xetra_lib::prelude::*;

use super::{load_config, target_store};
use crate::display::{Format, write_rows};

/// Read a stored report back and print it.
pub(crate) async fn inspect(
    key: &str,
    config_path: Option<&Path>,
    target: Option<PathBuf>,
    format: Format,
) -> Result<()> {
    let config = load_config(config_path)?;
    let store = target_store(&config, target)
        .open()
        .context("Failed to open target store")?;

    let rows = Loader::new(store.as_ref())
        .read(key)
        .await
        .with_context(|| format!("Failed to read report {key}"))?;

    let mut out = BufWriter::new(std::io::stdout());
    write_rows(&rows, format, &mut out)?;
    out.flush()?;
    Ok(())
}
