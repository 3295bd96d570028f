use std::{io, path::Path};

use anyhow::{Context, Result};

use crate::{summary::Summary, utils};

/// Write `summary` as pretty-printed json, e.g.:
/// `
/// {
///     "n": 4,
///     "mean": 1.25,
///     "std_dev": 0.5,
///     "max": 2.0,
///     "samples": ["sample_01", "sample_02"]
/// }
/// `
pub fn write_summary<W: io::Write>(writer: W, summary: &Summary) -> Result<()> {
    serde_json::to_writer_pretty(writer, summary).context("Could not serialize summary")?;
    Ok(())
}

pub fn write_summary_to_path<P: AsRef<Path>>(path: P, summary: &Summary) -> Result<()> {
    let path = path.as_ref();
    utils::write_atomically(path, |file| write_summary(file, summary))
        .with_context(|| format!("Could not write json {}", path.display()))
}
