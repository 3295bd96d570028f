//! # asisite
//!
//! This library backs the `asisite` binary, which measures how often breakpoints
//! in a sequencing sample fall within known AsiSI restriction sites.
//! Sample intervals are optionally filtered on mapping quality ([`run_filter`]),
//! attributed to the first AsiSI site that contains them, and counted per site.
//! Counts are normalized to hits per 1000 intervals of the sample so that samples
//! of different depth can be compared ([`run`]). Per-sample results can then be
//! combined into a single table with descriptive statistics ([`run_combine`]).
pub mod cli;
pub mod error;
pub mod intersect;
pub mod io;
pub mod normalize;
pub mod region;
pub mod summary;
pub mod utils;

use std::io::Write;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::{debug, info};

use crate::{
    intersect::SiteIndex,
    io::bed::{self, SampleSiteRate},
    region::{ContigPolicy, GenomicInterval},
    summary::Summary,
};

/// Normalized hit rate per AsiSI site for the sample intervals in `sample_bed`.
/// `total_count` and both input paths are validated before anything is read.
/// The result is ordered by the first hit on each site.
pub fn run(
    sample_bed: &str,
    asisi_bed: &str,
    total_count: i64,
    policy: ContigPolicy,
    index_sites: bool,
) -> Result<IndexMap<GenomicInterval, f64>> {
    normalize::validate_total(total_count)?;
    utils::open_input(sample_bed)?;
    utils::open_input(asisi_bed)?;

    let samples = bed::read_regions(sample_bed)?;
    let sites = bed::read_regions(asisi_bed)?;

    let hits = if index_sites {
        debug!("Indexing {} sites", sites.len());
        SiteIndex::new(&sites, policy).intersect(&samples)
    } else {
        intersect::intersect(&samples, &sites, policy)
    };
    info!(
        "Attributed {} of {} sample intervals to AsiSI sites",
        hits.len(),
        samples.len()
    );

    let rates = normalize::aggregate_and_normalize(&hits, total_count)?;
    info!("{} of {} AsiSI sites were hit", rates.len(), sites.len());
    Ok(rates)
}

/// Copy the lines of `input` with a mapping quality of at least `threshold` to `output`.
/// Returns the number of lines kept. `output` is only created if every line could be read.
pub fn run_filter(input: &str, output: &str, threshold: i64, column: usize) -> Result<usize> {
    let lines = io::filter::filter(input, threshold)?.with_column(column);

    let mut kept = 0;
    utils::write_atomically(output, |out| {
        let mut writer = std::io::BufWriter::new(out);
        for line in lines {
            let line = line?;
            writer.write_all(line.as_bytes())?;
            if !line.ends_with('\n') {
                writer.write_all(b"\n")?;
            }
            kept += 1;
        }
        writer.flush()?;
        Ok(())
    })
    .with_context(|| format!("Could not filter {input}"))?;

    info!("Kept {kept} records with mapping quality >= {threshold} from {input}");
    Ok(kept)
}

/// Read the per-sample results in `inputs` (pairs of sample name and path), label
/// every row with its sample and compute descriptive statistics over all rows.
pub fn run_combine(inputs: &[(String, String)]) -> Result<(Vec<SampleSiteRate>, Summary)> {
    let mut rows = Vec::new();
    for (sample_id, path) in inputs {
        let rates = bed::read_site_rates(path)?;
        debug!("{} sites for sample {sample_id}", rates.len());
        rows.extend(
            rates
                .into_iter()
                .map(|rate| SampleSiteRate::new(rate, sample_id)),
        );
    }

    let summary = Summary::from_rows(&rows);
    info!(
        "Combined {} rows from {} samples: mean {:?}, std dev {:?}, max {:?}",
        summary.n,
        inputs.len(),
        summary.mean,
        summary.std_dev,
        summary.max
    );
    Ok((rows, summary))
}
