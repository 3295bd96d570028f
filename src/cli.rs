//! # Command line interface for `asisite`
use crate::{io::filter, region::ContigPolicy, utils};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::warn;

#[derive(Parser)]
#[command(
    name="asisite",
    author,
    version,
    about="Normalized breakpoint counts at AsiSI cut sites",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Keep records whose mapping quality is at or above a threshold
    Filter {
        /// Input file with one record per line. Expected format is BED3+, with mapping quality in `--column`
        #[arg(short, long)]
        input: String,

        /// Output file for records passing the filter
        #[arg(short, long)]
        output: String,

        /// Minimum mapping quality to keep a record (inclusive)
        #[arg(short = 'm', long, default_value_t = filter::DEFAULT_MAPQ_THRESHOLD, value_parser = threshold_in_range)]
        mapq_threshold: i64,

        /// 0-based column holding the mapping quality
        #[arg(long, default_value_t = filter::DEFAULT_MAPQ_COLUMN)]
        column: usize,
    },
    /// Count sample intervals per AsiSI site, normalized per 1000 intervals
    Intersect {
        /// Sample intervals, typically the output of `asisite filter`. Expected format is BED3+
        #[arg(short, long)]
        sample_bed: String,

        /// AsiSI sites. Expected format is BED3+
        #[arg(short, long)]
        asisi_bed: String,

        /// Total number of intervals in the unfiltered sample, used as the normalization denominator
        #[arg(short, long, allow_negative_numbers = true)]
        total_count: i64,

        /// Output file for normalized counts per site (chrom, start, end, count)
        #[arg(short, long)]
        output: String,

        /// Match sample intervals to sites on any contig, comparing coordinates only
        #[arg(long)]
        ignore_contig: bool,

        /// Look up sites in a sorted index instead of scanning all of them for every interval
        #[arg(long)]
        index_sites: bool,
    },
    /// Combine normalized counts of several samples into one table
    Combine {
        /// Output files of `asisite intersect`, one per sample
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<String>,

        /// Sample names, in the same order as `--input`. Inferred from file names if not given
        #[arg(long, num_args = 1..)]
        sample_id: Vec<String>,

        /// Output table (tab-separated, with header)
        #[arg(short, long)]
        output: String,

        /// Write descriptive statistics of the combined counts to this file. Format is JSON
        #[arg(long)]
        summary: Option<String>,
    },
}

impl Commands {
    pub fn contig_policy(&self) -> ContigPolicy {
        match self {
            Commands::Intersect {
                ignore_contig: true,
                ..
            } => ContigPolicy::IgnoreContig,
            _ => ContigPolicy::SameContig,
        }
    }
    /// Pair each `combine` input with a sample name.
    pub fn get_sample_ids(&self) -> Result<Vec<(String, String)>> {
        match self {
            Commands::Combine {
                input, sample_id, ..
            } => {
                if sample_id.is_empty() {
                    input
                        .iter()
                        .map(|path| -> Result<(String, String)> {
                            let name = utils::sample_name_from_path(path)?;
                            warn!("No sample name given for {path}. Using inferred sample name: {name}");
                            Ok((name, path.clone()))
                        })
                        .collect()
                } else if sample_id.len() != input.len() {
                    bail!(
                        "Got {} sample names for {} input files",
                        sample_id.len(),
                        input.len()
                    )
                } else {
                    Ok(sample_id.iter().cloned().zip(input.iter().cloned()).collect())
                }
            }
            _ => bail!("Sample names are only used by the combine subcommand"),
        }
    }
}

fn threshold_in_range(s: &str) -> Result<i64> {
    let threshold = s
        .parse()
        .context("Could not parse value passed to --mapq-threshold to integer")?;
    if threshold < 0 {
        bail!("--mapq-threshold must be at least 0");
    }
    Ok(threshold)
}
