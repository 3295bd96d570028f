use std::{io, path::Path};

use anyhow::{Context, Result};
use csv::{QuoteStyle, Reader, ReaderBuilder, StringRecord, WriterBuilder};
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{error::RegionError, region::GenomicInterval, utils};

/// Normalized hit rate for one AsiSI site, as written by [`write_site_rates`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRate {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub count: f64,
}

/// A [`SiteRate`] labelled with the sample it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSiteRate {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub count: f64,
    pub sample_id: String,
}

impl SampleSiteRate {
    pub fn new(rate: SiteRate, sample_id: &str) -> Self {
        Self {
            chrom: rate.chrom,
            start: rate.start,
            end: rate.end,
            count: rate.count,
            sample_id: sample_id.into(),
        }
    }
}

/// Read the intervals in the bed file at `bed_path`, in file order.
/// Only the first three columns are used; any further columns are ignored.
pub fn read_regions<P: AsRef<Path>>(bed_path: P) -> Result<Vec<GenomicInterval>> {
    let bed_path = bed_path.as_ref();
    let file = utils::open_input(bed_path)?;
    let regions = parse_regions(file, &bed_path.display().to_string())?;

    info!("Read {} regions from {}", regions.len(), bed_path.display());
    Ok(regions)
}

/// Reader for headerless, tab-separated interval files. Quotes are plain text and
/// lines starting with `#` are comments, matching [`bed_writer`].
fn bed_reader<R: io::Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .from_reader(reader)
}

/// Writer for interval files that never quotes fields.
fn bed_writer<W: io::Write>(writer: W, has_headers: bool) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(has_headers)
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .from_writer(writer)
}

/// Parse tab-separated `chrom, start, end` records from `reader`. `source` names
/// the input in error messages. Lines that are empty or hold only whitespace, and
/// lines starting with `#`, are skipped.
pub fn parse_regions<R: io::Read>(reader: R, source: &str) -> Result<Vec<GenomicInterval>> {
    let mut bed_reader = bed_reader(reader);

    let mut regions = Vec::new();
    for result in bed_reader.records() {
        let record = result.with_context(|| format!("Failed to read bed record in {source}"))?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        regions.push(region_from_record(&record, source)?);
    }

    Ok(regions)
}

fn region_from_record(record: &StringRecord, source: &str) -> Result<GenomicInterval> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    let malformed = |reason: String| RegionError::MalformedRecord {
        file: source.to_string(),
        line,
        reason,
    };

    let field = |idx: usize, name: &str| {
        record
            .get(idx)
            .filter(|f| !f.trim().is_empty())
            .ok_or_else(|| malformed(format!("missing {name} field")))
    };
    let coordinate = |idx: usize, name: &str| -> Result<u64, RegionError> {
        let value = field(idx, name)?;
        value
            .trim()
            .parse::<u64>()
            .map_err(|_| malformed(format!("{name} '{value}' is not a non-negative integer")))
    };

    let chrom = field(0, "chrom")?;
    let start = coordinate(1, "start")?;
    let end = coordinate(2, "end")?;
    let region = GenomicInterval::new(chrom, start, end);
    if end < start {
        debug!("{source}:{line}: region {region} ends before it starts");
    }

    Ok(region)
}

/// Write one `chrom, start, end, count` line per site, in the iteration order of `rates`.
pub fn write_site_rates<W: io::Write>(
    writer: W,
    rates: &IndexMap<GenomicInterval, f64>,
) -> Result<()> {
    let mut bed_writer = bed_writer(writer, false);

    for (site, count) in rates {
        bed_writer.serialize(SiteRate {
            chrom: site.chrom.clone(),
            start: site.start,
            end: site.end,
            count: *count,
        })?;
    }
    bed_writer.flush()?;
    Ok(())
}

/// Same as [`write_site_rates`], but the file at `path` only appears once every
/// record has been written.
pub fn write_site_rates_to_path<P: AsRef<Path>>(
    path: P,
    rates: &IndexMap<GenomicInterval, f64>,
) -> Result<()> {
    let path = path.as_ref();
    utils::write_atomically(path, |file| write_site_rates(file, rates))?;
    info!("Wrote {} site rates to {}", rates.len(), path.display());
    Ok(())
}

/// Read a file written by [`write_site_rates`].
pub fn read_site_rates<P: AsRef<Path>>(path: P) -> Result<Vec<SiteRate>> {
    let path = path.as_ref();
    let file = utils::open_input(path)?;
    let mut bed_reader = bed_reader(file);

    let mut rates = Vec::new();
    for result in bed_reader.deserialize() {
        let rate: SiteRate = result
            .with_context(|| format!("Failed to deserialize site rate in {}", path.display()))?;
        rates.push(rate);
    }

    debug!("Read {} site rates from {}", rates.len(), path.display());
    Ok(rates)
}

/// Write rates of several samples as one table, with a header line.
pub fn write_combined<W: io::Write>(writer: W, rows: &[SampleSiteRate]) -> Result<()> {
    let mut tsv_writer = bed_writer(writer, true);

    if rows.is_empty() {
        // header is normally derived from the first serialized row
        tsv_writer.write_record(["chrom", "start", "end", "count", "sample_id"])?;
    }
    for row in rows {
        tsv_writer.serialize(row)?;
    }
    tsv_writer.flush()?;
    Ok(())
}
