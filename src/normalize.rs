//! # Tallying and normalizing hits per AsiSI site
//!
//! Hits are tallied per site and then rescaled to hits per 1000 intervals of
//! the sample, so that samples sequenced to different depths can be compared.
//! Both mappings keep the order in which sites were first hit; no other
//! ordering is guaranteed.
use anyhow::Result;
use indexmap::IndexMap;
use log::debug;

use crate::{error::ValidationError, intersect::Hit, region::GenomicInterval};

/// Number of intervals the normalized rate is expressed against.
pub const RATE_SCALE: f64 = 1000.0;

/// Count how many sample intervals were attributed to each site.
/// Sites without hits do not appear in the result.
pub fn aggregate(hits: &[Hit]) -> IndexMap<GenomicInterval, u64> {
    hits.iter()
        .fold(IndexMap::new(), |mut counts: IndexMap<GenomicInterval, u64>, hit| {
            *counts.entry(hit.site.clone()).or_insert(0) += 1;
            counts
        })
}

/// Check that `total_count` can be used as a denominator.
pub fn validate_total(total_count: i64) -> Result<u64> {
    if total_count <= 0 {
        return Err(ValidationError::NonPositiveTotal(total_count).into());
    }
    Ok(total_count as u64)
}

/// Rescale each count to `count / (total_count / 1000)`.
///
/// # Examples
///
/// ```
/// use asisite::{normalize::normalize, region::GenomicInterval};
/// use indexmap::IndexMap;
///
/// let mut counts = IndexMap::new();
/// counts.insert(GenomicInterval::new("chr1", 0, 20), 5);
/// let rates = normalize(&counts, 2000).unwrap();
/// assert_eq!(Some(&2.5), rates.get(&GenomicInterval::new("chr1", 0, 20)));
/// ```
pub fn normalize(
    counts: &IndexMap<GenomicInterval, u64>,
    total_count: i64,
) -> Result<IndexMap<GenomicInterval, f64>> {
    let total = validate_total(total_count)? as f64;
    let per_scale = total / RATE_SCALE;
    debug!("Normalizing {} site counts against {total_count} intervals", counts.len());

    Ok(counts
        .iter()
        .map(|(site, count)| (site.clone(), *count as f64 / per_scale))
        .collect())
}

pub fn aggregate_and_normalize(
    hits: &[Hit],
    total_count: i64,
) -> Result<IndexMap<GenomicInterval, f64>> {
    // reject a bad total before doing any work
    validate_total(total_count)?;
    normalize(&aggregate(hits), total_count)
}
