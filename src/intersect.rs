//! # Intersecting sample intervals with AsiSI sites
//!
//! Every sample interval is attributed to at most one site: the first site, in
//! file order, that contains it. Samples that fall in no site are dropped.
//! [`intersect`] does this with a plain scan over all sites. [`SiteIndex`] gives
//! the same answer from sites sorted by start, which pays off once the site set
//! grows beyond a few thousand entries.
use std::collections::HashMap;

use log::{debug, trace};

use crate::region::{ContigPolicy, GenomicInterval};

/// A sample interval together with the site it was attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit<'a> {
    pub sample: &'a GenomicInterval,
    pub site: &'a GenomicInterval,
}

/// Attribute each interval in `samples` to the first interval in `sites`
/// that contains it. Hits are returned in sample order.
pub fn intersect<'a>(
    samples: &'a [GenomicInterval],
    sites: &'a [GenomicInterval],
    policy: ContigPolicy,
) -> Vec<Hit<'a>> {
    let hits: Vec<Hit> = samples
        .iter()
        .filter_map(|sample| {
            sites
                .iter()
                .find(|site| site.contains(sample, policy))
                .map(|site| {
                    trace!("{sample} falls within site {site}");
                    Hit { sample, site }
                })
        })
        .collect();

    debug!(
        "{} of {} sample intervals fall within one of {} sites",
        hits.len(),
        samples.len(),
        sites.len()
    );
    hits
}

#[derive(Debug, Clone, Copy)]
struct IndexEntry {
    start: u64,
    end: u64,
    // position of the site in the input, first match is the lowest one
    order: usize,
}

/// Sites grouped per contig and sorted by start coordinate.
///
/// Lookups only visit sites whose start lies at or before the sample, and
/// resolve ties to the site that came first in the input, so
/// [`SiteIndex::intersect`] returns exactly what [`intersect`] returns.
pub struct SiteIndex<'a> {
    sites: &'a [GenomicInterval],
    policy: ContigPolicy,
    groups: HashMap<Option<&'a str>, Vec<IndexEntry>>,
}

impl<'a> SiteIndex<'a> {
    pub fn new(sites: &'a [GenomicInterval], policy: ContigPolicy) -> Self {
        let mut groups: HashMap<Option<&'a str>, Vec<IndexEntry>> = HashMap::new();
        for (order, site) in sites.iter().enumerate() {
            groups
                .entry(Self::group_key(site, policy))
                .or_default()
                .push(IndexEntry {
                    start: site.start,
                    end: site.end,
                    order,
                });
        }
        for entries in groups.values_mut() {
            // stable sort keeps input order among sites with equal starts
            entries.sort_by_key(|e| e.start);
        }

        Self {
            sites,
            policy,
            groups,
        }
    }
    fn group_key(interval: &'a GenomicInterval, policy: ContigPolicy) -> Option<&'a str> {
        match policy {
            ContigPolicy::SameContig => Some(interval.chrom.as_str()),
            ContigPolicy::IgnoreContig => None,
        }
    }
    /// Find the first site, in input order, that contains `sample`.
    pub fn find(&self, sample: &GenomicInterval) -> Option<&'a GenomicInterval> {
        let key = match self.policy {
            ContigPolicy::SameContig => Some(sample.chrom.as_str()),
            ContigPolicy::IgnoreContig => None,
        };
        let entries = self.groups.get(&key)?;

        // Containment only depends on the outermost sample coordinates, which also
        // covers records where end < start.
        let lo = sample.start.min(sample.end);
        let hi = sample.start.max(sample.end);
        let candidates = entries.partition_point(|e| e.start <= lo);

        let sites: &'a [GenomicInterval] = self.sites;
        entries[..candidates]
            .iter()
            .filter(|e| e.end >= hi)
            .map(|e| e.order)
            .min()
            .map(|order| &sites[order])
    }
    pub fn intersect(&self, samples: &'a [GenomicInterval]) -> Vec<Hit<'a>> {
        samples
            .iter()
            .filter_map(|sample| self.find(sample).map(|site| Hit { sample, site }))
            .collect()
    }
}
