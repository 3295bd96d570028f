//! # Genomic intervals
//!
//! [`GenomicInterval`] is the value type shared by sample breakpoints and AsiSI sites.
//! Coordinates are read as they appear in the input file and are treated as
//! inclusive on both ends by the containment test. Two intervals with the same
//! `chrom`, `start` and `end` are the same interval, which is what lets an
//! AsiSI site be used directly as a key when hits are tallied.
use std::fmt;

/// Whether containment also requires both intervals to sit on the same contig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContigPolicy {
    /// Sample and site must share `chrom`.
    #[default]
    SameContig,
    /// Compare coordinates only, whatever the contig.
    IgnoreContig,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenomicInterval {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
}

impl GenomicInterval {
    pub fn new(chrom: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
        }
    }
    /// Check if `other` lies entirely within `self`: both of its coordinates
    /// fall in `[self.start, self.end]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use asisite::region::{ContigPolicy, GenomicInterval};
    ///
    /// let site = GenomicInterval::new("chr1", 0, 20);
    /// assert!(site.contains(&GenomicInterval::new("chr1", 5, 10), ContigPolicy::SameContig));
    /// assert!(!site.contains(&GenomicInterval::new("chr1", 5, 25), ContigPolicy::SameContig));
    /// ```
    pub fn contains(&self, other: &GenomicInterval, policy: ContigPolicy) -> bool {
        if policy == ContigPolicy::SameContig && self.chrom != other.chrom {
            return false;
        }
        self.covers(other.start) && self.covers(other.end)
    }
    fn covers(&self, pos: u64) -> bool {
        self.start <= pos && pos <= self.end
    }
}

impl fmt::Display for GenomicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}
