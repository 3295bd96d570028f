//! # Mapping quality filter
//!
//! Raw breakpoint records carry a mapping quality in a fixed column (the fifth
//! one by default). [`QualityFilter`] walks such a file line by line and yields
//! the lines whose quality is at least the threshold, unchanged. It reads
//! lazily, can only be consumed once, and stops after the first error.
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};

use crate::{error::RegionError, utils};

/// Default 0-based column holding the mapping quality.
pub const DEFAULT_MAPQ_COLUMN: usize = 4;
pub const DEFAULT_MAPQ_THRESHOLD: i64 = 30;

/// Lines of `reader` with a mapping quality of at least `threshold`.
pub struct QualityFilter<R> {
    reader: R,
    source: String,
    threshold: i64,
    column: usize,
    line: u64,
    done: bool,
}

/// Open the file at `path` and filter it on the default quality column.
pub fn filter<P: AsRef<Path>>(path: P, threshold: i64) -> Result<QualityFilter<BufReader<File>>> {
    let path = path.as_ref();
    let file = utils::open_input(path)?;
    Ok(QualityFilter::new(
        BufReader::new(file),
        &path.display().to_string(),
        threshold,
    ))
}

impl<R: BufRead> QualityFilter<R> {
    pub fn new(reader: R, source: &str, threshold: i64) -> Self {
        Self {
            reader,
            source: source.into(),
            threshold,
            column: DEFAULT_MAPQ_COLUMN,
            line: 0,
            done: false,
        }
    }
    pub fn with_column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }
    fn passes(&self, content: &str) -> Result<bool, RegionError> {
        let malformed = |reason: String| RegionError::MalformedRecord {
            file: self.source.clone(),
            line: self.line,
            reason,
        };
        let field = content
            .split('\t')
            .nth(self.column)
            .ok_or_else(|| malformed(format!("no quality field in column {}", self.column)))?;
        let quality: i64 = field
            .trim()
            .parse()
            .map_err(|_| malformed(format!("quality '{field}' is not an integer")))?;

        Ok(quality >= self.threshold)
    }
}

impl<R: BufRead> Iterator for QualityFilter<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let mut buf = String::new();
            let n = match self
                .reader
                .read_line(&mut buf)
                .with_context(|| format!("Failed to read line from {}", self.source))
            {
                Ok(n) => n,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };
            if n == 0 {
                self.done = true;
                return None;
            }
            self.line += 1;

            let content = buf.trim_end_matches(['\n', '\r']);
            if content.trim().is_empty() {
                continue;
            }
            match self.passes(content) {
                Ok(true) => return Some(Ok(buf)),
                Ok(false) => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}
