//! # Error kinds
//!
//! Typed failures that callers may want to tell apart. They are carried inside
//! [`anyhow::Error`] like every other error in this crate, and can be recovered
//! with `downcast_ref`.
use std::{error::Error, fmt, path::PathBuf};

/// A record in an interval file could not be read as `chrom, start, end`
/// (or, for the quality filter, its quality field could not be read).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionError {
    MalformedRecord {
        file: String,
        line: u64,
        reason: String,
    },
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionError::MalformedRecord {
                file,
                line,
                reason,
            } => write!(f, "malformed record at {file}:{line}: {reason}"),
        }
    }
}

impl Error for RegionError {}

/// Inputs rejected before any processing starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NonPositiveTotal(i64),
    UnreadableInput { path: PathBuf, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NonPositiveTotal(total) => {
                write!(f, "total interval count must be positive, got {total}")
            }
            ValidationError::UnreadableInput { path, reason } => {
                write!(f, "could not read input {}: {reason}", path.display())
            }
        }
    }
}

impl Error for ValidationError {}
