//! # Input and output
//!
//! Interval files are read and written as headerless, tab-separated text
//! ([`bed`]). Raw records can be thresholded on their mapping quality before
//! they are used ([`filter`]), and summaries of combined results are written
//! as json ([`json`]).
pub mod bed;
pub mod filter;
pub mod json;
