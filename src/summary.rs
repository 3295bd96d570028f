//! # Descriptive statistics over normalized site rates
use serde::{Deserialize, Serialize};

use crate::io::bed::SampleSiteRate;

/// Summary of the `count` column of combined site rates. `std_dev` is the
/// sample standard deviation (n - 1 denominator) and needs at least two values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub n: usize,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub max: Option<f64>,
    pub samples: Vec<String>,
}

impl Summary {
    pub fn from_rows(rows: &[SampleSiteRate]) -> Self {
        let mut samples: Vec<String> = Vec::new();
        for row in rows {
            if !samples.contains(&row.sample_id) {
                samples.push(row.sample_id.clone());
            }
        }
        let counts: Vec<f64> = rows.iter().map(|r| r.count).collect();

        let n = counts.len();
        if n == 0 {
            return Self {
                n,
                mean: None,
                std_dev: None,
                max: None,
                samples,
            };
        }

        let mean = counts.iter().sum::<f64>() / n as f64;
        let std_dev = if n > 1 {
            let ss: f64 = counts.iter().map(|c| (c - mean).powi(2)).sum();
            Some((ss / (n - 1) as f64).sqrt())
        } else {
            None
        };
        let max = counts.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            n,
            mean: Some(mean),
            std_dev,
            max: Some(max),
            samples,
        }
    }
}
