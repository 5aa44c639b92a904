//! Sample metadata derived from peak-table file names
//!
//! File names like `liver-extract-2.tsv` carry a sample identifier and a
//! replicate index. The metadata only feeds the grouping columns of the
//! result table; matching itself never consults it.

use serde::{Deserialize, Serialize};

/// Sample identifier and replicate index parsed from a file name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleMeta {
    /// Sample identifier (file stem minus the replicate token)
    pub sample_id: String,
    /// Replicate index, when the final `-`-delimited token is numeric
    pub replicate: Option<f64>,
}

impl SampleMeta {
    /// Derive metadata from a file name
    ///
    /// The extension (last `.` and everything after, when non-empty) is
    /// stripped, the stem split on `-`. With fewer than two parts the whole
    /// stem is the sample id. Otherwise the last part becomes the replicate
    /// if it parses as a finite number, and the rest rejoin with `-`.
    pub fn from_file_name(file_name: &str) -> Self {
        let stem = match file_name.rfind('.') {
            Some(idx) if idx + 1 < file_name.len() => &file_name[..idx],
            _ => file_name,
        };

        let parts: Vec<&str> = stem.split('-').collect();
        if parts.len() < 2 {
            return Self {
                sample_id: stem.to_string(),
                replicate: None,
            };
        }

        let replicate = parts[parts.len() - 1]
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite());

        Self {
            sample_id: parts[..parts.len() - 1].join("-"),
            replicate,
        }
    }
}
