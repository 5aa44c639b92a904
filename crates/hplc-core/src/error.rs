//! Error types for hplc-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in hplc-core
///
/// Every error aborts the run it occurs in; the caller reports the first
/// error verbatim and commits no partial result.
#[derive(Debug, Error)]
pub enum Error {
    /// No peak-table files were supplied
    #[error("no input files were provided")]
    EmptyInput,

    /// Retention-time tolerance is not usable
    #[error("rt_thr must be a positive finite number, got {0}")]
    InvalidTolerance(f64),

    /// Input file has fewer than two non-blank lines
    #[error("input file '{name}' has no data rows")]
    EmptyTable { name: String },

    /// No candidate delimiter appears in the header line
    #[error("unable to detect delimiter in '{name}' (tab, comma, semicolon, or pipe)")]
    DelimiterDetection { name: String },

    /// Header has too few columns for the positional contract
    #[error("input file '{name}' needs at least 3 columns, found {found}")]
    ColumnCount { name: String, found: usize },

    /// Input files do not share identical column headers
    #[error("input file '{name}' does not share the column headers of the first file")]
    SignatureMismatch { name: String },

    /// Standards input is not a flat name -> retention-time mapping
    #[error("standards JSON must be a dictionary of name -> retention time: {0}")]
    StandardsFormat(String),

    /// Standards dictionary has no entries
    #[error("standards dictionary has no entries")]
    EmptyStandards,

    /// A standard's target does not coerce to a finite number
    #[error("standard '{name}' has non-numeric retention time")]
    NonNumericStandard { name: String },

    /// Adaptive widening exhausted without capturing a row
    #[error("no match found for standard '{standard}' in file '{file}'")]
    NoMatch { standard: String, file: String },

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error from the csv crate
    #[error("CSV error in '{name}': {source}")]
    Csv {
        name: String,
        #[source]
        source: csv::Error,
    },

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
