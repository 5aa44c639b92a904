//! hplc-core: Core library for matching HPLC peak tables against standards
//!
//! This library provides functionality to:
//! - Parse delimited peak-table files into typed tables (auto-detected
//!   delimiter, encoding fallback for legacy exports)
//! - Load a standards dictionary (name -> expected retention time) from JSON
//! - Match each standard against each file with an adaptive retention-time
//!   tolerance, keeping the strongest-signal row
//! - Assemble the consolidated "stddf" result table and serialize it to
//!   CSV/TSV, with mean/SD summaries for display

pub mod decode;
pub mod error;
pub mod export;
pub mod matcher;
pub mod parser;
pub mod sample;
pub mod scanner;
pub mod standards;
pub mod table;

pub use decode::decode_text;
pub use error::{Error, Result};
pub use export::{
    detect_numeric_columns, summarize, summarize_column, to_delimited, GroupSummary, Summary,
};
pub use matcher::{compute_result, MAX_WIDENING_ITERATIONS, RT_COLUMN};
pub use parser::{parse_table, read_table};
pub use sample::SampleMeta;
pub use scanner::{discover_tables, is_peak_table};
pub use standards::Standards;
pub use table::{Cell, Table};
