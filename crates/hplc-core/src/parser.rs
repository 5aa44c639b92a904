//! Delimited-text parser for HPLC peak tables

use crate::decode::decode_text;
use crate::error::{Error, Result};
use crate::table::{Cell, Table};
use std::fs;
use std::path::Path;

/// Candidate delimiters, tried in this order; ties keep the earlier one
const DELIMITER_CANDIDATES: [char; 4] = ['\t', ',', ';', '|'];

/// Read and parse a peak-table file, auto-detecting the delimiter
///
/// Bytes are decoded UTF-8 first with a GB18030 / lossy fallback. The
/// table is named after the file name, which later feeds the File and
/// Sample/Replicate columns of the result table.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    let (text, _encoding) = decode_text(&bytes, &name);

    parse_table(&name, &text, None)
}

/// Parse delimited text into a Table
///
/// With `delimiter = None` the delimiter is detected from the header line
/// by quote-aware counting of tab, comma, semicolon, and pipe. Rows are
/// padded with empty cells or truncated to the header length, and every
/// cell (header included) goes through [`Cell::clean`].
pub fn parse_table(name: &str, text: &str, delimiter: Option<char>) -> Result<Table> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.len() < 2 {
        return Err(Error::EmptyTable {
            name: name.to_string(),
        });
    }

    let delimiter = match delimiter {
        Some(d) => d,
        None => detect_delimiter(name, lines[0])?,
    };

    let joined = lines.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(false)
        .flexible(true) // allow varying number of fields
        .from_reader(joined.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| Error::Csv {
            name: name.to_string(),
            source: e,
        })?;
        records.push(record);
    }

    if records.len() < 2 {
        return Err(Error::EmptyTable {
            name: name.to_string(),
        });
    }

    let columns: Vec<String> = records[0]
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            // BOM survives decoding as U+FEFF on the first header cell only
            let raw = if idx == 0 {
                raw.strip_prefix('\u{FEFF}').unwrap_or(raw)
            } else {
                raw
            };
            Cell::clean(raw).to_string()
        })
        .collect();

    if columns.len() < 3 {
        return Err(Error::ColumnCount {
            name: name.to_string(),
            found: columns.len(),
        });
    }

    let rows: Vec<Vec<Cell>> = records[1..]
        .iter()
        .map(|record| {
            (0..columns.len())
                .map(|idx| Cell::clean(record.get(idx).unwrap_or("")))
                .collect()
        })
        .collect();

    Ok(Table::new(name, columns, rows))
}

/// Detect the field delimiter from the header line
fn detect_delimiter(name: &str, header: &str) -> Result<char> {
    let mut best = DELIMITER_CANDIDATES[0];
    let mut best_count = 0;

    for candidate in DELIMITER_CANDIDATES {
        let count = count_delimiter(header, candidate);
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }

    if best_count == 0 {
        return Err(Error::DelimiterDetection {
            name: name.to_string(),
        });
    }

    Ok(best)
}

/// Count delimiter occurrences outside `"`-quoted spans
///
/// A doubled `""` inside a quoted span is a literal quote, not a span end.
fn count_delimiter(line: &str, delimiter: char) -> usize {
    let mut count = 0;
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                chars.next();
                continue;
            }
            in_quotes = !in_quotes;
            continue;
        }
        if c == delimiter && !in_quotes {
            count += 1;
        }
    }

    count
}
