//! Core table types for representing peak-table data

use serde::{Deserialize, Serialize};

/// A parsed peak table from a single input file
///
/// Tables are immutable once parsed. Every row holds exactly
/// `columns.len()` cells; the parser pads or truncates to guarantee it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name (the source file name, or "stddf" for the result table)
    pub name: String,
    /// Column labels, in file order
    pub columns: Vec<String>,
    /// Row data, aligned positionally with `columns`
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create a new table
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find a column index by label
    pub fn find_column(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    /// Column signature used to check that input files share a schema
    pub fn signature(&self) -> String {
        self.columns.join("||")
    }
}

/// A cell value: either a number or text
///
/// Empty text is a valid value, distinct from a missing cell. Untagged
/// serde representation so JSON exports read as plain values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Numeric value
    Number(f64),
    /// Text value (possibly empty)
    Text(String),
}

impl Cell {
    /// Clean a raw field and coerce it to a typed cell
    ///
    /// Strips any leading/trailing `"` characters, trims whitespace, then
    /// coerces strings of the form `-?\d+(\.\d+)?` to numbers. Everything
    /// else stays text. Applied identically to header and data cells.
    pub fn clean(raw: &str) -> Self {
        let trimmed = raw.trim_matches('"').trim();

        if trimmed.is_empty() {
            return Cell::Text(String::new());
        }

        if is_plain_number(trimmed) {
            if let Ok(n) = trimmed.parse::<f64>() {
                return Cell::Number(n);
            }
        }

        Cell::Text(trimmed.to_string())
    }

    /// Read the cell as a finite number, if it is one
    ///
    /// Text cells that look like plain numbers are re-parsed, so a column
    /// that slipped through as text still compares numerically.
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Number(_) => None,
            Cell::Text(s) => {
                let trimmed = s.trim();
                if is_plain_number(trimmed) {
                    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
                } else {
                    None
                }
            }
        }
    }

    /// Check if the cell is empty text
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Text(s) if s.is_empty())
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Check for the exact shape `-?\d+(\.\d+)?`
///
/// Stricter than `f64::from_str`: no exponents, no `inf`/`nan`, no bare
/// leading or trailing decimal point.
fn is_plain_number(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    if unsigned.is_empty() {
        return false;
    }

    let mut parts = unsigned.splitn(2, '.');
    let int_part = parts.next().unwrap_or("");
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    match parts.next() {
        None => true,
        Some(frac) => !frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit()),
    }
}
