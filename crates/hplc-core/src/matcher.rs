//! Standard matcher: adaptive retention-time search and stddf assembly
//!
//! For every (standard, file) pair the matcher looks for peak rows whose
//! retention time falls inside a window around the standard's target,
//! widening the window by 10% of the original tolerance per attempt until
//! something is captured, then keeps the row with the strongest signal.

use crate::error::{Error, Result};
use crate::sample::SampleMeta;
use crate::standards::Standards;
use crate::table::{Cell, Table};

/// Retention time is always the third base column, by position not name
pub const RT_COLUMN: usize = 2;

/// Widening attempts before a pair is declared unmatched
pub const MAX_WIDENING_ITERATIONS: usize = 200;

/// Match every standard against every file and assemble the stddf table
///
/// Result columns are `Standard, Sample, Replicate, File` followed by the
/// shared base columns of the input files. Rows are ordered by standard
/// (dictionary insertion order), then by file (supplied order). All input
/// tables must share an identical column signature.
pub fn compute_result(files: &[Table], standards: &Standards, rt_thr: f64) -> Result<Table> {
    if !rt_thr.is_finite() || rt_thr <= 0.0 {
        return Err(Error::InvalidTolerance(rt_thr));
    }
    if files.is_empty() {
        return Err(Error::EmptyInput);
    }
    if standards.is_empty() {
        return Err(Error::EmptyStandards);
    }

    let signature = files[0].signature();
    for file in files {
        if file.signature() != signature {
            return Err(Error::SignatureMismatch {
                name: file.name.clone(),
            });
        }
    }

    let mut columns = vec![
        "Standard".to_string(),
        "Sample".to_string(),
        "Replicate".to_string(),
        "File".to_string(),
    ];
    columns.extend(files[0].columns.iter().cloned());

    let mut rows = Vec::new();
    for (std_name, target_cell) in standards.iter() {
        let target = target_cell
            .as_finite()
            .ok_or_else(|| Error::NonNumericStandard {
                name: std_name.to_string(),
            })?;

        for file in files {
            let best = best_match(file, std_name, target, rt_thr)?;
            let meta = SampleMeta::from_file_name(&file.name);

            let mut row = Vec::with_capacity(columns.len());
            row.push(Cell::Text(std_name.to_string()));
            row.push(Cell::Text(meta.sample_id));
            row.push(match meta.replicate {
                Some(n) => Cell::Number(n),
                None => Cell::Text(String::new()),
            });
            row.push(Cell::Text(file.name.clone()));
            row.extend(best.iter().cloned());
            rows.push(row);
        }
    }

    Ok(Table::new("stddf", columns, rows))
}

/// Find the best-matching row of one file for one standard
fn best_match<'a>(
    file: &'a Table,
    standard: &str,
    target: f64,
    rt_thr: f64,
) -> Result<&'a [Cell]> {
    let mut sorted: Vec<&Vec<Cell>> = file.rows.iter().collect();
    sorted.sort_by(|a, b| rt_key(a).total_cmp(&rt_key(b)));

    let mut matched: Vec<&Vec<Cell>> = Vec::new();
    for iteration in 0..MAX_WIDENING_ITERATIONS {
        let tolerance = rt_thr * (1.0 + 0.1 * iteration as f64);
        matched = sorted
            .iter()
            .copied()
            .filter(|row| {
                row.get(RT_COLUMN)
                    .and_then(Cell::as_finite)
                    .is_some_and(|rt| rt >= target - tolerance && rt <= target + tolerance)
            })
            .collect();
        if !matched.is_empty() {
            break;
        }
    }

    if matched.is_empty() {
        return Err(Error::NoMatch {
            standard: standard.to_string(),
            file: file.name.clone(),
        });
    }

    // Max signal wins; ties keep the first row in post-sort order, and a
    // non-numeric signal compares as -infinity
    let signal_idx = file.columns.len() - 1;
    let mut best = matched[0];
    let mut best_signal = signal_value(best, signal_idx);
    for row in &matched[1..] {
        let signal = signal_value(row, signal_idx);
        if signal > best_signal {
            best_signal = signal;
            best = row;
        }
    }

    Ok(best)
}

/// Sort key: rows without a finite retention time sort last
fn rt_key(row: &[Cell]) -> f64 {
    row.get(RT_COLUMN)
        .and_then(Cell::as_finite)
        .unwrap_or(f64::INFINITY)
}

fn signal_value(row: &[Cell], idx: usize) -> f64 {
    row.get(idx)
        .and_then(Cell::as_finite)
        .unwrap_or(f64::NEG_INFINITY)
}
