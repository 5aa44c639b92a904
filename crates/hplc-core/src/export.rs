//! Result-table serialization and display summaries

use crate::table::{Cell, Table};
use serde::Serialize;
use std::collections::BTreeMap;

/// Identity/grouping columns of the result table, never treated as data
pub const GROUPING_COLUMNS: [&str; 4] = ["Standard", "Sample", "Replicate", "File"];

/// Serialize a table to delimited text
///
/// A cell is wrapped in double quotes, with internal quotes doubled, when
/// its string form contains the delimiter, a newline, or a quote. Lines
/// are joined with `\n` and there is no trailing newline.
pub fn to_delimited(table: &Table, delimiter: char) -> String {
    let sep = delimiter.to_string();
    let mut lines = Vec::with_capacity(table.rows.len() + 1);

    lines.push(
        table
            .columns
            .iter()
            .map(|label| escape_cell(label, delimiter))
            .collect::<Vec<_>>()
            .join(&sep),
    );

    for row in &table.rows {
        lines.push(
            row.iter()
                .map(|cell| escape_cell(&cell.to_string(), delimiter))
                .collect::<Vec<_>>()
                .join(&sep),
        );
    }

    lines.join("\n")
}

fn escape_cell(raw: &str, delimiter: char) -> String {
    let cell = raw.replace('"', "\"\"");
    if cell.contains(delimiter) || cell.contains('\n') || cell.contains('"') {
        format!("\"{}\"", cell)
    } else {
        cell
    }
}

/// Detect columns suitable for numeric charting/summarization
///
/// A column qualifies when it is not a grouping column, its label carries
/// no percent sign (half- or full-width), it has at least one non-empty
/// cell, and every non-empty cell is a finite number.
pub fn detect_numeric_columns(table: &Table) -> Vec<String> {
    let mut numeric = Vec::new();

    for (idx, label) in table.columns.iter().enumerate() {
        if GROUPING_COLUMNS.contains(&label.as_str()) {
            continue;
        }
        if label.contains('%') || label.contains('％') {
            continue;
        }

        let mut seen_value = false;
        let mut all_numeric = true;
        for row in &table.rows {
            match row.get(idx) {
                Some(cell) if cell.is_empty() => {}
                Some(Cell::Number(n)) if n.is_finite() => seen_value = true,
                _ => {
                    all_numeric = false;
                    break;
                }
            }
        }

        if seen_value && all_numeric {
            numeric.push(label.clone());
        }
    }

    numeric
}

/// Mean, sample standard deviation, and count of one group of values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Mean of the values, None for an empty group
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1 denominator), 0 when n <= 1
    pub std: f64,
    /// Number of values
    pub n: usize,
}

/// Summarize one group of values
pub fn summarize(values: &[f64]) -> Summary {
    if values.is_empty() {
        return Summary {
            mean: None,
            std: 0.0,
            n: 0,
        };
    }

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    if n == 1 {
        return Summary {
            mean: Some(mean),
            std: 0.0,
            n: 1,
        };
    }

    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    Summary {
        mean: Some(mean),
        std: variance.sqrt(),
        n,
    }
}

/// Summary of one (standard, sample) group for a chosen column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub standard: String,
    pub sample: String,
    pub summary: Summary,
}

/// Group result rows by (Standard, Sample) and summarize one column
///
/// Groups appear in first-encounter order. Non-finite cells contribute
/// nothing to their group. Returns an empty list when the table lacks the
/// requested column or the grouping columns.
pub fn summarize_column(table: &Table, column: &str) -> Vec<GroupSummary> {
    let Some(col_idx) = table.find_column(column) else {
        return Vec::new();
    };
    let (Some(std_idx), Some(sample_idx)) =
        (table.find_column("Standard"), table.find_column("Sample"))
    else {
        return Vec::new();
    };

    let mut order: Vec<(String, String)> = Vec::new();
    let mut groups: BTreeMap<(String, String), Vec<f64>> = BTreeMap::new();

    for row in &table.rows {
        let key = (row[std_idx].to_string(), row[sample_idx].to_string());
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        let values = groups.entry(key).or_default();
        if let Some(v) = row.get(col_idx).and_then(Cell::as_finite) {
            values.push(v);
        }
    }

    order
        .into_iter()
        .map(|key| {
            let summary = summarize(&groups[&key]);
            GroupSummary {
                standard: key.0,
                sample: key.1,
                summary,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_table;

    fn sample_table() -> Table {
        Table::new(
            "stddf",
            vec![
                "Standard".to_string(),
                "Sample".to_string(),
                "Replicate".to_string(),
                "File".to_string(),
                "RT".to_string(),
                "Area".to_string(),
            ],
            vec![
                vec![
                    Cell::Text("Caffeine".to_string()),
                    Cell::Text("liver".to_string()),
                    Cell::Number(1.0),
                    Cell::Text("liver-1.tsv".to_string()),
                    Cell::Number(5.05),
                    Cell::Number(1000.0),
                ],
                vec![
                    Cell::Text("Caffeine".to_string()),
                    Cell::Text("liver".to_string()),
                    Cell::Number(2.0),
                    Cell::Text("liver-2.tsv".to_string()),
                    Cell::Number(5.02),
                    Cell::Number(1200.0),
                ],
            ],
        )
    }

    #[test]
    fn test_to_delimited_plain() {
        let table = sample_table();
        let csv = to_delimited(&table, ',');
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines[0], "Standard,Sample,Replicate,File,RT,Area");
        assert_eq!(lines[1], "Caffeine,liver,1,liver-1.tsv,5.05,1000");
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_to_delimited_escaping() {
        let table = Table::new(
            "t",
            vec!["a,x".to_string(), "b\"y".to_string(), "c".to_string()],
            vec![vec![
                Cell::Text("1,2".to_string()),
                Cell::Text("say \"hi\"".to_string()),
                Cell::Number(3.0),
            ]],
        );
        let csv = to_delimited(&table, ',');
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines[0], "\"a,x\",\"b\"\"y\",c");
        assert_eq!(lines[1], "\"1,2\",\"say \"\"hi\"\"\",3");
    }

    #[test]
    fn test_round_trip_all_delimiters() {
        let table = Table::new(
            "t.csv",
            vec!["Name".to_string(), "RT".to_string(), "Area".to_string()],
            vec![
                vec![
                    Cell::Text("peak a".to_string()),
                    Cell::Number(5.05),
                    Cell::Number(1000.0),
                ],
                vec![
                    Cell::Text("b,c|d;e".to_string()),
                    Cell::Number(6.1),
                    Cell::Text("NA".to_string()),
                ],
            ],
        );

        for delimiter in [',', '\t', ';', '|'] {
            let text = to_delimited(&table, delimiter);
            let reparsed = parse_table("t.csv", &text, Some(delimiter)).unwrap();
            assert_eq!(reparsed.columns, table.columns, "delimiter {delimiter:?}");
            assert_eq!(reparsed.rows, table.rows, "delimiter {delimiter:?}");

            let again = to_delimited(&reparsed, delimiter);
            assert_eq!(again, text, "delimiter {delimiter:?}");
        }
    }

    #[test]
    fn test_detect_numeric_columns() {
        let table = sample_table();
        assert_eq!(detect_numeric_columns(&table), ["RT", "Area"]);
    }

    #[test]
    fn test_detect_numeric_excludes_text_cell() {
        let mut table = sample_table();
        table.rows[1][5] = Cell::Text("NA".to_string());
        assert_eq!(detect_numeric_columns(&table), ["RT"]);
    }

    #[test]
    fn test_detect_numeric_allows_gaps_but_not_all_empty() {
        let mut table = sample_table();
        // one empty cell leaves the column numeric
        table.rows[0][5] = Cell::Text(String::new());
        assert_eq!(detect_numeric_columns(&table), ["RT", "Area"]);

        // an all-empty column is not numeric
        table.rows[1][5] = Cell::Text(String::new());
        assert_eq!(detect_numeric_columns(&table), ["RT"]);
    }

    #[test]
    fn test_detect_numeric_excludes_percent_labels() {
        let mut table = sample_table();
        table.columns[5] = "Area%".to_string();
        assert_eq!(detect_numeric_columns(&table), ["RT"]);

        table.columns[5] = "Area％".to_string();
        assert_eq!(detect_numeric_columns(&table), ["RT"]);
    }

    #[test]
    fn test_detect_numeric_excludes_grouping_columns() {
        // Replicate is all-numeric but still excluded
        let table = sample_table();
        assert!(!detect_numeric_columns(&table).contains(&"Replicate".to_string()));
    }

    #[test]
    fn test_summarize_bessel() {
        let summary = summarize(&[2.0, 4.0, 6.0]);
        assert_eq!(summary.mean, Some(4.0));
        assert_eq!(summary.n, 3);
        assert!((summary.std - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_summarize_degenerate() {
        assert_eq!(
            summarize(&[]),
            Summary {
                mean: None,
                std: 0.0,
                n: 0
            }
        );
        assert_eq!(
            summarize(&[5.0]),
            Summary {
                mean: Some(5.0),
                std: 0.0,
                n: 1
            }
        );
    }

    #[test]
    fn test_summarize_column_groups() {
        let table = sample_table();
        let groups = summarize_column(&table, "Area");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].standard, "Caffeine");
        assert_eq!(groups[0].sample, "liver");
        assert_eq!(groups[0].summary.mean, Some(1100.0));
        assert_eq!(groups[0].summary.n, 2);
    }

    #[test]
    fn test_summarize_column_missing() {
        let table = sample_table();
        assert!(summarize_column(&table, "Height").is_empty());
    }
}
