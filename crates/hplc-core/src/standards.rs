//! Standards dictionary: named compounds and their expected retention times
//!
//! Loaded from a flat JSON object `{ "Caffeine": 5.0, "Theobromine": "3.2" }`.
//! Entry order is preserved (serde_json's preserve_order feature) because
//! result rows are emitted in dictionary order.

use crate::decode::decode_text;
use crate::error::{Error, Result};
use crate::table::Cell;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Ordered mapping from standard name to target retention time
///
/// Values are kept as cells: JSON numbers stay numbers, numeric strings
/// coerce through [`Cell::clean`]. Whether a value is actually a finite
/// number is checked by the matcher, which can then name the offending
/// standard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Standards {
    entries: Vec<(String, Cell)>,
}

impl Standards {
    /// Load a standards dictionary from a JSON file
    ///
    /// Bytes go through the same encoding fallback as peak tables.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let (text, _encoding) = decode_text(&bytes, &path.to_string_lossy());
        Self::from_json_str(&text)
    }

    /// Parse a standards dictionary from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(Error::StandardsFormat(format!(
                    "expected an object, got {}",
                    json_type_name(&other)
                )))
            }
        };

        let mut entries = Vec::with_capacity(map.len());
        for (name, value) in map {
            let cell = match value {
                Value::Number(n) => Cell::Number(n.as_f64().unwrap_or(f64::NAN)),
                Value::String(s) => Cell::clean(&s),
                other => {
                    return Err(Error::StandardsFormat(format!(
                        "value for '{}' is {}, expected a number",
                        name,
                        json_type_name(&other)
                    )))
                }
            };
            entries.push((name, cell));
        }

        Ok(Self { entries })
    }

    /// Number of standards
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the dictionary has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.entries.iter().map(|(name, cell)| (name.as_str(), cell))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_and_numeric_strings() {
        let standards = Standards::from_json_str(r#"{"Caffeine": 5.0, "Theobromine": "3.2"}"#)
            .unwrap();
        assert_eq!(standards.len(), 2);

        let entries: Vec<_> = standards.iter().collect();
        assert_eq!(entries[0].0, "Caffeine");
        assert_eq!(entries[0].1, &Cell::Number(5.0));
        assert_eq!(entries[1].0, "Theobromine");
        assert_eq!(entries[1].1, &Cell::Number(3.2));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let standards =
            Standards::from_json_str(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let names: Vec<_> = standards.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["z", "a", "m"]);
    }

    #[test]
    fn test_non_numeric_string_kept_as_text() {
        // shape is fine at load time; the matcher rejects it by name
        let standards = Standards::from_json_str(r#"{"X": "abc"}"#).unwrap();
        let entries: Vec<_> = standards.iter().collect();
        assert_eq!(entries[0].1, &Cell::Text("abc".to_string()));
    }

    #[test]
    fn test_top_level_array_rejected() {
        let err = Standards::from_json_str(r#"[1, 2]"#).unwrap_err();
        assert!(matches!(err, Error::StandardsFormat(_)));
    }

    #[test]
    fn test_nested_value_rejected() {
        let err = Standards::from_json_str(r#"{"X": [1, 2]}"#).unwrap_err();
        match err {
            Error::StandardsFormat(msg) => assert!(msg.contains("'X'")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_json() {
        let err = Standards::from_json_str("not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_empty_object_loads() {
        // emptiness is the matcher's validation, not the loader's
        let standards = Standards::from_json_str("{}").unwrap();
        assert!(standards.is_empty());
    }
}
