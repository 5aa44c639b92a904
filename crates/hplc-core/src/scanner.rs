//! Directory scanner for discovering peak-table files

use crate::error::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions accepted as peak tables
const TABLE_EXTENSIONS: [&str; 3] = ["tsv", "csv", "txt"];

/// Scan one or more directories for peak-table files
///
/// Walks recursively, following links, and returns a sorted list so a run
/// over the same directory tree is deterministic.
pub fn discover_tables<P: AsRef<Path>>(roots: &[P]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for root in roots {
        for entry in WalkDir::new(root.as_ref()).follow_links(true) {
            let entry = entry?;
            if entry.file_type().is_file() && is_peak_table(entry.path()) {
                found.push(entry.path().to_path_buf());
            }
        }
    }

    found.sort();
    Ok(found)
}

/// Check whether a path has a peak-table extension
pub fn is_peak_table(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            TABLE_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_peak_table() {
        assert!(is_peak_table(Path::new("run.tsv")));
        assert!(is_peak_table(Path::new("run.csv")));
        assert!(is_peak_table(Path::new("run.TXT")));
        assert!(!is_peak_table(Path::new("standards.json")));
        assert!(!is_peak_table(Path::new("no_extension")));
    }

    #[test]
    fn test_discover_tables_sorted() {
        let dir = std::env::temp_dir().join(format!(
            "hplc-scanner-test-{}",
            std::process::id()
        ));
        let nested = dir.join("nested");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.join("b.tsv"), "x").unwrap();
        std::fs::write(dir.join("a.csv"), "x").unwrap();
        std::fs::write(dir.join("notes.md"), "x").unwrap();
        std::fs::write(nested.join("c.txt"), "x").unwrap();

        let found = discover_tables(&[&dir]).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["a.csv", "b.tsv", "c.txt"]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
