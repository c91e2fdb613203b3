//! CSV loading with header normalization.

use crate::table::{ColumnData, EntityTable, dedupe_headers, normalize_header};
use anyhow::{Context, Result, bail};
use std::path::Path;

/// Load a delimited text file into an [`EntityTable`].
///
/// Headers are trimmed, lowercased, space-to-underscore normalized, and
/// de-duplicated before the table is built. Every column starts as text;
/// numeric coercion is the preprocessor's job.
pub fn load_csv(path: &Path) -> Result<EntityTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(false)
        .from_path(path)
        .with_context(|| format!("failed to open input file {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("failed to read headers from {}", path.display()))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.is_empty() {
        bail!("input file {} has no columns", path.display());
    }
    let headers = dedupe_headers(headers);

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("failed to read record {row}"))?;
        for (i, cell) in record.iter().enumerate() {
            columns[i].push(cell.to_string());
        }
    }

    let mut table = EntityTable::new();
    for (header, values) in headers.into_iter().zip(columns) {
        table.push_column(header, ColumnData::Text(values))?;
    }

    log::debug!(
        "loaded {} rows x {} columns from {}",
        table.n_rows(),
        table.columns().len(),
        path.display()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_normalizes_and_dedupes_headers() {
        let file = write_csv("Player Name, Goals ,Goals\nalice,3,4\n");
        let table = load_csv(file.path()).unwrap();
        let names: Vec<_> = table.column_names().collect();
        assert_eq!(names, vec!["player_name", "goals", "goals_1"]);
        assert_eq!(table.n_rows(), 1);
    }

    #[test]
    fn test_load_preserves_row_order() {
        let file = write_csv("name\nfirst\nsecond\nthird\n");
        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.text("name").unwrap(), ["first", "second", "third"]);
    }

    #[test]
    fn test_load_missing_file_fails_with_path() {
        let err = load_csv(Path::new("/nonexistent/players.csv")).unwrap_err();
        assert!(err.to_string().contains("players.csv"));
    }
}
