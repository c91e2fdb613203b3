//! CSV persistence of the enriched table.

use crate::table::{ColumnData, EntityTable};
use anyhow::{Context, Result};
use std::path::Path;

/// Save the table as CSV, columns in table order.
///
/// Numeric cells use Rust's shortest round-trip `f64` formatting so a saved
/// table reloads to bit-identical values; missing cells are written empty.
pub fn save_csv(table: &EntityTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;

    writer
        .write_record(table.column_names())
        .context("failed to write headers")?;

    for row in 0..table.n_rows() {
        let record: Vec<String> = table
            .columns()
            .iter()
            .map(|column| match &column.data {
                ColumnData::Text(values) => values[row].clone(),
                ColumnData::Numeric(values) => {
                    values[row].map(|v| v.to_string()).unwrap_or_default()
                }
                ColumnData::Bool(values) => values[row].to_string(),
            })
            .collect();
        writer
            .write_record(&record)
            .with_context(|| format!("failed to write row {row}"))?;
    }

    writer.flush().context("failed to flush output file")?;
    log::debug!("wrote {} rows to {}", table.n_rows(), path.display());
    Ok(())
}
