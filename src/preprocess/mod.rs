//! Data cleaning ahead of scoring: numeric coercion, mean imputation, and
//! standardization.

use crate::table::{ColumnData, EntityTable};
use anyhow::{Result, bail};

/// Threshold below which a standard deviation is treated as zero.
const STDEV_EPSILON: f64 = 1e-9;

/// Population mean and standard deviation of a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub mean: f64,
    pub stdev: f64,
}

/// Compute population statistics for a slice of values.
///
/// Uses the population standard deviation (N denominator): the table holds
/// the full entity universe, not a sample. Returns zeros for an empty slice.
#[must_use]
pub fn column_stats(values: &[f64]) -> ColumnStats {
    if values.is_empty() {
        return ColumnStats {
            mean: 0.0,
            stdev: 0.0,
        };
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    ColumnStats {
        mean,
        stdev: variance.sqrt(),
    }
}

/// Z-score a single value; zero when the deviation is degenerate.
#[must_use]
pub fn zscore(value: f64, stats: ColumnStats) -> f64 {
    if stats.stdev < STDEV_EPSILON {
        return 0.0;
    }
    (value - stats.mean) / stats.stdev
}

/// Parse the named text columns as numeric; cells that fail to parse become
/// missing. A column that does not exist at all is a hard error.
pub fn coerce_numeric(mut table: EntityTable, columns: &[String]) -> Result<EntityTable> {
    for name in columns {
        let Some(column) = table.column(name) else {
            bail!("missing required column: {name}");
        };
        let parsed: Vec<Option<f64>> = match &column.data {
            ColumnData::Text(values) => values
                .iter()
                .map(|raw| raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
                .collect(),
            // Already numeric, nothing to do.
            ColumnData::Numeric(_) => continue,
            ColumnData::Bool(_) => bail!("column '{name}' is boolean, not numeric-convertible"),
        };
        let missing = parsed.iter().filter(|v| v.is_none()).count();
        if missing > 0 {
            log::debug!("column '{name}': {missing} cells failed numeric coercion");
        }
        table.replace_column(name, ColumnData::Numeric(parsed))?;
    }
    Ok(table)
}

/// Replace missing values in each named column with the mean of its
/// non-missing values. A column with no usable values at all cannot be
/// imputed and is an error.
pub fn fill_missing_with_mean(mut table: EntityTable, columns: &[String]) -> Result<EntityTable> {
    for name in columns {
        let values = table.numeric(name)?;
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        if present.is_empty() {
            bail!("cannot mean-fill column '{name}': every value is missing");
        }
        let mean = column_stats(&present).mean;
        let filled: Vec<Option<f64>> = values
            .iter()
            .map(|v| Some(v.unwrap_or(mean)))
            .collect();
        table.replace_column(name, ColumnData::Numeric(filled))?;
    }
    Ok(table)
}

/// Standardize each named column to zero mean and unit variance using its
/// population statistics at call time.
///
/// A constant column has no spread to standardize away; it becomes all zeros
/// and a warning is logged rather than letting NaNs leak downstream.
pub fn standardize(mut table: EntityTable, columns: &[String]) -> Result<EntityTable> {
    for name in columns {
        let values = table.numeric_dense(name)?;
        let stats = column_stats(&values);
        if stats.stdev < STDEV_EPSILON {
            log::warn!("column '{name}' is constant; standardizing to all zeros");
        }
        let scaled: Vec<Option<f64>> = values
            .iter()
            .map(|v| Some(zscore(*v, stats)))
            .collect();
        table.replace_column(name, ColumnData::Numeric(scaled))?;
    }
    Ok(table)
}
