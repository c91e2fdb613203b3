//! Blends the strategy outputs into one ultimate score.

use crate::table::{ColumnData, EntityTable};
use anyhow::{Result, bail};
use std::collections::BTreeMap;

/// The column the aggregator appends.
pub const ULTIMATE_SCORE: &str = "ultimate_score";

/// Mapping from score column name to its (non-negative) blend weight.
///
/// Weights need not sum to one and are never renormalized; a column absent
/// from the map contributes nothing. `BTreeMap` keeps evaluation order
/// deterministic, so the floating-point sum is reproducible run to run.
pub type Weights = BTreeMap<String, f64>;

/// Append `ultimate_score` as the weighted sum of the configured score
/// columns.
///
/// Every column referenced with a non-zero weight must exist; a missing one
/// is a configuration error and the run fails naming it.
pub fn create_ultimate_score(mut table: EntityTable, weights: &Weights) -> Result<EntityTable> {
    for (name, weight) in weights {
        if *weight < 0.0 {
            bail!("weight for '{name}' is negative ({weight}); weights must be non-negative");
        }
        if *weight > 0.0 && !table.has_column(name) {
            bail!("missing required column: {name}");
        }
    }

    let mut combined = vec![0.0_f64; table.n_rows()];
    for (name, weight) in weights {
        if *weight == 0.0 {
            continue;
        }
        let values = table.numeric_dense(name)?;
        for (total, value) in combined.iter_mut().zip(values) {
            *total += weight * value;
        }
    }

    table.push_column(
        ULTIMATE_SCORE,
        ColumnData::Numeric(combined.into_iter().map(Some).collect()),
    )?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_scores() -> EntityTable {
        let mut table = EntityTable::new();
        table
            .push_column(
                "simple_sum_score",
                ColumnData::Numeric(vec![Some(1.0), Some(2.0), Some(-1.0)]),
            )
            .unwrap();
        table
            .push_column(
                "pca_score",
                ColumnData::Numeric(vec![Some(0.5), Some(-0.5), Some(0.0)]),
            )
            .unwrap();
        table
    }

    fn weights(entries: &[(&str, f64)]) -> Weights {
        entries
            .iter()
            .map(|(name, w)| ((*name).to_string(), *w))
            .collect()
    }

    #[test]
    fn test_single_weight_reproduces_the_column() {
        let table = table_with_scores();
        let table =
            create_ultimate_score(table, &weights(&[("simple_sum_score", 1.0)])).unwrap();
        assert_eq!(
            table.numeric_dense(ULTIMATE_SCORE).unwrap(),
            table.numeric_dense("simple_sum_score").unwrap()
        );
    }

    #[test]
    fn test_weighted_sum() {
        let table = table_with_scores();
        let table = create_ultimate_score(
            table,
            &weights(&[("simple_sum_score", 2.0), ("pca_score", 4.0)]),
        )
        .unwrap();
        assert_eq!(
            table.numeric_dense(ULTIMATE_SCORE).unwrap(),
            vec![4.0, 2.0, -2.0]
        );
    }

    #[test]
    fn test_linearity_in_the_weights() {
        let base = create_ultimate_score(
            table_with_scores(),
            &weights(&[("simple_sum_score", 0.3), ("pca_score", 0.7)]),
        )
        .unwrap();
        let scaled = create_ultimate_score(
            table_with_scores(),
            &weights(&[("simple_sum_score", 0.9), ("pca_score", 2.1)]),
        )
        .unwrap();
        for (b, s) in base
            .numeric_dense(ULTIMATE_SCORE)
            .unwrap()
            .iter()
            .zip(scaled.numeric_dense(ULTIMATE_SCORE).unwrap())
        {
            assert!((3.0 * b - s).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_weight_excludes_the_column() {
        let with_zero = create_ultimate_score(
            table_with_scores(),
            &weights(&[("simple_sum_score", 1.0), ("pca_score", 0.0)]),
        )
        .unwrap();

        // Changing the zero-weighted column's values must not matter.
        let mut altered = EntityTable::new();
        altered
            .push_column(
                "simple_sum_score",
                ColumnData::Numeric(vec![Some(1.0), Some(2.0), Some(-1.0)]),
            )
            .unwrap();
        altered
            .push_column(
                "pca_score",
                ColumnData::Numeric(vec![Some(99.0), Some(-99.0), Some(42.0)]),
            )
            .unwrap();
        let altered = create_ultimate_score(
            altered,
            &weights(&[("simple_sum_score", 1.0), ("pca_score", 0.0)]),
        )
        .unwrap();

        assert_eq!(
            with_zero.numeric_dense(ULTIMATE_SCORE).unwrap(),
            altered.numeric_dense(ULTIMATE_SCORE).unwrap()
        );
    }

    #[test]
    fn test_missing_column_with_nonzero_weight_names_it() {
        let err = create_ultimate_score(table_with_scores(), &weights(&[("ai_score", 0.5)]))
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required column: ai_score");
    }

    #[test]
    fn test_zero_weight_on_missing_column_is_allowed() {
        let table = create_ultimate_score(
            table_with_scores(),
            &weights(&[("simple_sum_score", 1.0), ("ai_score", 0.0)]),
        )
        .unwrap();
        assert!(table.has_column(ULTIMATE_SCORE));
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let err = create_ultimate_score(
            table_with_scores(),
            &weights(&[("simple_sum_score", -1.0)]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }
}
