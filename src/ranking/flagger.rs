//! Per-category top-K flagging.

use crate::table::{ColumnData, EntityTable};
use anyhow::Result;

/// Name of the boolean column the flagger appends, e.g. `top_3_position`.
#[must_use]
pub fn flag_column_name(k: usize, category_column: &str) -> String {
    format!("top_{k}_{category_column}")
}

/// Mark, for every distinct value of `category_column`, the top `k` rows by
/// `score_column` with a boolean flag column.
///
/// Rows are never removed or reordered; a category with fewer than `k`
/// members simply has all of them flagged. Rows whose score is missing are
/// never flagged.
pub fn flag_top_per_category(
    mut table: EntityTable,
    score_column: &str,
    category_column: &str,
    k: usize,
) -> Result<EntityTable> {
    let scores = table.numeric(score_column)?;
    let categories = table.text(category_column)?;

    let mut flags = vec![false; table.n_rows()];
    let distinct = super::distinct_categories(&table, category_column)?;
    for category in &distinct {
        // Stable sort per partition: ties keep original row order.
        let mut members: Vec<(usize, f64)> = scores
            .iter()
            .enumerate()
            .filter(|(i, _)| &categories[*i] == category)
            .filter_map(|(i, score)| score.map(|s| (i, s)))
            .collect();
        members.sort_by(|(_, s1), (_, s2)| s2.total_cmp(s1));
        for (row, _) in members.into_iter().take(k) {
            flags[row] = true;
        }
    }

    table.push_column(flag_column_name(k, category_column), ColumnData::Bool(flags))?;
    Ok(table)
}
