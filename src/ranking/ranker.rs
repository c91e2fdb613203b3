//! Top-N selection over any score column.

use crate::table::EntityTable;
use anyhow::Result;
use serde::Serialize;

/// One row of a top-N report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntity {
    pub name: String,
    pub score: f64,
}

/// The top `n` entities by the given score column, descending.
///
/// Ties keep their original row order (the sort is stable). With `category`
/// set, only rows whose category cell equals it are considered; a category
/// with no rows yields an empty result rather than an error, as does a table
/// with fewer than `n` qualifying rows.
pub fn top_n(
    table: &EntityTable,
    name_column: &str,
    score_column: &str,
    n: usize,
    category: Option<(&str, &str)>,
) -> Result<Vec<RankedEntity>> {
    let names = table.text(name_column)?;
    let scores = table.numeric(score_column)?;

    let mut rows: Vec<(usize, f64)> = match category {
        Some((category_column, wanted)) => {
            let categories = table.text(category_column)?;
            scores
                .iter()
                .enumerate()
                .filter(|(i, _)| categories[*i] == wanted)
                .filter_map(|(i, score)| score.map(|s| (i, s)))
                .collect()
        }
        None => scores
            .iter()
            .enumerate()
            .filter_map(|(i, score)| score.map(|s| (i, s)))
            .collect(),
    };

    // Stable sort: equal scores stay in original row order.
    rows.sort_by(|(_, s1), (_, s2)| s2.total_cmp(s1));
    rows.truncate(n);

    Ok(rows
        .into_iter()
        .map(|(i, score)| RankedEntity {
            name: names[i].clone(),
            score,
        })
        .collect())
}

/// Distinct category values in first-appearance order.
pub fn distinct_categories(table: &EntityTable, category_column: &str) -> Result<Vec<String>> {
    let values = table.text(category_column)?;
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for value in values {
        if seen.insert(value.as_str()) {
            out.push(value.clone());
        }
    }
    Ok(out)
}
