//! Report generation for the finished ranking.

mod console;
mod json;

pub use console::generate as generate_console;
pub use json::generate as generate_json;

use crate::ranking::RankedEntity;
use serde::Serialize;

/// Everything the report writers need, assembled once by the rank command.
#[derive(Debug, Clone, Serialize)]
pub struct RankingSummary {
    /// The score column the rankings were taken over.
    pub score_column: String,

    /// Overall top-N.
    pub overall: Vec<RankedEntity>,

    /// Per-category top-N, in first-appearance category order. Empty when no
    /// category column is configured.
    pub by_category: Vec<(String, Vec<RankedEntity>)>,
}
