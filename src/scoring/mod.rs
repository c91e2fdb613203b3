//! Score strategies: independent, stateless transformations of the two
//! preprocessed base measurements into derived score columns.

mod ai;
mod pca;
mod strategies;

pub use ai::{AiMode, AiScore};
pub use pca::PcaScore;
pub use strategies::{
    Custom, GeometricMean, HarmonicMean, SimpleSum, Weighted, ZScoreCombined,
};

use crate::config::StrategiesConfig;
use crate::table::{ColumnData, EntityTable};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// Every derived score column the engine can produce. The `Display`
/// rendering of a variant is the column name it owns in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScoreKind {
    SimpleSumScore,
    WeightedScore,
    GeometricMeanScore,
    ZScoreCombined,
    PcaScore,
    HarmonicMeanScore,
    CustomScore,
    AiScore,
}

impl ScoreKind {
    /// The table column this strategy produces.
    #[must_use]
    pub fn column_name(self) -> String {
        self.to_string()
    }
}

/// One scoring lens over the two standardized base measurements.
///
/// Strategies always consume the preprocessed base columns, never each
/// other's output, so they are order-independent and may conceptually run in
/// parallel; [`apply_all`] assembles their columns in fixed [`ScoreKind`]
/// declaration order regardless.
pub trait ScoreStrategy {
    /// Which score column this strategy owns.
    fn kind(&self) -> ScoreKind;

    /// Compute one score per row from the base measurements.
    fn compute(&self, a: &[f64], b: &[f64]) -> Result<Vec<f64>>;
}

/// Build every configured strategy, in [`ScoreKind`] declaration order.
#[must_use]
pub fn build_strategies(config: &StrategiesConfig) -> Vec<Box<dyn ScoreStrategy>> {
    ScoreKind::iter()
        .map(|kind| -> Box<dyn ScoreStrategy> {
            match kind {
                ScoreKind::SimpleSumScore => Box::new(SimpleSum),
                ScoreKind::WeightedScore => {
                    Box::new(Weighted::new(config.weighted.w1, config.weighted.w2))
                }
                ScoreKind::GeometricMeanScore => Box::new(GeometricMean),
                ScoreKind::ZScoreCombined => Box::new(ZScoreCombined),
                ScoreKind::PcaScore => Box::new(PcaScore),
                ScoreKind::HarmonicMeanScore => Box::new(HarmonicMean),
                ScoreKind::CustomScore => {
                    Box::new(Custom::new(config.custom.threshold, config.custom.bonus))
                }
                ScoreKind::AiScore => Box::new(AiScore::new(config.ai.mode, config.ai.seed)),
            }
        })
        .collect()
}

/// Run every strategy against the two base measurement columns and append
/// each result as a new score column.
pub fn apply_all(
    mut table: EntityTable,
    base_a: &str,
    base_b: &str,
    config: &StrategiesConfig,
) -> Result<EntityTable> {
    let a = table.numeric_dense(base_a)?;
    let b = table.numeric_dense(base_b)?;

    for strategy in build_strategies(config) {
        let scores = strategy.compute(&a, &b)?;
        log::debug!("computed {} for {} rows", strategy.kind(), scores.len());
        table.push_column(
            strategy.kind().column_name(),
            ColumnData::Numeric(scores.into_iter().map(Some).collect()),
        )?;
    }
    Ok(table)
}
