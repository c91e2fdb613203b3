//! The closed-form score strategies.

use crate::preprocess::{column_stats, zscore};
use crate::scoring::{ScoreKind, ScoreStrategy};
use anyhow::{Result, ensure};

/// Division guard for the harmonic mean: inputs are clamped to at least this
/// value before taking reciprocals.
const HARMONIC_EPSILON: f64 = 1e-6;

/// `a + b`.
#[derive(Debug, Clone, Copy)]
pub struct SimpleSum;

impl ScoreStrategy for SimpleSum {
    fn kind(&self) -> ScoreKind {
        ScoreKind::SimpleSumScore
    }

    fn compute(&self, a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
        Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
    }
}

/// `w1*a + w2*b`.
#[derive(Debug, Clone, Copy)]
pub struct Weighted {
    w1: f64,
    w2: f64,
}

impl Weighted {
    #[must_use]
    pub const fn new(w1: f64, w2: f64) -> Self {
        Self { w1, w2 }
    }
}

impl ScoreStrategy for Weighted {
    fn kind(&self) -> ScoreKind {
        ScoreKind::WeightedScore
    }

    fn compute(&self, a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
        Ok(a.iter()
            .zip(b)
            .map(|(x, y)| self.w1 * x + self.w2 * y)
            .collect())
    }
}

/// `sqrt(a*b)` where the product is non-negative.
///
/// Standardized inputs routinely straddle zero, so a negative product is a
/// live case, not a corner; it scores 0.0.
#[derive(Debug, Clone, Copy)]
pub struct GeometricMean;

impl ScoreStrategy for GeometricMean {
    fn kind(&self) -> ScoreKind {
        ScoreKind::GeometricMeanScore
    }

    fn compute(&self, a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
        Ok(a.iter()
            .zip(b)
            .map(|(x, y)| {
                let product = x * y;
                if product < 0.0 { 0.0 } else { product.sqrt() }
            })
            .collect())
    }
}

/// `z(a) + z(b)`, with the z-scores recomputed on the values as passed.
///
/// On input that is already standardized this is idempotent (modulo the
/// constant-column guard); the strategy deliberately does not assume its
/// input has been through [`crate::preprocess::standardize`].
#[derive(Debug, Clone, Copy)]
pub struct ZScoreCombined;

impl ScoreStrategy for ZScoreCombined {
    fn kind(&self) -> ScoreKind {
        ScoreKind::ZScoreCombined
    }

    fn compute(&self, a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
        let stats_a = column_stats(a);
        let stats_b = column_stats(b);
        Ok(a.iter()
            .zip(b)
            .map(|(x, y)| zscore(*x, stats_a) + zscore(*y, stats_b))
            .collect())
    }
}

/// `2 / (1/a' + 1/b')` with both inputs clamped to at least
/// [`HARMONIC_EPSILON`].
///
/// Standardized values can be zero or negative, either of which would make
/// the raw reciprocal blow up or flip sign; the clamp makes the strategy a
/// well-defined "both must be high" signal.
#[derive(Debug, Clone, Copy)]
pub struct HarmonicMean;

impl ScoreStrategy for HarmonicMean {
    fn kind(&self) -> ScoreKind {
        ScoreKind::HarmonicMeanScore
    }

    fn compute(&self, a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
        Ok(a.iter()
            .zip(b)
            .map(|(x, y)| {
                let x = x.max(HARMONIC_EPSILON);
                let y = y.max(HARMONIC_EPSILON);
                2.0 / (x.recip() + y.recip())
            })
            .collect())
    }
}

/// `a + b` plus a fixed bonus for each measurement above a threshold.
#[derive(Debug, Clone, Copy)]
pub struct Custom {
    threshold: f64,
    bonus: f64,
}

impl Custom {
    #[must_use]
    pub const fn new(threshold: f64, bonus: f64) -> Self {
        Self { threshold, bonus }
    }
}

impl ScoreStrategy for Custom {
    fn kind(&self) -> ScoreKind {
        ScoreKind::CustomScore
    }

    fn compute(&self, a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
        ensure!(
            self.bonus.is_finite() && self.threshold.is_finite(),
            "custom score threshold and bonus must be finite"
        );
        Ok(a.iter()
            .zip(b)
            .map(|(x, y)| {
                let mut score = x + y;
                if *x > self.threshold {
                    score += self.bonus;
                }
                if *y > self.threshold {
                    score += self.bonus;
                }
                score
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: [f64; 4] = [1.0, -1.0, 2.0, 0.0];
    const B: [f64; 4] = [0.5, 1.5, 1.8, 0.0];

    #[test]
    fn test_simple_sum() {
        let scores = SimpleSum.compute(&A, &B).unwrap();
        assert_eq!(scores, vec![1.5, 0.5, 3.8, 0.0]);
    }

    #[test]
    fn test_weighted_defaults() {
        let scores = Weighted::new(0.6, 0.4).compute(&A, &B).unwrap();
        assert!((scores[0] - (0.6 + 0.2)).abs() < 1e-12);
        assert!((scores[1] - (-0.6 + 0.6)).abs() < 1e-12);
    }

    #[test]
    fn test_geometric_mean_negative_product_scores_zero() {
        let scores = GeometricMean.compute(&A, &B).unwrap();
        assert!((scores[0] - 0.5_f64.sqrt()).abs() < 1e-12);
        assert_eq!(scores[1], 0.0);
        assert!(scores.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_z_score_combined_is_standardized_sum() {
        let scores = ZScoreCombined.compute(&A, &B).unwrap();
        let stats_a = column_stats(&A);
        let stats_b = column_stats(&B);
        let expected = zscore(A[2], stats_a) + zscore(B[2], stats_b);
        assert!((scores[2] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_z_score_combined_constant_inputs_score_zero() {
        let flat = [3.0, 3.0, 3.0];
        let scores = ZScoreCombined.compute(&flat, &flat).unwrap();
        assert_eq!(scores, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_harmonic_mean_survives_zero_and_negative_inputs() {
        let scores = HarmonicMean.compute(&A, &B).unwrap();
        assert!(scores.iter().all(|s| s.is_finite()));
        // Clamped inputs: harmonic mean of two epsilons is epsilon.
        assert!((scores[3] - HARMONIC_EPSILON).abs() < 1e-12);
        // Both genuinely positive: ordinary harmonic mean.
        let expected = 2.0 / (2.0_f64.recip() + 1.8_f64.recip());
        assert!((scores[2] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_custom_bonus_applies_per_measurement() {
        let custom = Custom::new(1.5, 0.2);
        let scores = custom.compute(&A, &B).unwrap();
        // Row 2: a=2.0 > 1.5 and b=1.8 > 1.5, two bonuses.
        assert!((scores[2] - (3.8 + 0.4)).abs() < 1e-12);
        // Row 0: neither exceeds the threshold.
        assert!((scores[0] - 1.5).abs() < 1e-12);
        // Row 1: only b=1.5 which is not strictly greater.
        assert!((scores[1] - 0.5).abs() < 1e-12);
    }
}
