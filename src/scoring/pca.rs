//! First principal component of the two base measurements.

use crate::preprocess::column_stats;
use crate::scoring::{ScoreKind, ScoreStrategy};
use anyhow::Result;

/// Projection of each row onto the direction of maximum variance of the
/// two-column matrix `[a, b]`.
///
/// The 2x2 covariance eigenproblem is solved in closed form, so no linear
/// algebra dependency is needed. PCA leaves the sign of the component
/// arbitrary; we fix the convention by flipping the projection whenever it
/// correlates negatively with `a + b`, making reruns and tests deterministic.
#[derive(Debug, Clone, Copy)]
pub struct PcaScore;

impl ScoreStrategy for PcaScore {
    fn kind(&self) -> ScoreKind {
        ScoreKind::PcaScore
    }

    fn compute(&self, a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
        if a.is_empty() {
            return Ok(Vec::new());
        }

        let stats_a = column_stats(a);
        let stats_b = column_stats(b);
        let n = a.len() as f64;

        let centered: Vec<(f64, f64)> = a
            .iter()
            .zip(b)
            .map(|(x, y)| (x - stats_a.mean, y - stats_b.mean))
            .collect();

        let var_a = stats_a.stdev.powi(2);
        let var_b = stats_b.stdev.powi(2);
        let cov = centered.iter().map(|(x, y)| x * y).sum::<f64>() / n;

        // Leading eigenvector of [[var_a, cov], [cov, var_b]].
        let (mut vx, mut vy) = if cov.abs() < f64::EPSILON {
            if var_a >= var_b { (1.0, 0.0) } else { (0.0, 1.0) }
        } else {
            let trace = var_a + var_b;
            let gap = ((var_a - var_b).powi(2) + 4.0 * cov * cov).sqrt();
            let lambda = (trace + gap) / 2.0;
            (lambda - var_b, cov)
        };
        let norm = vx.hypot(vy);
        if norm > 0.0 {
            vx /= norm;
            vy /= norm;
        }

        let mut projection: Vec<f64> = centered.iter().map(|(x, y)| x * vx + y * vy).collect();

        // Sign convention: positive correlation with the sum of the inputs.
        let alignment: f64 = projection
            .iter()
            .zip(a.iter().zip(b))
            .map(|(p, (x, y))| p * (x + y))
            .sum();
        if alignment < 0.0 {
            for p in &mut projection {
                *p = -*p;
            }
        }

        Ok(projection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pca_captures_the_dominant_direction() {
        // Points along y = x: the component is the diagonal, and projections
        // are the (signed) distances along it.
        let a = [-2.0, -1.0, 0.0, 1.0, 2.0];
        let b = [-2.0, -1.0, 0.0, 1.0, 2.0];
        let scores = PcaScore.compute(&a, &b).unwrap();
        for (score, x) in scores.iter().zip(a) {
            assert!((score - x * 2.0_f64.sqrt()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_pca_sign_correlates_with_input_sum() {
        let a = [3.0, -1.0, 0.5, -2.5];
        let b = [2.0, -2.0, 1.0, -1.0];
        let scores = PcaScore.compute(&a, &b).unwrap();
        let alignment: f64 = scores
            .iter()
            .zip(a.iter().zip(b))
            .map(|(p, (x, y))| p * (x + y))
            .sum();
        assert!(alignment > 0.0);
    }

    #[test]
    fn test_pca_uncorrelated_inputs_pick_the_wider_axis() {
        // b has no variance: the component must be the a axis.
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 5.0, 5.0, 5.0];
        let scores = PcaScore.compute(&a, &b).unwrap();
        assert!((scores[0] - (-1.5)).abs() < 1e-9);
        assert!((scores[3] - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_pca_is_deterministic_across_reruns() {
        let a = [0.3, -1.2, 2.2, 0.9, -0.4];
        let b = [1.1, -0.7, 1.9, 0.2, -1.3];
        let first = PcaScore.compute(&a, &b).unwrap();
        let second = PcaScore.compute(&a, &b).unwrap();
        for (x, y) in first.iter().zip(&second) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn test_pca_empty_input() {
        assert!(PcaScore.compute(&[], &[]).unwrap().is_empty());
    }
}
