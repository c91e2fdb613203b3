//! Learned score: a lightweight model fit on the base measurements.

use crate::scoring::{ScoreKind, ScoreStrategy};
use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::index::sample;
use serde::{Deserialize, Serialize};

/// Which model backs the AI score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiMode {
    /// Ordinary least squares on `[a, b]` predicting the proxy target
    /// `(a + b) / 2`; the score is the fitted prediction. Closed form, no
    /// randomness involved.
    #[default]
    Regression,

    /// K-means with k = 3 over the `(a, b)` points; the score is the cluster
    /// id in `{0, 1, 2}`. Initialization draws from a generator seeded with
    /// the configured seed, so a fixed seed reproduces bit-identical output.
    Clustering,
}

/// The `ai_score` strategy.
#[derive(Debug, Clone, Copy)]
pub struct AiScore {
    mode: AiMode,
    seed: u64,
}

impl AiScore {
    #[must_use]
    pub const fn new(mode: AiMode, seed: u64) -> Self {
        Self { mode, seed }
    }
}

impl ScoreStrategy for AiScore {
    fn kind(&self) -> ScoreKind {
        ScoreKind::AiScore
    }

    fn compute(&self, a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
        match self.mode {
            AiMode::Regression => Ok(fit_regression(a, b)),
            AiMode::Clustering => Ok(fit_clusters(a, b, self.seed)),
        }
    }
}

/// Least-squares fit of `y = c0 + c1*a + c2*b` against the proxy target
/// `(a + b) / 2`, evaluated back on the training rows.
fn fit_regression(a: &[f64], b: &[f64]) -> Vec<f64> {
    let n = a.len();
    if n == 0 {
        return Vec::new();
    }

    let y: Vec<f64> = a.iter().zip(b).map(|(x, z)| (x + z) / 2.0).collect();

    // Normal equations for [1, a, b]; a tiny ridge keeps the system solvable
    // when a and b are collinear or constant.
    const RIDGE: f64 = 1e-9;
    let mut xtx = [[0.0_f64; 3]; 3];
    let mut xty = [0.0_f64; 3];
    for i in 0..n {
        let row = [1.0, a[i], b[i]];
        for (j, rj) in row.iter().enumerate() {
            for (k, rk) in row.iter().enumerate() {
                xtx[j][k] += rj * rk;
            }
            xty[j] += rj * y[i];
        }
    }
    for (j, diag) in xtx.iter_mut().enumerate() {
        diag[j] += RIDGE;
    }

    let coef = solve_3x3(xtx, xty);
    a.iter()
        .zip(b)
        .map(|(x, z)| coef[0] + coef[1] * x + coef[2] * z)
        .collect()
}

/// Gaussian elimination with partial pivoting for a 3x3 system.
fn solve_3x3(mut m: [[f64; 3]; 3], mut rhs: [f64; 3]) -> [f64; 3] {
    for col in 0..3 {
        let pivot = (col..3)
            .max_by(|&i, &j| m[i][col].abs().total_cmp(&m[j][col].abs()))
            .unwrap_or(col);
        m.swap(col, pivot);
        rhs.swap(col, pivot);

        let lead = m[col][col];
        if lead.abs() < f64::MIN_POSITIVE {
            continue;
        }
        for row in (col + 1)..3 {
            let factor = m[row][col] / lead;
            for k in col..3 {
                m[row][k] -= factor * m[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut out = [0.0_f64; 3];
    for col in (0..3).rev() {
        let mut value = rhs[col];
        for k in (col + 1)..3 {
            value -= m[col][k] * out[k];
        }
        if m[col][col].abs() >= f64::MIN_POSITIVE {
            out[col] = value / m[col][col];
        }
    }
    out
}

/// K-means over the `(a, b)` points. Labels are remapped so that cluster 0
/// has the lowest centroid sum, making the ids stable for a given seed.
fn fit_clusters(a: &[f64], b: &[f64], seed: u64) -> Vec<f64> {
    const MAX_ITERATIONS: usize = 50;

    let n = a.len();
    let k = n.min(3);
    if k == 0 {
        return Vec::new();
    }

    let points: Vec<(f64, f64)> = a.iter().copied().zip(b.iter().copied()).collect();

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut centroids: Vec<(f64, f64)> = sample(&mut rng, n, k).iter().map(|i| points[i]).collect();

    let mut labels = vec![0_usize; n];
    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;
        for (i, point) in points.iter().enumerate() {
            let nearest = centroids
                .iter()
                .enumerate()
                .min_by(|(_, c1), (_, c2)| {
                    squared_distance(*point, **c1).total_cmp(&squared_distance(*point, **c2))
                })
                .map(|(idx, _)| idx)
                .unwrap_or(0);
            if labels[i] != nearest {
                labels[i] = nearest;
                changed = true;
            }
        }
        if !changed {
            break;
        }

        for (cluster, centroid) in centroids.iter_mut().enumerate() {
            let members: Vec<&(f64, f64)> = points
                .iter()
                .zip(&labels)
                .filter(|(_, label)| **label == cluster)
                .map(|(p, _)| p)
                .collect();
            // An emptied cluster keeps its previous centroid.
            if !members.is_empty() {
                let count = members.len() as f64;
                centroid.0 = members.iter().map(|p| p.0).sum::<f64>() / count;
                centroid.1 = members.iter().map(|p| p.1).sum::<f64>() / count;
            }
        }
    }

    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by(|&i, &j| {
        (centroids[i].0 + centroids[i].1).total_cmp(&(centroids[j].0 + centroids[j].1))
    });
    let mut remap = vec![0_usize; k];
    for (rank, cluster) in order.into_iter().enumerate() {
        remap[cluster] = rank;
    }

    labels.into_iter().map(|label| remap[label] as f64).collect()
}

fn squared_distance(p: (f64, f64), q: (f64, f64)) -> f64 {
    (p.0 - q.0).powi(2) + (p.1 - q.1).powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regression_recovers_the_proxy_target() {
        // The target is linear in the features, so the fit is exact.
        let a = [1.0, -0.5, 2.0, 0.0, -1.5];
        let b = [0.5, 1.0, -1.0, 0.25, 2.0];
        let scores = AiScore::new(AiMode::Regression, 0).compute(&a, &b).unwrap();
        for ((x, y), score) in a.iter().zip(&b).zip(&scores) {
            assert!((score - (x + y) / 2.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_regression_handles_collinear_features() {
        let a = [1.0, 2.0, 3.0];
        let b = [2.0, 4.0, 6.0];
        let scores = AiScore::new(AiMode::Regression, 0).compute(&a, &b).unwrap();
        assert!(scores.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_clustering_same_seed_is_bit_identical() {
        let a = [0.1, 0.2, 5.0, 5.1, -3.0, -3.2];
        let b = [0.0, 0.3, 4.9, 5.2, -2.9, -3.1];
        let first = AiScore::new(AiMode::Clustering, 42).compute(&a, &b).unwrap();
        let second = AiScore::new(AiMode::Clustering, 42).compute(&a, &b).unwrap();
        for (x, y) in first.iter().zip(&second) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn test_clustering_labels_are_cluster_ids() {
        let a = [0.0, 0.0, 10.0, 10.0, -10.0, -10.0];
        let b = [0.0, 0.0, 10.0, 10.0, -10.0, -10.0];
        let scores = AiScore::new(AiMode::Clustering, 7).compute(&a, &b).unwrap();
        assert!(scores.iter().all(|s| [0.0, 1.0, 2.0].contains(s)));
        // Identical points always land in the same cluster.
        assert_eq!(scores[0], scores[1]);
        assert_eq!(scores[2], scores[3]);
        assert_eq!(scores[4], scores[5]);
    }

    #[test]
    fn test_clustering_fewer_rows_than_clusters() {
        let scores = AiScore::new(AiMode::Clustering, 1)
            .compute(&[1.0, 2.0], &[1.0, 2.0])
            .unwrap();
        assert_eq!(scores.len(), 2);
        assert!(scores.iter().all(|s| *s == 0.0 || *s == 1.0));
    }
}
