// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use kiddo::traits::DistanceMetric;
use kiddo::{ImmutableKdTree, SquaredEuclidean};
use ndarray::ArrayView1;
use std::num::NonZeroUsize;

/// Chebyshev distance metric (L-infinity norm) for kiddo.
///
/// Only used for exact distance evaluation. Tree queries go through
/// `SquaredEuclidean` with a circumscribed radius, because the max-norm ball of
/// radius r sits inside the Euclidean ball of radius r * sqrt(K).
pub struct Chebyshev;

impl<const K: usize> DistanceMetric<f64, K> for Chebyshev {
    fn dist(a: &[f64; K], b: &[f64; K]) -> f64 {
        let mut max = 0.0;
        for i in 0..K {
            let diff = (a[i] - b[i]).abs();
            if diff > max {
                max = diff;
            }
        }
        max
    }

    fn dist1(a: f64, b: f64) -> f64 {
        (a - b).abs()
    }
}

/// Radius actually used for strict "closer than eps" counts.
///
/// A zero radius (duplicated samples) still counts exact duplicates.
#[inline]
pub fn strict_radius(eps: f64) -> f64 {
    eps.max(f64::MIN_POSITIVE)
}

/// Shared N-D dataset container with KD-tree for fast neighbor queries.
pub struct NdDataset<const K: usize> {
    pub points: Vec<[f64; K]>,
    pub n: usize,
    pub tree: ImmutableKdTree<f64, K>,
}

impl<const K: usize> NdDataset<K> {
    pub fn from_points(points: Vec<[f64; K]>) -> Self {
        let n = points.len();
        let tree = ImmutableKdTree::new_from_slice(&points);
        Self { points, n, tree }
    }

    /// Zip K equal-length columns into K-dimensional points.
    pub fn from_columns(columns: [ArrayView1<'_, f64>; K]) -> Self {
        let n = columns.first().map_or(0, |c| c.len());
        assert!(
            columns.iter().all(|c| c.len() == n),
            "all columns must have the same length"
        );
        let mut points: Vec<[f64; K]> = Vec::with_capacity(n);
        for r in 0..n {
            let mut p = [0.0; K];
            for c in 0..K {
                p[c] = columns[c][r];
            }
            points.push(p);
        }
        Self::from_points(points)
    }

    /// Max-norm distance from point `i` to its k-th nearest neighbor (self excluded).
    ///
    /// The k Euclidean nearest neighbours all lie within their Euclidean radius
    /// `rho` in max-norm too, so every point with max-norm distance <= the
    /// answer is inside the Euclidean ball of radius `rho * sqrt(K)`.
    pub fn kth_neighbor_radius_chebyshev(&self, i: usize, k: usize) -> f64 {
        assert!(k >= 1);
        assert!(k < self.n, "k must be <= N-1 for self-queries");
        let p = &self.points[i];

        let neigh = self
            .tree
            .nearest_n::<SquaredEuclidean>(p, NonZeroUsize::MIN.saturating_add(k));
        let rho2 = neigh.iter().map(|nb| nb.distance).fold(0.0f64, f64::max);

        let circumscribed = (K as f64) * rho2 * (1.0 + 1e-12) + f64::MIN_POSITIVE;
        let mut dists: Vec<f64> = self
            .tree
            .within_unsorted::<SquaredEuclidean>(p, circumscribed)
            .into_iter()
            .filter(|nb| nb.item as usize != i)
            .map(|nb| Chebyshev::dist(p, &self.points[nb.item as usize]))
            .collect();

        // Only reachable through rounding in the tree's distance evaluation.
        if dists.len() < k {
            return rho2.sqrt();
        }
        dists.select_nth_unstable_by(k - 1, |a, b| a.total_cmp(b));
        dists[k - 1]
    }

    /// Number of other points whose max-norm distance to point `i` is below `eps`.
    pub fn count_within_chebyshev(&self, i: usize, eps: f64) -> usize {
        let r = strict_radius(eps);
        let p = &self.points[i];
        let circumscribed = (K as f64) * r * r * (1.0 + 1e-12) + f64::MIN_POSITIVE;
        self.tree
            .within_unsorted::<SquaredEuclidean>(p, circumscribed)
            .into_iter()
            .filter(|nb| nb.item as usize != i)
            .filter(|nb| Chebyshev::dist(p, &self.points[nb.item as usize]) < r)
            .count()
    }
}

/// Sorted copy of a 1-D marginal for O(log N) range counts.
pub struct SortedMarginal {
    sorted: Vec<f64>,
}

impl SortedMarginal {
    pub fn new(data: ArrayView1<'_, f64>) -> Self {
        let mut sorted = data.to_vec();
        sorted.sort_unstable_by(|a, b| a.total_cmp(b));
        Self { sorted }
    }

    /// Number of samples other than `x` itself strictly closer than `eps` to `x`.
    pub fn count_within(&self, x: f64, eps: f64) -> usize {
        let r = strict_radius(eps);
        let lo = self.sorted.partition_point(|&v| x - v >= r);
        let hi = self.sorted.partition_point(|&v| v - x < r);
        // `x` is one of the samples and always falls inside the open interval.
        (hi - lo).saturating_sub(1)
    }
}
