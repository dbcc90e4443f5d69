// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Kraskov–Stögbauer–Grassberger (KSG) estimators for continuous data.
//!
//! Mutual information follows KSG algorithm 1 with the max-norm:
//!
//! I(X;Y) = psi(k) + psi(N) - < psi(n_x + 1) + psi(n_y + 1) >
//!
//! where eps_i is the max-norm distance from sample i to its k-th neighbour in
//! the joint (x, y) space and n_x, n_y count the other samples strictly closer
//! than eps_i in each marginal.
//!
//! Conditional mutual information is the Frenzel–Pompe extension:
//!
//! I(X;Y|Z) = psi(k) - < psi(n_xz + 1) + psi(n_yz + 1) - psi(n_z + 1) >
//!
//! with eps_i taken in the (x, y, z) space. Every variable is standardised
//! first so that the max-norm weighs them equally.

pub mod utils;

use ndarray::ArrayView1;
use statrs::function::gamma::digamma;

use crate::error::Result;
use crate::estimators::approaches::common_nd::dataset::{NdDataset, SortedMarginal};
use crate::estimators::traits::InformationEstimator;
use utils::{check_inputs, standardize};

/// Neighbour count of the resting-state and arithmetic-task analyses.
pub const DEFAULT_NEIGHBOURS: usize = 10;

/// k-NN mutual information / conditional mutual information estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KsgEstimator {
    pub k: usize,
}

impl Default for KsgEstimator {
    fn default() -> Self {
        Self { k: DEFAULT_NEIGHBOURS }
    }
}

impl KsgEstimator {
    pub fn new(k: usize) -> Self {
        Self { k }
    }
}

impl InformationEstimator for KsgEstimator {
    fn mutual_information(&self, x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Result<f64> {
        let n = check_inputs(&[x.view(), y.view()], self.k)?;
        let xs = standardize(x)?;
        let ys = standardize(y)?;

        let joint = NdDataset::<2>::from_columns([xs.view(), ys.view()]);
        let mx = SortedMarginal::new(xs.view());
        let my = SortedMarginal::new(ys.view());

        let mut acc = 0.0f64;
        for i in 0..n {
            let eps = joint.kth_neighbor_radius_chebyshev(i, self.k);
            let nx = mx.count_within(xs[i], eps);
            let ny = my.count_within(ys[i], eps);
            acc += digamma(nx as f64 + 1.0) + digamma(ny as f64 + 1.0);
        }

        let mi = digamma(n as f64) + digamma(self.k as f64) - acc / n as f64;
        Ok(mi.max(0.0))
    }

    fn conditional_mutual_information(
        &self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        z: ArrayView1<'_, f64>,
    ) -> Result<f64> {
        let n = check_inputs(&[x.view(), y.view(), z.view()], self.k)?;
        let xs = standardize(x)?;
        let ys = standardize(y)?;
        let zs = standardize(z)?;

        let joint = NdDataset::<3>::from_columns([xs.view(), ys.view(), zs.view()]);
        let xz = NdDataset::<2>::from_columns([xs.view(), zs.view()]);
        let yz = NdDataset::<2>::from_columns([ys.view(), zs.view()]);
        let mz = SortedMarginal::new(zs.view());

        let mut acc = 0.0f64;
        for i in 0..n {
            let eps = joint.kth_neighbor_radius_chebyshev(i, self.k);
            let n_xz = xz.count_within_chebyshev(i, eps);
            let n_yz = yz.count_within_chebyshev(i, eps);
            let n_z = mz.count_within(zs[i], eps);
            acc += digamma(n_xz as f64 + 1.0) + digamma(n_yz as f64 + 1.0)
                - digamma(n_z as f64 + 1.0);
        }

        Ok(digamma(self.k as f64) - acc / n as f64)
    }
}
