// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::ArrayView1;

use crate::error::Result;

/// Interface for estimators of $I(X; Y)$ and $I(X; Y | Z)$ on continuous series.
///
/// Every consumer of information estimates (the continuous PID and the pairwise
/// precomputation for the analytical PID) is generic over this trait, so a
/// different estimator can be dropped in without touching any caller.
///
/// Implementations must be deterministic: the same input yields bit-identical
/// output. Degenerate input (zero variance, too few samples for the estimator)
/// must be reported as [`crate::PidError::NumericalDegeneracy`].
pub trait InformationEstimator: Send + Sync {
    /// Mutual information $I(X; Y)$ in nats, never negative.
    fn mutual_information(&self, x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Result<f64>;

    /// Conditional mutual information $I(X; Y | Z)$ in nats.
    ///
    /// Not clamped: small negative values are estimator bias and are returned as such.
    fn conditional_mutual_information(
        &self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        z: ArrayView1<'_, f64>,
    ) -> Result<f64>;
}

impl<E: InformationEstimator + ?Sized> InformationEstimator for &E {
    fn mutual_information(&self, x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Result<f64> {
        (**self).mutual_information(x, y)
    }

    fn conditional_mutual_information(
        &self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        z: ArrayView1<'_, f64>,
    ) -> Result<f64> {
        (**self).conditional_mutual_information(x, y, z)
    }
}
