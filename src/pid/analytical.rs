// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Closed-form PID for jointly Gaussian variables.
//!
//! With `a = corr(T, S_min)`, `b = corr(S_min, S_max)` and `c = corr(T, S_max)`,
//! where `S_min` is the source sharing less mutual information with the target:
//!
//! redundancy = 1/2 ln(1 / (1 - a^2))
//!
//! synergy = 1/2 ln((1 - b^2)(1 - c^2) / (1 - (a^2 + b^2 + c^2) + 2abc))
//!
//! The denominator is the determinant of the 3x3 correlation matrix, so it is
//! positive exactly when the triple is a valid (positive-definite) correlation
//! structure. Only pairwise statistics are needed, which makes this estimator
//! far cheaper than the discrete and continuous paths.

use crate::error::{PidError, Result};
use crate::pairwise::PairwiseTable;
use crate::pid::DecompositionStrategy;
use crate::pid::record::AnalyticalRecord;
use crate::pid::roles::RoleAssignment;

/// Redundancy and synergy in nats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianAtoms {
    pub redundancy: f64,
    pub synergy: f64,
}

/// Evaluate the closed form for one correlation triple.
///
/// `a` must be the correlation of the target with the lower-MI source; the
/// result is not symmetric in `a` and `c`.
pub fn gaussian_pid(a: f64, b: f64, c: f64) -> Result<GaussianAtoms> {
    let degenerate = || PidError::DegenerateCorrelationTriple { a, b, c };
    if !(a.is_finite() && b.is_finite() && c.is_finite()) {
        return Err(degenerate());
    }

    let (a2, b2, c2) = (a * a, b * b, c * c);
    let redundancy_arg = 1.0 - a2;
    let numerator = (1.0 - b2) * (1.0 - c2);
    let determinant = 1.0 - (a2 + b2 + c2) + 2.0 * a * b * c;
    if redundancy_arg <= 0.0 || numerator <= 0.0 || determinant <= 0.0 {
        return Err(degenerate());
    }

    let redundancy = 0.5 * (1.0 / redundancy_arg).ln();
    let synergy = 0.5 * (numerator / determinant).ln();
    if !(redundancy.is_finite() && synergy.is_finite()) {
        return Err(degenerate());
    }
    Ok(GaussianAtoms { redundancy, synergy })
}

/// Analytical strategy over a precomputed, read-only [`PairwiseTable`].
pub struct AnalyticalGaussianPid<'a> {
    pairwise: &'a PairwiseTable,
}

impl<'a> AnalyticalGaussianPid<'a> {
    pub fn new(pairwise: &'a PairwiseTable) -> Self {
        Self { pairwise }
    }

    /// Order the sources by their MI with the target; ties keep `source1` as the minimum.
    pub fn order_sources<'r>(&self, roles: &RoleAssignment<'r>) -> Result<(&'r str, &'r str)> {
        let i1 = self.pairwise.get(roles.target, roles.source1)?.mutual_information;
        let i2 = self.pairwise.get(roles.target, roles.source2)?.mutual_information;
        if i2 < i1 {
            Ok((roles.source2, roles.source1))
        } else {
            Ok((roles.source1, roles.source2))
        }
    }

    pub fn atoms(&self, roles: &RoleAssignment<'_>) -> Result<GaussianAtoms> {
        let (source_min, source_max) = self.order_sources(roles)?;
        let a = self.pairwise.get(roles.target, source_min)?.correlation;
        let b = self.pairwise.get(source_min, source_max)?.correlation;
        let c = self.pairwise.get(roles.target, source_max)?.correlation;
        gaussian_pid(a, b, c)
    }
}

impl DecompositionStrategy for AnalyticalGaussianPid<'_> {
    type Record = AnalyticalRecord;

    fn decompose(&self, roles: &RoleAssignment<'_>) -> Result<AnalyticalRecord> {
        let atoms = self.atoms(roles)?;
        Ok(AnalyticalRecord::new(roles, atoms.synergy, atoms.redundancy))
    }
}
