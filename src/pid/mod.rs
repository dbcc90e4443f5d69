// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Partial information decomposition strategies.
//!
//! | Strategy | Input | Atoms |
//! |----------|-------|-------|
//! | [`AnalyticalGaussianPid`] | pairwise correlations + MI | redundancy, synergy |
//! | [`DiscretePid`] | symbolised channels | redundancy, unique1, unique2, synergy |
//! | [`ContinuousPid`] | raw channels + k-NN estimator | redundancy, unique1, unique2, synergy |
//!
//! Every strategy decomposes a single [`RoleAssignment`]; applying the three
//! rotations of a triplet is the batch driver's job.

pub mod analytical;
pub mod continuous;
pub mod distribution;
pub mod lattice;
pub mod record;
pub mod roles;

pub use analytical::{AnalyticalGaussianPid, GaussianAtoms, gaussian_pid};
pub use continuous::{ContinuousAtoms, ContinuousPid, continuous_pid};
pub use distribution::{Alphabet, JointDistribution, SupportPolicy};
pub use lattice::{DiscretePid, DiscretePidSolver, PidAtoms, RedundancyLattice};
pub use record::{AnalyticalRecord, PidRecord, TabularRecord};
pub use roles::{ROTATIONS, RoleAssignment};

use crate::error::Result;

/// A PID estimator bound to its input data.
///
/// Implementations hold only read-only state, so one instance can be shared
/// across the batch driver's worker threads.
pub trait DecompositionStrategy: Sync {
    type Record: TabularRecord + Send;

    /// Decompose the information the two sources carry about the target.
    fn decompose(&self, roles: &RoleAssignment<'_>) -> Result<Self::Record>;
}
