//! Minimum-information PID for continuous variables.
//!
//! Williams and Beer's I_min with the specific-information terms replaced by
//! k-NN mutual information estimates:
//!
//! ```text
//! I1  = I(S1; T)
//! I2  = I(S2; T)
//! I12 = I(T; S1 | S2) + I(T; S2)
//! r   = min(I1, I2),  u1 = I1 - r,  u2 = I2 - r,  s = I12 - u1 - u2 - r
//! ```
//!
//! Nothing is clamped. Estimator noise can push the synergy (and, through a
//! negative CMI, the joint information) below zero, and downstream surrogate
//! tests need to see that bias rather than have it hidden.

use ndarray::ArrayView1;

use crate::data::ChannelTable;
use crate::error::Result;
use crate::estimators::traits::InformationEstimator;
use crate::pid::DecompositionStrategy;
use crate::pid::record::PidRecord;
use crate::pid::roles::RoleAssignment;

/// Atoms plus the information terms they were derived from, in nats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousAtoms {
    pub i1: f64,
    pub i2: f64,
    pub i12: f64,
    pub redundancy: f64,
    pub unique1: f64,
    pub unique2: f64,
    pub synergy: f64,
}

pub fn continuous_pid<E: InformationEstimator + ?Sized>(
    estimator: &E,
    source1: ArrayView1<'_, f64>,
    source2: ArrayView1<'_, f64>,
    target: ArrayView1<'_, f64>,
) -> Result<ContinuousAtoms> {
    let i1 = estimator.mutual_information(source1, target)?;
    let i2 = estimator.mutual_information(source2, target)?;
    let i12 = estimator.conditional_mutual_information(target, source1, source2)?
        + estimator.mutual_information(target, source2)?;

    let redundancy = i1.min(i2);
    let unique1 = i1 - redundancy;
    let unique2 = i2 - redundancy;
    let synergy = i12 - unique1 - unique2 - redundancy;
    Ok(ContinuousAtoms { i1, i2, i12, redundancy, unique1, unique2, synergy })
}

/// Continuous strategy over a channel table and any information estimator.
pub struct ContinuousPid<'a, E> {
    data: &'a ChannelTable,
    estimator: E,
}

impl<'a, E: InformationEstimator> ContinuousPid<'a, E> {
    pub fn new(data: &'a ChannelTable, estimator: E) -> Self {
        Self { data, estimator }
    }

    pub fn atoms(&self, roles: &RoleAssignment<'_>) -> Result<ContinuousAtoms> {
        continuous_pid(
            &self.estimator,
            self.data.column(roles.source1)?,
            self.data.column(roles.source2)?,
            self.data.column(roles.target)?,
        )
    }
}

impl<E: InformationEstimator> DecompositionStrategy for ContinuousPid<'_, E> {
    type Record = PidRecord;

    fn decompose(&self, roles: &RoleAssignment<'_>) -> Result<PidRecord> {
        let a = self.atoms(roles)?;
        Ok(PidRecord::new(roles, a.synergy, a.unique1, a.unique2, a.redundancy))
    }
}
