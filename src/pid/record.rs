//! Typed output rows, one per (triplet, role assignment).

use serde::{Deserialize, Serialize};

use crate::pid::roles::RoleAssignment;

/// A row type with a fixed CSV column layout.
pub trait TabularRecord: Serialize {
    const COLUMNS: &'static [&'static str];
}

/// Output of the analytical Gaussian estimator, which has no unique atoms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticalRecord {
    pub source1: String,
    pub source2: String,
    pub target: String,
    pub synergy: f64,
    pub redundancy: f64,
}

impl AnalyticalRecord {
    pub fn new(roles: &RoleAssignment<'_>, synergy: f64, redundancy: f64) -> Self {
        Self {
            source1: roles.source1.to_string(),
            source2: roles.source2.to_string(),
            target: roles.target.to_string(),
            synergy,
            redundancy,
        }
    }
}

impl TabularRecord for AnalyticalRecord {
    const COLUMNS: &'static [&'static str] =
        &["source1", "source2", "target", "synergy", "redundancy"];
}

/// Full four-atom output of the discrete and continuous estimators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidRecord {
    pub source1: String,
    pub source2: String,
    pub target: String,
    pub synergy: f64,
    pub unique1: f64,
    pub unique2: f64,
    pub redundancy: f64,
}

impl PidRecord {
    pub fn new(
        roles: &RoleAssignment<'_>,
        synergy: f64,
        unique1: f64,
        unique2: f64,
        redundancy: f64,
    ) -> Self {
        Self {
            source1: roles.source1.to_string(),
            source2: roles.source2.to_string(),
            target: roles.target.to_string(),
            synergy,
            unique1,
            unique2,
            redundancy,
        }
    }
}

impl TabularRecord for PidRecord {
    const COLUMNS: &'static [&'static str] = &[
        "source1",
        "source2",
        "target",
        "synergy",
        "unique1",
        "unique2",
        "redundancy",
    ];
}
