// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exact Williams–Beer partial information decomposition for two discrete sources.
//!
//! The specific information a source collection A carries about one target
//! outcome is
//!
//! I(T=t; A) = sum_a p(a|t) log(p(t|a) / p(t))
//!
//! and the redundancy of a lattice node (an antichain of source collections) is
//!
//! I_min(T; A_1, ..., A_m) = sum_t p(t) min_i I(T=t; A_i).
//!
//! For two sources the redundancy lattice is `{1}{2} < {1}, {2} < {1:2}`. The
//! atoms are recovered by Möbius inversion: each node's partial information is
//! its cumulative I_min minus the atoms strictly below it.

use ndarray::ArrayView1;

use crate::data::SymbolTable;
use crate::error::Result;
use crate::pid::DecompositionStrategy;
use crate::pid::distribution::{Alphabet, JointDistribution, SupportPolicy};
use crate::pid::record::PidRecord;
use crate::pid::roles::RoleAssignment;

/// One node of the redundancy lattice.
#[derive(Debug, Clone)]
pub struct LatticeNode {
    /// Label in the usual PID notation, e.g. `{1}{2}`.
    pub label: &'static str,
    /// Source collections of the antichain; indices are source axes (0 or 1).
    pub collections: Vec<Vec<usize>>,
    /// Indices of nodes strictly below this one.
    pub below: Vec<usize>,
}

/// Redundancy lattice, nodes listed bottom-up.
#[derive(Debug, Clone)]
pub struct RedundancyLattice {
    nodes: Vec<LatticeNode>,
}

impl RedundancyLattice {
    pub const REDUNDANCY: usize = 0;
    pub const UNIQUE1: usize = 1;
    pub const UNIQUE2: usize = 2;
    pub const SYNERGY: usize = 3;

    pub fn two_sources() -> Self {
        let node = |label, collections, below| LatticeNode { label, collections, below };
        Self {
            nodes: vec![
                node("{1}{2}", vec![vec![0], vec![1]], vec![]),
                node("{1}", vec![vec![0]], vec![0]),
                node("{2}", vec![vec![1]], vec![0]),
                node("{1:2}", vec![vec![0, 1]], vec![0, 1, 2]),
            ],
        }
    }

    pub fn nodes(&self) -> &[LatticeNode] {
        &self.nodes
    }

    /// Partial information of every node from the cumulative redundancies.
    pub fn mobius_inversion(&self, cumulative: &[f64]) -> Vec<f64> {
        let mut partial = vec![0.0; self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate() {
            let below: f64 = node.below.iter().map(|&j| partial[j]).sum();
            partial[i] = cumulative[i] - below;
        }
        partial
    }
}

/// The four atoms plus the total they decompose, in the solver's log base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidAtoms {
    pub redundancy: f64,
    pub unique1: f64,
    pub unique2: f64,
    pub synergy: f64,
    /// I(S1, S2; T); equals the sum of the four atoms.
    pub joint_mutual_information: f64,
}

/// Specific information of each target outcome about a source collection.
fn specific_information(dist: &JointDistribution, sources: &[usize], p_t: &[f64]) -> Vec<f64> {
    let table = dist.source_target_table(sources);
    let mut specific = vec![0.0; p_t.len()];
    for row in table.iter() {
        let p_a: f64 = row.iter().sum();
        if p_a == 0.0 {
            continue;
        }
        for (t, &p_at) in row.iter().enumerate() {
            if p_at > 0.0 {
                // p(a|t) * ln(p(t|a) / p(t))
                specific[t] += p_at / p_t[t] * (p_at / (p_a * p_t[t])).ln();
            }
        }
    }
    specific
}

/// Exact lattice PID over the empirical joint distribution of three symbol series.
#[derive(Debug, Clone)]
pub struct DiscretePidSolver {
    base: f64,
    support: SupportPolicy,
    min_samples: usize,
    lattice: RedundancyLattice,
}

impl Default for DiscretePidSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscretePidSolver {
    pub fn new() -> Self {
        Self {
            base: std::f64::consts::E,
            support: SupportPolicy::default(),
            min_samples: 1,
            lattice: RedundancyLattice::two_sources(),
        }
    }

    /// Set logarithm base (default e)
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    pub fn with_support(mut self, support: SupportPolicy) -> Self {
        self.support = support;
        self
    }

    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples.max(1);
        self
    }

    /// Decompose with alphabets inferred from the observed symbols.
    pub fn solve(
        &self,
        source1: ArrayView1<'_, i32>,
        source2: ArrayView1<'_, i32>,
        target: ArrayView1<'_, i32>,
    ) -> Result<PidAtoms> {
        let alphabets = [
            Alphabet::inferred(source1)?,
            Alphabet::inferred(source2)?,
            Alphabet::inferred(target)?,
        ];
        self.solve_with_alphabets(source1, source2, target, [&alphabets[0], &alphabets[1], &alphabets[2]])
    }

    /// Decompose with an explicit finite alphabet per variable.
    pub fn solve_with_alphabets(
        &self,
        source1: ArrayView1<'_, i32>,
        source2: ArrayView1<'_, i32>,
        target: ArrayView1<'_, i32>,
        alphabets: [&Alphabet; 3],
    ) -> Result<PidAtoms> {
        let dist = JointDistribution::from_observations(
            source1,
            source2,
            target,
            alphabets,
            self.support,
            self.min_samples,
        )?;
        Ok(self.decompose_distribution(&dist))
    }

    pub fn decompose_distribution(&self, dist: &JointDistribution) -> PidAtoms {
        let p_t = dist.target_marginal();
        let ln_base = self.base.ln();

        let cumulative: Vec<f64> = self
            .lattice
            .nodes()
            .iter()
            .map(|node| {
                let specifics: Vec<Vec<f64>> = node
                    .collections
                    .iter()
                    .map(|sources| specific_information(dist, sources, &p_t))
                    .collect();
                let i_min: f64 = p_t
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| **p > 0.0)
                    .map(|(t, p)| p * specifics.iter().map(|s| s[t]).fold(f64::INFINITY, f64::min))
                    .sum();
                i_min / ln_base
            })
            .collect();

        let partial = self.lattice.mobius_inversion(&cumulative);
        PidAtoms {
            redundancy: partial[RedundancyLattice::REDUNDANCY],
            unique1: partial[RedundancyLattice::UNIQUE1],
            unique2: partial[RedundancyLattice::UNIQUE2],
            synergy: partial[RedundancyLattice::SYNERGY],
            joint_mutual_information: cumulative[RedundancyLattice::SYNERGY],
        }
    }
}

/// Discrete strategy over a symbolised channel table.
pub struct DiscretePid<'a> {
    symbols: &'a SymbolTable,
    solver: DiscretePidSolver,
}

impl<'a> DiscretePid<'a> {
    pub fn new(symbols: &'a SymbolTable, solver: DiscretePidSolver) -> Self {
        Self { symbols, solver }
    }

    pub fn atoms(&self, roles: &RoleAssignment<'_>) -> Result<PidAtoms> {
        let (s1, a1) = self.symbols.column(roles.source1)?;
        let (s2, a2) = self.symbols.column(roles.source2)?;
        let (t, at) = self.symbols.column(roles.target)?;
        self.solver.solve_with_alphabets(s1, s2, t, [a1, a2, at])
    }
}

impl DecompositionStrategy for DiscretePid<'_> {
    type Record = PidRecord;

    fn decompose(&self, roles: &RoleAssignment<'_>) -> Result<PidRecord> {
        let a = self.atoms(roles)?;
        Ok(PidRecord::new(roles, a.synergy, a.unique1, a.unique2, a.redundancy))
    }
}
