// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel topology and exhaustive triplet / pair enumeration.
//!
//! The montage is split into two hemisphere groups that share a set of midline
//! (boundary) channels. Every 3-combination of each group is analysed, except
//! that right-group combinations made only of boundary channels are dropped:
//! the left group already produced them. Pairs follow the same rule.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{PidError, Result};

/// Two channel groups that overlap on their boundary channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelTopology {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl ChannelTopology {
    pub fn new<S: Into<String>>(
        left: impl IntoIterator<Item = S>,
        right: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let topology = Self {
            left: left.into_iter().map(Into::into).collect(),
            right: right.into_iter().map(Into::into).collect(),
        };
        topology.validate()?;
        Ok(topology)
    }

    /// The 10-20 montage of the arithmetic-task recordings: 8 lateral channels
    /// per hemisphere plus the Fz/Cz/Pz midline shared by both.
    pub fn eeg_10_20() -> Self {
        let left = [
            "EEG Fp1", "EEG F3", "EEG F7", "EEG T3", "EEG C3", "EEG T5", "EEG P3", "EEG O1",
            "EEG Fz", "EEG Cz", "EEG Pz",
        ];
        let right = [
            "EEG Fp2", "EEG F4", "EEG F8", "EEG T4", "EEG C4", "EEG T6", "EEG P4", "EEG O2",
            "EEG Fz", "EEG Cz", "EEG Pz",
        ];
        Self {
            left: left.iter().map(|s| s.to_string()).collect(),
            right: right.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (side, group) in [("left", &self.left), ("right", &self.right)] {
            if group.len() < 3 {
                return Err(PidError::config(format!(
                    "{side} channel group has {} channels, a triplet needs 3",
                    group.len()
                )));
            }
            let mut seen = HashSet::with_capacity(group.len());
            for name in group {
                if name.trim().is_empty() {
                    return Err(PidError::config(format!(
                        "{side} channel group contains an empty label"
                    )));
                }
                if !seen.insert(name.as_str()) {
                    return Err(PidError::config(format!(
                        "channel '{name}' listed twice in the {side} group"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Channels present in both groups, in left-group order.
    pub fn boundary(&self) -> Vec<&str> {
        let right: HashSet<&str> = self.right.iter().map(String::as_str).collect();
        self.left
            .iter()
            .map(String::as_str)
            .filter(|c| right.contains(c))
            .collect()
    }

    pub fn is_boundary(&self, channel: &str) -> bool {
        self.left.iter().any(|c| c == channel) && self.right.iter().any(|c| c == channel)
    }

    /// Every distinct channel, left group first.
    pub fn channels(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.left
            .iter()
            .chain(self.right.iter())
            .map(String::as_str)
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

/// Unordered pair of channels, the key of every pairwise statistic.
///
/// The labels are stored sorted, so `{A, B}` and `{B, A}` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelPair {
    first: String,
    second: String,
}

impl ChannelPair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn channels(&self) -> (&str, &str) {
        (&self.first, &self.second)
    }
}

impl fmt::Display for ChannelPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.first, self.second)
    }
}

/// Three distinct channels.
///
/// The channels keep their enumeration order (it drives the role rotation),
/// while equality and hashing ignore order.
#[derive(Debug, Clone)]
pub struct Triplet {
    channels: [String; 3],
}

impl Triplet {
    pub fn new(a: impl Into<String>, b: impl Into<String>, c: impl Into<String>) -> Result<Self> {
        let channels = [a.into(), b.into(), c.into()];
        if channels[0] == channels[1] || channels[0] == channels[2] || channels[1] == channels[2] {
            return Err(PidError::config(format!(
                "triplet needs three distinct channels, got {channels:?}"
            )));
        }
        Ok(Self { channels })
    }

    pub fn channels(&self) -> &[String; 3] {
        &self.channels
    }

    fn sorted_key(&self) -> [&str; 3] {
        let mut key = [
            self.channels[0].as_str(),
            self.channels[1].as_str(),
            self.channels[2].as_str(),
        ];
        key.sort_unstable();
        key
    }
}

impl PartialEq for Triplet {
    fn eq(&self, other: &Self) -> bool {
        self.sorted_key() == other.sorted_key()
    }
}

impl Eq for Triplet {}

impl Hash for Triplet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted_key().hash(state);
    }
}

impl fmt::Display for Triplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.channels[0], self.channels[1], self.channels[2]
        )
    }
}

/// Lexicographic k-combinations of `0..n` (itertools order).
fn index_combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    if k > n {
        return out;
    }
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        out.push(idx.clone());
        let Some(i) = (0..k).rev().find(|&i| idx[i] != i + n - k) else {
            return out;
        };
        idx[i] += 1;
        for j in i + 1..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

/// Deterministic triplet and pair enumeration over a [`ChannelTopology`].
pub struct TripletEnumerator<'a> {
    topology: &'a ChannelTopology,
}

impl<'a> TripletEnumerator<'a> {
    pub fn new(topology: &'a ChannelTopology) -> Result<Self> {
        topology.validate()?;
        Ok(Self { topology })
    }

    /// Combinations of one group, dropping those fully inside the boundary
    /// when `skip_boundary_only` is set.
    fn group_combinations<'g>(
        &self,
        group: &'g [String],
        k: usize,
        skip_boundary_only: bool,
    ) -> Vec<Vec<&'g str>> {
        index_combinations(group.len(), k)
            .into_iter()
            .map(|idx| idx.iter().map(|&i| group[i].as_str()).collect::<Vec<_>>())
            .filter(|combo| {
                !(skip_boundary_only && combo.iter().all(|c| self.topology.is_boundary(c)))
            })
            .collect()
    }

    /// Every distinct triplet: all left combinations, then the right ones not
    /// made entirely of boundary channels.
    pub fn triplets(&self) -> Vec<Triplet> {
        self.group_combinations(&self.topology.left, 3, false)
            .into_iter()
            .chain(self.group_combinations(&self.topology.right, 3, true))
            .map(|c| Triplet {
                channels: [c[0].to_string(), c[1].to_string(), c[2].to_string()],
            })
            .collect()
    }

    /// Every distinct pair, under the same boundary rule as [`Self::triplets`].
    pub fn pairs(&self) -> Vec<ChannelPair> {
        self.group_combinations(&self.topology.left, 2, false)
            .into_iter()
            .chain(self.group_combinations(&self.topology.right, 2, true))
            .map(|c| ChannelPair::new(c[0], c[1]))
            .collect()
    }
}
