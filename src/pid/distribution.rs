//! Empirical joint distribution of (source1, source2, target) symbols.

use ndarray::{Array3, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::error::{PidError, Result};

/// Finite, ordered set of symbols a discrete variable may take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    symbols: Vec<i32>,
}

impl Alphabet {
    pub fn new(symbols: impl IntoIterator<Item = i32>) -> Result<Self> {
        let mut symbols: Vec<i32> = symbols.into_iter().collect();
        symbols.sort_unstable();
        symbols.dedup();
        if symbols.is_empty() {
            return Err(PidError::config("alphabet must contain at least one symbol"));
        }
        Ok(Self { symbols })
    }

    pub fn binary() -> Self {
        Self { symbols: vec![0, 1] }
    }

    /// Symbols `0..size`.
    pub fn with_size(size: usize) -> Result<Self> {
        Self::new(0..size as i32)
    }

    /// Alphabet made of the symbols actually observed.
    pub fn inferred(data: ArrayView1<'_, i32>) -> Result<Self> {
        Self::new(data.iter().copied())
            .map_err(|_| PidError::underflow("cannot infer an alphabet from an empty series"))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[i32] {
        &self.symbols
    }

    pub fn index_of(&self, symbol: i32) -> Option<usize> {
        self.symbols.binary_search(&symbol).ok()
    }
}

/// How to treat joint cells that were never observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportPolicy {
    /// Unobserved cells are zero-probability and drop out of every sum.
    #[default]
    ObservedSupport,
    /// Every cell of the declared joint alphabet must be observed at least once.
    FullSupport,
}

/// Normalised co-occurrence frequencies, axes `(source1, source2, target)`.
#[derive(Debug, Clone)]
pub struct JointDistribution {
    probs: Array3<f64>,
    n: usize,
}

impl JointDistribution {
    pub fn from_observations(
        source1: ArrayView1<'_, i32>,
        source2: ArrayView1<'_, i32>,
        target: ArrayView1<'_, i32>,
        alphabets: [&Alphabet; 3],
        support: SupportPolicy,
        min_samples: usize,
    ) -> Result<Self> {
        let n = target.len();
        if source1.len() != n || source2.len() != n {
            return Err(PidError::config(format!(
                "series lengths differ ({}, {}, {n})",
                source1.len(),
                source2.len()
            )));
        }
        if n == 0 || n < min_samples {
            return Err(PidError::underflow(format!(
                "{n} joint observations, at least {} required",
                min_samples.max(1)
            )));
        }

        let shape = (alphabets[0].len(), alphabets[1].len(), alphabets[2].len());
        let mut counts = Array3::<usize>::zeros(shape);
        let lookup = |alphabet: &Alphabet, role: &str, symbol: i32| {
            alphabet.index_of(symbol).ok_or_else(|| {
                PidError::config(format!(
                    "{role} symbol {symbol} is outside its alphabet {:?}",
                    alphabet.symbols()
                ))
            })
        };
        for i in 0..n {
            let a = lookup(alphabets[0], "source1", source1[i])?;
            let b = lookup(alphabets[1], "source2", source2[i])?;
            let t = lookup(alphabets[2], "target", target[i])?;
            counts[(a, b, t)] += 1;
        }

        if support == SupportPolicy::FullSupport {
            let empty = counts.iter().filter(|&&c| c == 0).count();
            if empty > 0 {
                return Err(PidError::underflow(format!(
                    "{empty} of {} joint cells unobserved in {n} samples",
                    counts.len()
                )));
            }
        }

        let n_f = n as f64;
        Ok(Self { probs: counts.mapv(|c| c as f64 / n_f), n })
    }

    pub fn n_samples(&self) -> usize {
        self.n
    }

    pub fn probabilities(&self) -> &Array3<f64> {
        &self.probs
    }

    /// Joint table `p(a, t)` where `a` ranges over the product alphabet of the
    /// selected source axes (0 = source1, 1 = source2).
    pub fn source_target_table(&self, sources: &[usize]) -> Vec<Vec<f64>> {
        let (d1, d2, dt) = self.probs.dim();
        let width = |axis: usize| if axis == 0 { d1 } else { d2 };
        let rows: usize = sources.iter().map(|&s| width(s)).product();
        let mut table = vec![vec![0.0; dt]; rows];
        for ((i, j, t), &p) in self.probs.indexed_iter() {
            if p == 0.0 {
                continue;
            }
            let mut row = 0;
            for &s in sources {
                row = row * width(s) + if s == 0 { i } else { j };
            }
            table[row][t] += p;
        }
        table
    }

    /// Target marginal `p(t)`.
    pub fn target_marginal(&self) -> Vec<f64> {
        let (_, _, dt) = self.probs.dim();
        let mut pt = vec![0.0; dt];
        for ((_, _, t), &p) in self.probs.indexed_iter() {
            pt[t] += p;
        }
        pt
    }
}
