//! Channel discretisation for the discrete PID path.

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::data::ChannelTable;
use crate::error::{PidError, Result};
use crate::pid::distribution::Alphabet;

/// How continuous channels are turned into small-alphabet symbols.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Discretization {
    /// 1 where the sample is at or below the channel median, 0 above it.
    #[default]
    Binarize,
    /// Symbol = number of per-channel percentile boundaries at or below the sample.
    Symbolize { percentiles: Vec<f64> },
}

impl Discretization {
    pub fn validate(&self) -> Result<()> {
        if let Discretization::Symbolize { percentiles } = self {
            if percentiles.is_empty() {
                return Err(PidError::config("percentile discretisation needs at least one boundary"));
            }
            if percentiles.iter().any(|q| !(0.0..=100.0).contains(q)) {
                return Err(PidError::config("percentiles must lie in [0, 100]"));
            }
            if percentiles.windows(2).any(|w| w[0] >= w[1]) {
                return Err(PidError::config("percentiles must be strictly increasing"));
            }
        }
        Ok(())
    }

    /// Alphabet every discretised channel draws from.
    pub fn alphabet(&self) -> Result<Alphabet> {
        match self {
            Discretization::Binarize => Ok(Alphabet::binary()),
            Discretization::Symbolize { percentiles } => Alphabet::with_size(percentiles.len() + 1),
        }
    }

    pub fn apply(&self, table: &ChannelTable) -> Result<SymbolTable> {
        self.validate()?;
        let alphabet = self.alphabet()?;
        let mut data = Array2::<i32>::zeros((table.n_samples(), table.n_channels()));
        for (j, name) in table.names().iter().enumerate() {
            let column = table.data().column(j);
            let mut sorted = column.to_vec();
            if sorted.is_empty() {
                return Err(PidError::degenerate(format!("channel '{name}' is empty")));
            }
            if sorted.iter().any(|v| !v.is_finite()) {
                return Err(PidError::degenerate(format!("channel '{name}' has non-finite samples")));
            }
            sorted.sort_unstable_by(|a, b| a.total_cmp(b));
            let symbols = match self {
                Discretization::Binarize => binarize(column, percentile(&sorted, 50.0)),
                Discretization::Symbolize { percentiles } => {
                    let bounds: Vec<f64> = percentiles.iter().map(|&q| percentile(&sorted, q)).collect();
                    digitize(column, &bounds)
                }
            };
            data.column_mut(j).assign(&ArrayView1::from(&symbols));
        }
        SymbolTable::new(
            table.names().to_vec(),
            data,
            vec![alphabet; table.n_channels()],
        )
    }
}

/// Linearly interpolated percentile of sorted data.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn binarize(column: ArrayView1<'_, f64>, median: f64) -> Vec<i32> {
    column.iter().map(|&v| i32::from(v <= median)).collect()
}

fn digitize(column: ArrayView1<'_, f64>, bounds: &[f64]) -> Vec<i32> {
    column
        .iter()
        .map(|&v| bounds.iter().filter(|&&b| b <= v).count() as i32)
        .collect()
}

/// Discretised counterpart of a [`ChannelTable`], with one alphabet per channel.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    names: Vec<String>,
    index: HashMap<String, usize>,
    data: Array2<i32>,
    alphabets: Vec<Alphabet>,
}

impl SymbolTable {
    pub fn new(names: Vec<String>, data: Array2<i32>, alphabets: Vec<Alphabet>) -> Result<Self> {
        if names.len() != data.ncols() || alphabets.len() != data.ncols() {
            return Err(PidError::config(format!(
                "{} names and {} alphabets for {} columns",
                names.len(),
                alphabets.len(),
                data.ncols()
            )));
        }
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(PidError::config(format!("duplicate channel '{name}'")));
            }
        }
        Ok(Self { names, index, data, alphabets })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn data(&self) -> &Array2<i32> {
        &self.data
    }

    pub fn column(&self, name: &str) -> Result<(ArrayView1<'_, i32>, &Alphabet)> {
        let j = *self
            .index
            .get(name)
            .ok_or_else(|| PidError::config(format!("unknown channel '{name}'")))?;
        Ok((self.data.column(j), &self.alphabets[j]))
    }
}
