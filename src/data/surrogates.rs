//! Correlation-matched surrogate tables for null-hypothesis testing.
//!
//! Gaussian surrogates mix white noise with the lower Cholesky factor `L` of the
//! empirical Pearson matrix `C = L L^T`, so the surrogate channels share the
//! pairwise linear structure of the recording and nothing else.

use ndarray::{Array2, ArrayView2, Axis};
use ndarray_stats::CorrelationExt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use crate::data::ChannelTable;
use crate::error::{PidError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurrogateMethod {
    /// `L · N(0, I)`.
    #[default]
    GaussianCholesky,
    /// Each channel shuffled in time and standardised, then mixed by `L`.
    PermutedCholesky,
    /// Each channel shuffled in time independently; destroys all coupling.
    Permutation,
}

/// Lower-triangular `L` with `L L^T = a` for a symmetric positive-definite `a`.
pub fn cholesky_lower(a: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    let k = a.nrows();
    if a.ncols() != k {
        return Err(PidError::config(format!("cholesky needs a square matrix, got {:?}", a.dim())));
    }
    let mut l = Array2::<f64>::zeros((k, k));
    for i in 0..k {
        for j in 0..=i {
            let mut sum = a[(i, j)];
            for p in 0..j {
                sum -= l[(i, p)] * l[(j, p)];
            }
            if i == j {
                if !(sum > 0.0 && sum.is_finite()) {
                    return Err(PidError::degenerate(format!(
                        "correlation matrix is not positive definite (pivot {i} = {sum})"
                    )));
                }
                l[(i, i)] = sum.sqrt();
            } else {
                l[(i, j)] = sum / l[(j, j)];
            }
        }
    }
    Ok(l)
}

/// Pearson matrix of the channels (columns) of a samples x channels table.
pub fn correlation_matrix(data: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    let corr = data
        .t()
        .pearson_correlation()
        .map_err(|_| PidError::degenerate("correlation of an empty table"))?;
    if corr.iter().any(|v| !v.is_finite()) {
        return Err(PidError::degenerate("channel with zero variance in correlation matrix"));
    }
    Ok(corr)
}

fn shuffle_columns(data: &mut Array2<f64>, rng: &mut StdRng) {
    for mut column in data.axis_iter_mut(Axis(1)) {
        let mut values = column.to_vec();
        values.shuffle(rng);
        column.iter_mut().zip(values).for_each(|(dst, v)| *dst = v);
    }
}

fn standardize_columns(data: &mut Array2<f64>) -> Result<()> {
    for (j, mut column) in data.axis_iter_mut(Axis(1)).enumerate() {
        let mean = column.mean().unwrap_or(0.0);
        let std = column.std(0.0);
        if !(std > 0.0 && std.is_finite()) {
            return Err(PidError::degenerate(format!("channel {j} has zero variance")));
        }
        column.mapv_inplace(|v| (v - mean) / std);
    }
    Ok(())
}

/// Seeded surrogate source; the same seed and input give the same table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurrogateGenerator {
    method: SurrogateMethod,
    seed: u64,
}

impl SurrogateGenerator {
    pub fn new(method: SurrogateMethod, seed: u64) -> Self {
        Self { method, seed }
    }

    pub fn method(&self) -> SurrogateMethod {
        self.method
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    pub fn generate(&self, table: &ChannelTable) -> Result<ChannelTable> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let (n, c) = table.data().dim();
        let data = match self.method {
            SurrogateMethod::Permutation => {
                let mut data = table.data().to_owned();
                shuffle_columns(&mut data, &mut rng);
                data
            }
            SurrogateMethod::GaussianCholesky => {
                let l = cholesky_lower(correlation_matrix(table.data().view())?.view())?;
                let noise = Array2::<f64>::from_shape_fn((c, n), |_| StandardNormal.sample(&mut rng));
                l.dot(&noise).reversed_axes()
            }
            SurrogateMethod::PermutedCholesky => {
                let l = cholesky_lower(correlation_matrix(table.data().view())?.view())?;
                let mut shuffled = table.data().to_owned();
                shuffle_columns(&mut shuffled, &mut rng);
                standardize_columns(&mut shuffled)?;
                l.dot(&shuffled.t()).reversed_axes()
            }
        };
        table.with_data(data)
    }
}
