use ndarray::{Array1, ArrayView1};

use crate::error::{PidError, Result};

/// Reject inputs the k-NN estimators cannot resolve.
///
/// All series must share one length, hold only finite values and provide at
/// least `k + 1` samples so every point has k neighbours besides itself.
pub fn check_inputs(series: &[ArrayView1<'_, f64>], k: usize) -> Result<usize> {
    if k == 0 {
        return Err(PidError::degenerate("neighbour count k must be >= 1"));
    }
    let n = series.first().map_or(0, |s| s.len());
    if let Some(bad) = series.iter().find(|s| s.len() != n) {
        return Err(PidError::degenerate(format!(
            "series lengths differ ({} vs {})",
            n,
            bad.len()
        )));
    }
    if n < k + 1 {
        return Err(PidError::degenerate(format!(
            "{n} samples is fewer than k + 1 = {}",
            k + 1
        )));
    }
    if series.iter().any(|s| s.iter().any(|v| !v.is_finite())) {
        return Err(PidError::degenerate("series contains non-finite values"));
    }
    Ok(n)
}

/// Rescale a series to zero mean and unit (population) variance.
///
/// Fails on zero-variance input, which carries no information and would
/// collapse every max-norm neighbourhood onto a single axis.
pub fn standardize(data: ArrayView1<'_, f64>) -> Result<Array1<f64>> {
    let mean = data
        .mean()
        .ok_or_else(|| PidError::degenerate("empty series"))?;
    let std = data.std(0.0);
    if !(std > f64::EPSILON * mean.abs().max(1.0)) {
        return Err(PidError::degenerate("series has zero variance"));
    }
    Ok(data.mapv(|v| (v - mean) / std))
}
