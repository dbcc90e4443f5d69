// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by every estimator, the enumerator and the batch driver.
//!
//! The first four variants are per-triplet conditions: the batch driver skips
//! the affected triplet and keeps going. The remaining variants come from the
//! surrounding plumbing (files, CSV, JSON, interruption) and abort a run.

use thiserror::Error;

/// Convenient `Result` alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PidError>;

#[derive(Debug, Error)]
pub enum PidError {
    /// An information estimator was handed input it cannot resolve
    /// (zero variance, too few samples, non-finite values, ...).
    #[error("numerical degeneracy: {0}")]
    NumericalDegeneracy(String),

    /// The discrete joint distribution has too little support for the lattice.
    #[error("distribution underflow: {0}")]
    DistributionUnderflow(String),

    /// Pairwise correlations do not form a positive-definite 3x3 matrix.
    #[error("degenerate correlation triple (a = {a}, b = {b}, c = {c})")]
    DegenerateCorrelationTriple {
        /// Correlation of the target with the lower-MI source.
        a: f64,
        /// Correlation between the two sources.
        b: f64,
        /// Correlation of the target with the higher-MI source.
        c: f64,
    },

    /// Malformed channel groups, triplets or pipeline settings.
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    /// The batch was stopped between two triplets.
    #[error("batch interrupted after {completed} of {total} triplets")]
    Interrupted { completed: usize, total: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PidError {
    pub(crate) fn degenerate(msg: impl Into<String>) -> Self {
        PidError::NumericalDegeneracy(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        PidError::ConfigurationError(msg.into())
    }

    pub(crate) fn underflow(msg: impl Into<String>) -> Self {
        PidError::DistributionUnderflow(msg.into())
    }

    /// Whether the batch driver may skip the failing triplet and continue.
    pub fn is_per_triplet(&self) -> bool {
        matches!(
            self,
            PidError::NumericalDegeneracy(_)
                | PidError::DistributionUnderflow(_)
                | PidError::DegenerateCorrelationTriple { .. }
                | PidError::ConfigurationError(_)
        )
    }
}
