// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # eeg-pid
//!
//! Partial information decomposition (PID) over EEG channel triplets: how much
//! information two source channels carry about a third target channel
//! redundantly, uniquely, and only jointly (synergy).
//!
//! ## Quick Start
//!
//! ```rust
//! use eeg_pid::pid::gaussian_pid;
//!
//! # fn main() -> eeg_pid::Result<()> {
//! // corr(T, S_min), corr(S_min, S_max), corr(T, S_max)
//! let atoms = gaussian_pid(0.3, 0.1, 0.6)?;
//! assert!(atoms.redundancy > 0.0);
//! assert!(gaussian_pid(0.99, 0.99, -0.99).is_err());
//! # Ok(())
//! # }
//! ```
//!
//! ## Estimators
//!
//! | Estimator | Input | Atoms |
//! |-----------|-------|-------|
//! | Analytical Gaussian | pairwise correlation + MI | redundancy, synergy |
//! | Discrete (Williams–Beer I_min) | binarised / symbolised channels | all four |
//! | Continuous (k-NN MI / CMI) | raw channels | all four |
//!
//! ## Architecture
//!
//! 1. **Topology**: [`topology`] enumerates triplets and pairs over two channel
//!    groups sharing a boundary set.
//! 2. **Estimation**: [`estimators`] (KSG mutual information and conditional
//!    mutual information) and [`pid`] (the three decomposition strategies).
//! 3. **Driver**: [`pairwise`] precomputes the read-only pair table,
//!    [`batch`] applies a strategy to every triplet under all three role
//!    rotations, [`results`] persists the rows as CSV.
//! 4. **Pipeline**: [`pipeline`] wires a [`config::PipelineConfig`] to a
//!    [`data::ChannelTable`], including surrogate runs.
//!
//! Every information quantity is in nats unless a discrete log base is set.

pub mod batch;
pub mod config;
pub mod data;
pub mod error;
pub mod estimators;
pub mod pairwise;
pub mod pid;
pub mod pipeline;
pub mod results;
pub mod topology;

pub use error::{PidError, Result};
