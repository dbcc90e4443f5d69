//! Serializable pipeline configuration.
//!
//! A [`PipelineConfig`] names the channel topology, the PID estimator and its
//! parameters, and whether triplets are evaluated on the rayon pool. It is
//! stored as JSON so an analysis can be rerun with identical settings.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::data::Discretization;
use crate::error::{PidError, Result};
use crate::estimators::approaches::ksg::DEFAULT_NEIGHBOURS;
use crate::pid::SupportPolicy;
use crate::topology::ChannelTopology;

fn default_neighbours() -> usize {
    DEFAULT_NEIGHBOURS
}

fn default_log_base() -> f64 {
    std::f64::consts::E
}

fn default_min_samples() -> usize {
    1
}

/// Which decomposition to run, with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimatorConfig {
    /// Closed-form Gaussian PID; `neighbours` is the k of the pairwise MI used to
    /// order the sources.
    Analytical {
        #[serde(default = "default_neighbours")]
        neighbours: usize,
    },
    /// Exact lattice PID over discretised channels.
    Discrete {
        #[serde(default)]
        discretization: Discretization,
        #[serde(default = "default_log_base")]
        log_base: f64,
        #[serde(default)]
        support: SupportPolicy,
        #[serde(default = "default_min_samples")]
        min_samples: usize,
    },
    /// Minimum-information PID from k-NN MI / CMI estimates.
    Continuous {
        #[serde(default = "default_neighbours")]
        neighbours: usize,
    },
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig::Continuous { neighbours: DEFAULT_NEIGHBOURS }
    }
}

impl EstimatorConfig {
    pub fn validate(&self) -> Result<()> {
        match self {
            EstimatorConfig::Analytical { neighbours } | EstimatorConfig::Continuous { neighbours } => {
                if *neighbours == 0 {
                    return Err(PidError::config("neighbours must be > 0"));
                }
            }
            EstimatorConfig::Discrete { discretization, log_base, min_samples, .. } => {
                if !(log_base.is_finite() && *log_base > 0.0 && *log_base != 1.0) {
                    return Err(PidError::config(format!("invalid logarithm base {log_base}")));
                }
                if *min_samples == 0 {
                    return Err(PidError::config("min_samples must be > 0"));
                }
                discretization.validate()?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub topology: ChannelTopology,
    #[serde(default)]
    pub estimator: EstimatorConfig,
    #[serde(default)]
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            topology: ChannelTopology::eeg_10_20(),
            estimator: EstimatorConfig::default(),
            parallel: true,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        self.topology.validate()?;
        self.estimator.validate()
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: PipelineConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Write pretty-printed JSON, creating parent directories if necessary.
    pub fn to_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
