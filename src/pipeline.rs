//! One configured analysis, from channel table to persisted result table.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tracing::info;

use crate::batch::{BatchOutcome, BatchRunner, SkippedTriplet};
use crate::config::{EstimatorConfig, PipelineConfig};
use crate::data::{ChannelTable, SurrogateGenerator};
use crate::error::Result;
use crate::estimators::approaches::KsgEstimator;
use crate::pairwise::PairwiseTable;
use crate::pid::{AnalyticalGaussianPid, AnalyticalRecord, ContinuousPid, DiscretePid, DiscretePidSolver, PidRecord};
use crate::topology::{Triplet, TripletEnumerator};

/// Result of one run; the record type depends on the estimator.
#[derive(Debug)]
pub enum PipelineOutput {
    Analytical(BatchOutcome<AnalyticalRecord>),
    Full(BatchOutcome<PidRecord>),
}

impl PipelineOutput {
    pub fn len(&self) -> usize {
        match self {
            PipelineOutput::Analytical(o) => o.results.len(),
            PipelineOutput::Full(o) => o.results.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn skipped(&self) -> &[SkippedTriplet] {
        match self {
            PipelineOutput::Analytical(o) => &o.skipped,
            PipelineOutput::Full(o) => &o.skipped,
        }
    }

    pub fn persist(self, path: impl AsRef<Path>) -> Result<()> {
        match self {
            PipelineOutput::Analytical(o) => o.results.persist(path),
            PipelineOutput::Full(o) => o.results.persist(path),
        }
    }
}

/// What a persisted run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub path: PathBuf,
    pub records: usize,
    pub skipped: usize,
}

pub struct Pipeline {
    config: PipelineConfig,
    interrupt: Option<Arc<AtomicBool>>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, interrupt: None })
    }

    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn triplets(&self) -> Result<Vec<Triplet>> {
        Ok(TripletEnumerator::new(&self.config.topology)?.triplets())
    }

    fn runner(&self) -> BatchRunner {
        let runner = BatchRunner::new().parallel(self.config.parallel);
        match &self.interrupt {
            Some(flag) => runner.with_interrupt(Arc::clone(flag)),
            None => runner,
        }
    }

    /// Evaluate every triplet of the topology on `data` without persisting.
    pub fn decompose(&self, data: &ChannelTable) -> Result<PipelineOutput> {
        for channel in self.config.topology.channels() {
            data.position(channel)?;
        }
        let enumerator = TripletEnumerator::new(&self.config.topology)?;
        let triplets = enumerator.triplets();
        let runner = self.runner();

        match &self.config.estimator {
            EstimatorConfig::Analytical { neighbours } => {
                let pairs = enumerator.pairs();
                let pairwise = PairwiseTable::compute(
                    data,
                    &pairs,
                    &KsgEstimator::new(*neighbours),
                    self.config.parallel,
                )?;
                info!(pairs = pairs.len(), usable = pairwise.len(), "pairwise statistics ready");
                let strategy = AnalyticalGaussianPid::new(&pairwise);
                Ok(PipelineOutput::Analytical(runner.run(&strategy, &triplets)?))
            }
            EstimatorConfig::Discrete { discretization, log_base, support, min_samples } => {
                let symbols = discretization.apply(data)?;
                let solver = DiscretePidSolver::new()
                    .with_base(*log_base)
                    .with_support(*support)
                    .with_min_samples(*min_samples);
                let strategy = DiscretePid::new(&symbols, solver);
                Ok(PipelineOutput::Full(runner.run(&strategy, &triplets)?))
            }
            EstimatorConfig::Continuous { neighbours } => {
                let strategy = ContinuousPid::new(data, KsgEstimator::new(*neighbours));
                Ok(PipelineOutput::Full(runner.run(&strategy, &triplets)?))
            }
        }
    }

    /// Decompose one subject's table and persist it to `path` exactly once.
    pub fn run_subject(&self, data: &ChannelTable, path: impl AsRef<Path>) -> Result<RunSummary> {
        let path = path.as_ref();
        let output = self.decompose(data)?;
        let summary = RunSummary {
            path: path.to_path_buf(),
            records: output.len(),
            skipped: output.skipped().len(),
        };
        output.persist(path)?;
        info!(path = %path.display(), records = summary.records, "result table written");
        Ok(summary)
    }

    /// Run on `n` surrogate tables seeded `seed, seed + 1, ...`, writing
    /// `<stem>_surrogate_<i>.csv` into `dir`.
    pub fn run_surrogates(
        &self,
        data: &ChannelTable,
        generator: SurrogateGenerator,
        n: usize,
        dir: impl AsRef<Path>,
        stem: &str,
    ) -> Result<Vec<RunSummary>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        (0..n)
            .map(|i| {
                let seeded = generator.with_seed(generator.seed().wrapping_add(i as u64));
                let surrogate = seeded.generate(data)?;
                self.run_subject(&surrogate, dir.join(format!("{stem}_surrogate_{i}.csv")))
            })
            .collect()
    }
}
