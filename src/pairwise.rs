//! Pairwise statistics shared read-only by every triplet of a run.

use ndarray_stats::CorrelationExt;
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::debug;

use crate::data::ChannelTable;
use crate::error::{PidError, Result};
use crate::estimators::traits::InformationEstimator;
use crate::topology::ChannelPair;

/// Mutual information (nats) and Pearson correlation of one channel pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairwiseStatistic {
    pub mutual_information: f64,
    pub correlation: f64,
}

/// Lookup table keyed by unordered channel pair. Built once, never mutated.
#[derive(Debug, Clone, Default)]
pub struct PairwiseTable {
    stats: HashMap<ChannelPair, PairwiseStatistic>,
    failures: HashMap<ChannelPair, String>,
}

impl PairwiseTable {
    /// Evaluate every pair. Pairs whose estimate is degenerate are remembered
    /// as failures so that only the triplets touching them get skipped later.
    pub fn compute<E: InformationEstimator>(
        data: &ChannelTable,
        pairs: &[ChannelPair],
        estimator: &E,
        parallel: bool,
    ) -> Result<Self> {
        let mut positions = Vec::with_capacity(pairs.len());
        for pair in pairs {
            let (a, b) = pair.channels();
            positions.push((data.position(a)?, data.position(b)?));
        }

        // Rows are variables for ndarray-stats; NaN marks a constant channel.
        let correlation = data
            .data()
            .t()
            .pearson_correlation()
            .map_err(|_| PidError::degenerate("pairwise correlation of an empty channel table"))?;

        let evaluate = |(pair, &(i, j)): (&ChannelPair, &(usize, usize))| {
            let r = correlation[(i, j)];
            let result = if r.is_finite() {
                estimator
                    .mutual_information(data.data().column(i), data.data().column(j))
                    .map(|mi| PairwiseStatistic { mutual_information: mi, correlation: r })
            } else {
                Err(PidError::degenerate(format!("correlation of {pair} is not finite")))
            };
            (pair.clone(), result)
        };

        let evaluated: Vec<(ChannelPair, Result<PairwiseStatistic>)> = if parallel {
            pairs.par_iter().zip(positions.par_iter()).map(evaluate).collect()
        } else {
            pairs.iter().zip(positions.iter()).map(evaluate).collect()
        };

        let mut table = Self::default();
        for (pair, result) in evaluated {
            match result {
                Ok(stat) => {
                    debug!(
                        pair = %pair,
                        mutual_information = stat.mutual_information,
                        correlation = stat.correlation,
                        "pairwise statistic"
                    );
                    table.stats.insert(pair, stat);
                }
                Err(e) if e.is_per_triplet() => {
                    debug!(pair = %pair, error = %e, "pairwise statistic unavailable");
                    table.failures.insert(pair, e.to_string());
                }
                Err(e) => return Err(e),
            }
        }
        Ok(table)
    }

    pub fn from_statistics(stats: impl IntoIterator<Item = (ChannelPair, PairwiseStatistic)>) -> Self {
        Self { stats: stats.into_iter().collect(), failures: HashMap::new() }
    }

    /// Statistic for `{a, b}` in either order.
    pub fn get(&self, a: &str, b: &str) -> Result<PairwiseStatistic> {
        let key = ChannelPair::new(a, b);
        if let Some(stat) = self.stats.get(&key) {
            return Ok(*stat);
        }
        match self.failures.get(&key) {
            Some(reason) => Err(PidError::degenerate(format!("pair {key} unavailable: {reason}"))),
            None => Err(PidError::config(format!("no pairwise statistic for {key}"))),
        }
    }

    /// Number of pairs with a usable statistic.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&ChannelPair, &str)> {
        self.failures.iter().map(|(k, v)| (k, v.as_str()))
    }
}
