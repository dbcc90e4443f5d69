//! Batch driver: every triplet under every role rotation.

use rayon::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

use crate::error::{PidError, Result};
use crate::pid::{DecompositionStrategy, RoleAssignment};
use crate::results::ResultAccumulator;
use crate::topology::Triplet;

/// A triplet dropped from the output, with the rotation that failed.
#[derive(Debug)]
pub struct SkippedTriplet {
    pub triplet: Triplet,
    pub target: String,
    pub error: PidError,
}

#[derive(Debug)]
pub struct BatchOutcome<R> {
    pub results: ResultAccumulator<R>,
    pub skipped: Vec<SkippedTriplet>,
}

/// Sequential or rayon-parallel evaluation with identical, enumeration-ordered output.
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    parallel: bool,
    interrupt: Option<Arc<AtomicBool>>,
}

/// Rows of one triplet, or the first rotation error.
type TripletOutcome<R> = std::result::Result<[R; 3], (String, PidError)>;

impl BatchRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Stop between triplets once `flag` is set.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    fn interrupted(&self) -> bool {
        self.interrupt.as_ref().is_some_and(|f| f.load(Ordering::Relaxed))
    }

    fn evaluate<S: DecompositionStrategy>(strategy: &S, triplet: &Triplet) -> TripletOutcome<S::Record> {
        let [r0, r1, r2] = RoleAssignment::rotations(triplet);
        let run = |roles: RoleAssignment<'_>| {
            strategy.decompose(&roles).map_err(|e| (roles.target.to_string(), e))
        };
        Ok([run(r0)?, run(r1)?, run(r2)?])
    }

    pub fn run<S: DecompositionStrategy>(
        &self,
        strategy: &S,
        triplets: &[Triplet],
    ) -> Result<BatchOutcome<S::Record>> {
        let total = triplets.len();
        info!(triplets = total, parallel = self.parallel, "starting PID batch");

        // None marks a triplet that was never started because of an interrupt.
        let outcomes: Vec<Option<TripletOutcome<S::Record>>> = if self.parallel {
            triplets
                .par_iter()
                .map(|t| (!self.interrupted()).then(|| Self::evaluate(strategy, t)))
                .collect()
        } else {
            let mut outcomes = Vec::with_capacity(total);
            for t in triplets {
                if self.interrupted() {
                    break;
                }
                outcomes.push(Some(Self::evaluate(strategy, t)));
            }
            outcomes
        };

        let completed = outcomes.iter().filter(|o| o.is_some()).count();
        if completed < total {
            warn!(completed, total, "PID batch interrupted");
            return Err(PidError::Interrupted { completed, total });
        }

        let mut results = ResultAccumulator::new();
        let mut skipped = Vec::new();
        for (triplet, outcome) in triplets.iter().zip(outcomes.into_iter().flatten()) {
            match outcome {
                Ok(rows) => results.extend(rows),
                Err((target, error)) if error.is_per_triplet() => {
                    warn!(triplet = %triplet, target = %target, error = %error, "skipping triplet");
                    skipped.push(SkippedTriplet { triplet: triplet.clone(), target, error });
                }
                Err((_, error)) => return Err(error),
            }
        }

        info!(
            records = results.len(),
            skipped = skipped.len(),
            "finished PID batch"
        );
        Ok(BatchOutcome { results, skipped })
    }
}
