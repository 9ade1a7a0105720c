//! Deterministic synthetic evaluators for modelsieve.
//!
//! The engine treats likelihood optimization as an opaque external call, so
//! protocol tests and the CLI's simulation mode need a stand-in that is fast,
//! deterministic, and shapeable. [`SyntheticEvaluator`] computes its
//! "likelihood" from the job with a caller-supplied function and can sleep a
//! caller-supplied duration per job to scramble completion order.

use std::time::{Duration, Instant};

use async_trait::async_trait;

use modelsieve_kernel::criteria::effective_parameter_count;
use modelsieve_kernel::{Dataset, EvalConfig, EvalOutcome, Evaluate};
use modelsieve_types::Job;

type LikelihoodFn = Box<dyn Fn(&Job, &Dataset, &EvalConfig) -> f64 + Send + Sync>;
type DelayFn = Box<dyn Fn(&Job) -> Duration + Send + Sync>;

/// An [`Evaluate`] implementation with a synthetic likelihood surface.
pub struct SyntheticEvaluator {
    likelihood: LikelihoodFn,
    delay: Option<DelayFn>,
}

impl SyntheticEvaluator {
    /// Likelihood as an arbitrary function of the job and run context.
    pub fn new(f: impl Fn(&Job, &Dataset, &EvalConfig) -> f64 + Send + Sync + 'static) -> Self {
        Self {
            likelihood: Box::new(f),
            delay: None,
        }
    }

    /// The same likelihood for every job. Every criterion then ties on the
    /// likelihood term and differs only through the parameter count.
    pub fn constant(likelihood: f64) -> Self {
        Self::new(move |_, _, _| likelihood)
    }

    /// A likelihood chosen per job so that its AIC score equals
    /// `target(job.id)` exactly.
    ///
    /// Inverts `AIC = -2L + 2k`: all intermediate values are dyadic
    /// rationals for integer targets, so the resulting scores are
    /// bit-exact.
    pub fn aic_shaped(target: impl Fn(u32) -> f64 + Send + Sync + 'static) -> Self {
        Self::new(move |job, dataset, config| {
            let k = f64::from(effective_parameter_count(
                job.free_parameter_count,
                dataset,
                config.base_freq,
            ));
            k - target(job.id) / 2.0
        })
    }

    /// Sleep `delay(job)` inside every evaluation, to let tests drive jobs
    /// to completion out of dispatch order.
    pub fn with_delay(mut self, delay: impl Fn(&Job) -> Duration + Send + Sync + 'static) -> Self {
        self.delay = Some(Box::new(delay));
        self
    }
}

#[async_trait]
impl Evaluate for SyntheticEvaluator {
    async fn evaluate(
        &self,
        job: &Job,
        _pattern: &str,
        dataset: &Dataset,
        config: &EvalConfig,
    ) -> EvalOutcome {
        let started = Instant::now();
        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(job)).await;
        }
        let real_time = started.elapsed().as_secs_f64();
        EvalOutcome {
            likelihood: (self.likelihood)(job, dataset, config),
            cpu_time: 0.0,
            real_time,
        }
    }
}

/// A small alignment handle used across tests: 1000 sites, 8 sequences.
pub fn small_dataset() -> Dataset {
    Dataset {
        sites: 1000,
        sequences: 8,
    }
}

/// A per-job delay that completes jobs in a scrambled order: job id `i`
/// sleeps `(i * 7) % 5 + 1` milliseconds.
pub fn scrambling_delay(job: &Job) -> Duration {
    Duration::from_millis(u64::from(job.id * 7 % 5) + 1)
}
