//! The trait seam to the external likelihood optimizer.
//!
//! The engine never computes likelihoods itself. Whatever performs the
//! per-model optimization (a phylogenetic likelihood library, an external
//! process, a synthetic stand-in for tests) implements [`Evaluate`] and is
//! handed in as a trait object. Evaluation is atomic: once a job is
//! dispatched it runs to completion, with no cancellation or retry.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use modelsieve_types::Job;

use crate::error::{EngineError, EngineResult};

/// How base frequencies are treated during evaluation.
///
/// `Optimized` adds three free parameters (the fourth frequency is implied).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseFreqKind {
    /// Fixed empirical values taken from the alignment.
    Empirical,
    /// 1/4 each.
    Equal,
    /// Jointly optimized with the other model parameters.
    Optimized,
}

/// An already-validated handle on the alignment being analyzed.
///
/// File parsing happens upstream; the engine only needs the two counts that
/// feed sample sizes and the branch-parameter count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Alignment length in sites.
    pub sites: u32,
    /// Number of aligned sequences (taxa).
    pub sequences: u32,
}

impl Dataset {
    /// Reject alignments too small to carry a tree. Both runners call this
    /// before dispatching anything; [`branch_count`](Self::branch_count)
    /// assumes it has passed.
    pub fn validate(&self) -> EngineResult<()> {
        if self.sites == 0 || self.sequences < 2 {
            return Err(EngineError::DegenerateDataset {
                sites: self.sites,
                sequences: self.sequences,
            });
        }
        Ok(())
    }

    /// Branch-length parameters of an unrooted tree over this alignment.
    /// Requires `sequences >= 2`.
    pub fn branch_count(&self) -> u32 {
        2 * self.sequences - 3
    }
}

/// Evaluation settings passed through to the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Base-frequency treatment, also feeds the criteria's parameter count.
    pub base_freq: BaseFreqKind,
    /// Seed for any randomized starting tree inside the evaluator.
    pub random_seed: u64,
    /// Threads the evaluator may use internally. The engine itself never
    /// parallelizes within a job.
    pub threads: u32,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            base_freq: BaseFreqKind::Empirical,
            random_seed: 0x12345,
            threads: 1,
        }
    }
}

/// What the evaluator hands back for one job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalOutcome {
    /// Maximum log-likelihood of the optimized model.
    pub likelihood: f64,
    /// CPU seconds spent optimizing.
    pub cpu_time: f64,
    /// Wall-clock seconds spent optimizing.
    pub real_time: f64,
}

/// External likelihood optimization, assumed deterministic and infallible.
#[async_trait]
pub trait Evaluate: Send + Sync {
    /// Optimize the model described by `job`/`pattern` against `dataset` and
    /// report its maximum log-likelihood and timings.
    async fn evaluate(
        &self,
        job: &Job,
        pattern: &str,
        dataset: &Dataset,
        config: &EvalConfig,
    ) -> EvalOutcome;
}
