//! Job identification and per-job result types.

use serde::{Deserialize, Serialize};

use crate::criteria::ScoreVec;

/// One unit of candidate-model evaluation work.
///
/// The id is the job's 0-based position in the model space's enumeration
/// order, unique within a run. Immutable once issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Enumeration-order id, unique within a run.
    pub id: u32,
    /// Free rate parameters of the substitution model (K - 1).
    pub free_parameter_count: u32,
}

/// Identifier of one worker in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkerId(pub u32);

impl std::fmt::Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The outcome of evaluating a single job: raw likelihood, the derived
/// selection scores, and timing.
///
/// Produced once per job and folded into exactly one aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    /// Id of the job this result belongs to.
    pub job_id: u32,
    /// Maximum log-likelihood reported by the evaluator.
    pub likelihood: f64,
    /// Selection-criterion scores, indexed by [`Criterion`](crate::Criterion).
    pub scores: ScoreVec,
    /// CPU seconds spent in the evaluator.
    pub cpu_time: f64,
    /// Wall-clock seconds spent in the evaluator.
    pub real_time: f64,
}
