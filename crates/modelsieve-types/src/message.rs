//! Message kinds exchanged between the master and its workers.
//!
//! These are the engine's wire contract. The master drives each worker over
//! its own channel with [`WorkerMsg`]; workers report back on a shared
//! channel with [`Completion`]; the one-shot reduction gathers one
//! [`ReduceContribution`] per worker.

use serde::{Deserialize, Serialize};

use crate::aggregate::ResultAggregate;
use crate::job::{Job, JobResult, WorkerId};

/// An instruction from the master to one worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerMsg {
    /// Evaluate this job and report back.
    Task(Job),
    /// Stop looping and contribute to the reduction. No payload.
    Stop,
}

/// A completion report from a worker back to the master.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    /// Which worker finished the job.
    pub worker: WorkerId,
    /// The job's evaluation outcome.
    pub result: JobResult,
}

/// One worker's contribution to the collective reduction: its entire local
/// aggregate, sent exactly once after receiving [`WorkerMsg::Stop`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReduceContribution {
    /// The contributing worker.
    pub worker: WorkerId,
    /// Its local best-per-criterion records.
    pub aggregate: ResultAggregate,
}
