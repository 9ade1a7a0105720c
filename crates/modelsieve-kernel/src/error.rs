//! Engine error types.

use thiserror::Error;

use modelsieve_types::WorkerId;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine failures.
///
/// `NoWorkers`, `TooManyWorkers`, `IndexOutOfCatalog` and
/// `DegenerateDataset` are configuration errors, detected before any message
/// exchange. Everything else is a protocol invariant violation: the run is
/// aborted, never patched up.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    #[error("no workers available")]
    NoWorkers,
    #[error("worker pool of {workers} exceeds the {jobs} enumerated jobs by more than one")]
    TooManyWorkers { workers: u32, jobs: u32 },
    #[error("model index {0} lies outside the catalog")]
    IndexOutOfCatalog(u32),
    #[error("an alignment of {sites} sites and {sequences} sequences cannot carry a tree")]
    DegenerateDataset { sites: u32, sequences: u32 },
    #[error("send wait yielded nothing with sends outstanding")]
    SendWaitExhausted,
    #[error("send issued to worker {0} while its previous send was outstanding")]
    SlotBusy(WorkerId),
    #[error("two completions received for job {0}")]
    DuplicateCompletion(u32),
    #[error("worker {0} contributed to the reduction twice")]
    DuplicateContribution(WorkerId),
    #[error("worker {0} hung up before receiving its stop signal")]
    WorkerGone(WorkerId),
    #[error("completion channel closed with {missing} completions outstanding")]
    CompletionsLost { missing: usize },
    #[error("reduction ended after {got} of {expected} contributions")]
    IncompleteReduction { got: u32, expected: u32 },
    #[error("no completion was folded for job {0}")]
    MissingCompletion(u32),
    #[error("a worker task panicked")]
    WorkerPanicked,
}
