//! modelsieve-kernel: the model-selection search engine.
//!
//! This crate provides:
//!
//! - **Catalog**: the fixed catalog of substitution-model symmetry patterns
//! - **ModelSpace**: ordered enumeration of candidate models into jobs
//! - **Criteria**: pure scoring of a likelihood under all selection criteria
//! - **Evaluate**: the trait seam to the external likelihood optimizer
//! - **Scheduler**: the master/worker dispatch protocol and its reduction
//! - **Sequential**: a single-task reference runner over the same pieces
//! - **Report**: the evaluation table and per-criterion winner summary
//!
//! # Architecture
//!
//! ```text
//! ModelSpace ──jobs──▶ master ──mpsc(1)──▶ worker 0 ──▶ Evaluate
//!                        ▲                 worker 1 ──▶ Evaluate
//!                        │ completions        ⋮
//!                        └──── shared mpsc ◀──┘
//!                        reduce: gather one aggregate per worker, fold
//! ```

pub mod catalog;
pub mod criteria;
pub mod error;
pub mod evaluate;
pub mod report;
pub mod scheduler;
pub mod sequential;
pub mod space;

pub use error::{EngineError, EngineResult};
pub use evaluate::{BaseFreqKind, Dataset, EvalConfig, EvalOutcome, Evaluate};
pub use report::RunReport;
pub use scheduler::{run_master_worker, RunOutcome};
pub use sequential::run_sequential;
pub use space::{IndexPolicy, ModelSpace};
