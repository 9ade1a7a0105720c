//! Pure data types for modelsieve: jobs, criteria, aggregates, wire messages.
//!
//! This crate is a leaf dependency with no async runtime and no I/O. It exists
//! so that evaluator backends and external consumers can speak the engine's
//! data model without pulling in modelsieve-kernel's runtime stack.

pub mod aggregate;
pub mod criteria;
pub mod job;
pub mod message;

// Flat re-exports for convenience
pub use aggregate::*;
pub use criteria::*;
pub use job::*;
pub use message::*;
