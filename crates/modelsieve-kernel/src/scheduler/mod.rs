//! Scheduler module for modelsieve: the master/worker dispatch protocol.
//!
//! This module provides:
//! - **Master**: enumerates jobs, issues an initial burst, then balances the
//!   remainder on demand, then runs the two-phase shutdown handshake and the
//!   collective reduction.
//! - **Workers**: evaluate one job at a time, accumulate a local aggregate,
//!   and contribute it to the reduction exactly once.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                         master                             │
//! │  SlotTable: one send slot per worker                       │
//! │  - begin_send(worker, msg)   non-blocking, tracked         │
//! │  - wait_any()                any outstanding send done     │
//! │  - reclaim(worker)           that worker's send done       │
//! └───────┬──────────────┬─────────────────────────┬───────────┘
//!   mpsc(1)│        mpsc(1)│             completions│(shared)
//! ┌────────▼───┐  ┌────────▼───┐                    │
//! │  worker 0  │  │  worker 1  │  ...  ─────────────┘
//! └────────────┘  └────────────┘
//!        └── reduce: one ReduceContribution per worker ──▶ master
//! ```

mod master;
mod slots;
mod worker;

pub use master::{run_master_worker, RunOutcome};
