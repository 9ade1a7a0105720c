//! The master: burst dispatch, on-demand balancing, shutdown handshake,
//! collective reduction.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use modelsieve_types::{Completion, JobResult, ResultAggregate, WorkerId, WorkerMsg};

use crate::error::{EngineError, EngineResult};
use crate::evaluate::{Dataset, EvalConfig, Evaluate};
use crate::space::ModelSpace;

use super::slots::SlotTable;
use super::worker::worker_loop;

/// Everything a completed run produces.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The globally reduced best-per-criterion records.
    pub aggregate: ResultAggregate,
    /// Every job's result, indexed by job id.
    pub results: Vec<JobResult>,
}

/// Run the full master/worker search over `space` with a pool of `workers`.
///
/// Spawns the workers, dispatches every job exactly once, stops each worker
/// exactly once, reduces their local aggregates, and joins them. The pool
/// size and the dataset are validated before anything is spawned or sent:
/// zero workers is an error, so is more than one worker beyond the job
/// count, and so is an alignment too small to carry a tree.
pub async fn run_master_worker(
    mut space: ModelSpace,
    workers: u32,
    evaluator: Arc<dyn Evaluate>,
    dataset: Dataset,
    config: EvalConfig,
) -> EngineResult<RunOutcome> {
    let jobs = space.job_count();

    // INIT
    if workers == 0 {
        return Err(EngineError::NoWorkers);
    }
    if workers > jobs + 1 {
        return Err(EngineError::TooManyWorkers { workers, jobs });
    }
    dataset.validate()?;

    let (done_tx, mut done_rx) = mpsc::channel::<Completion>(workers as usize);
    let (reduce_tx, mut reduce_rx) = mpsc::channel(workers as usize);

    let mut pool = JoinSet::new();
    let mut senders = Vec::with_capacity(workers as usize);
    for w in 0..workers {
        let (task_tx, task_rx) = mpsc::channel::<WorkerMsg>(1);
        senders.push(task_tx);
        pool.spawn(worker_loop(
            WorkerId(w),
            space.clone(),
            task_rx,
            done_tx.clone(),
            reduce_tx.clone(),
            Arc::clone(&evaluator),
            dataset,
            config,
        ));
    }
    drop(done_tx);
    drop(reduce_tx);

    let mut slots = SlotTable::new(senders);
    let mut table: Vec<Option<JobResult>> = vec![None; jobs as usize];
    let mut completed: u32 = 0;
    let mut dispatched: u32 = 0;

    // BURST_DISPATCH: one job per worker until either runs out
    tracing::debug!(workers, jobs, "issuing initial workload");
    while dispatched < workers {
        let Some(job) = space.next_job() else { break };
        tracing::debug!(worker = dispatched, job = job.id, k = job.free_parameter_count + 1, "dispatch");
        slots.begin_send(WorkerId(dispatched), WorkerMsg::Task(job))?;
        dispatched += 1;
    }

    // ONDEMAND_DISPATCH: each completion earns its worker the next job
    tracing::debug!("switching to on-demand distribution");
    while let Some(job) = space.next_job() {
        slots.wait_any().await?;
        let done = recv_completion(&mut done_rx, dispatched - completed).await?;
        let worker = done.worker;
        fold_completion(&mut table, done, &mut completed)?;
        slots.reclaim(worker).await?;
        tracing::debug!(worker = %worker, job = job.id, k = job.free_parameter_count + 1, "dispatch");
        slots.begin_send(worker, WorkerMsg::Task(job))?;
        dispatched += 1;
    }

    // DRAIN: pair every remaining completion with exactly one stop signal
    tracing::debug!("distribution complete, sending stop signals");
    let mut stops: u32 = 0;
    while completed < dispatched {
        if slots.outstanding() > 0 {
            slots.wait_any().await?;
        }
        let done = recv_completion(&mut done_rx, dispatched - completed).await?;
        let worker = done.worker;
        fold_completion(&mut table, done, &mut completed)?;
        slots.reclaim(worker).await?;
        stop_worker(&mut slots, worker).await?;
        stops += 1;
    }
    // a pool of jobs + 1 leaves one worker that never held a job
    for w in 0..workers {
        let worker = WorkerId(w);
        if slots.is_idle(worker) {
            stop_worker(&mut slots, worker).await?;
            stops += 1;
        }
    }
    debug_assert_eq!(stops, workers);

    // REDUCE: gather one contribution per worker, fold in arrival order
    tracing::debug!("waiting for workers to fold their results");
    let mut aggregate = ResultAggregate::new();
    let mut contributed = vec![false; workers as usize];
    for got in 0..workers {
        let contribution = reduce_rx
            .recv()
            .await
            .ok_or(EngineError::IncompleteReduction {
                got,
                expected: workers,
            })?;
        let seen = &mut contributed[contribution.worker.0 as usize];
        if *seen {
            return Err(EngineError::DuplicateContribution(contribution.worker));
        }
        *seen = true;
        tracing::debug!(worker = %contribution.worker, "reduce contribution folded");
        aggregate.merge(&contribution.aggregate);
    }

    while let Some(joined) = pool.join_next().await {
        joined.map_err(|_| EngineError::WorkerPanicked)?;
    }

    // DONE
    let results = table
        .into_iter()
        .enumerate()
        .map(|(id, slot)| slot.ok_or(EngineError::MissingCompletion(id as u32)))
        .collect::<EngineResult<Vec<_>>>()?;
    Ok(RunOutcome { aggregate, results })
}

/// Receive a completion report from any worker.
///
/// A closed channel here means workers died with completions still owed,
/// which is a fatal protocol violation, not a recoverable condition.
async fn recv_completion(
    rx: &mut mpsc::Receiver<Completion>,
    missing: u32,
) -> EngineResult<Completion> {
    rx.recv().await.ok_or(EngineError::CompletionsLost {
        missing: missing as usize,
    })
}

/// Record a completion in the per-job table, exactly once per job.
fn fold_completion(
    table: &mut [Option<JobResult>],
    done: Completion,
    completed: &mut u32,
) -> EngineResult<()> {
    let id = done.result.job_id;
    let slot = &mut table[id as usize];
    if slot.is_some() {
        return Err(EngineError::DuplicateCompletion(id));
    }
    *slot = Some(done.result);
    *completed += 1;
    Ok(())
}

/// Send one stop signal and retire the worker's slot for good.
async fn stop_worker(slots: &mut SlotTable, worker: WorkerId) -> EngineResult<()> {
    tracing::debug!(worker = %worker, "stop");
    let sender = slots
        .detach(worker)
        .ok_or(EngineError::SlotBusy(worker))?;
    sender
        .send(WorkerMsg::Stop)
        .await
        .map_err(|_| EngineError::WorkerGone(worker))
}
