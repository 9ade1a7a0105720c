//! The worker loop: one job at a time, local accumulation, one-shot
//! reduction contribution.

use std::sync::Arc;

use tokio::sync::mpsc;

use modelsieve_types::{
    Completion, JobResult, ReduceContribution, ResultAggregate, WorkerId, WorkerMsg,
};

use crate::criteria::criterion_scores;
use crate::evaluate::{Dataset, EvalConfig, Evaluate};
use crate::space::ModelSpace;

/// Receive instructions until told to stop, then contribute the local
/// aggregate to the reduction and terminate.
///
/// Queue depth is bounded at 1 by the master's slot bookkeeping, so this
/// loop never buffers work. Evaluation is atomic: there is no cancellation
/// path once a task has been received.
pub(crate) async fn worker_loop(
    id: WorkerId,
    space: ModelSpace,
    mut tasks: mpsc::Receiver<WorkerMsg>,
    completions: mpsc::Sender<Completion>,
    reductions: mpsc::Sender<ReduceContribution>,
    evaluator: Arc<dyn Evaluate>,
    dataset: Dataset,
    config: EvalConfig,
) {
    let mut local = ResultAggregate::new();

    while let Some(msg) = tasks.recv().await {
        let job = match msg {
            WorkerMsg::Task(job) => job,
            WorkerMsg::Stop => break,
        };

        tracing::debug!(worker = %id, job = job.id, pattern = space.pattern(job.id), "evaluating");
        let pattern = space.pattern_grouped(job.id);
        let outcome = evaluator.evaluate(&job, &pattern, &dataset, &config).await;
        let scores = criterion_scores(
            outcome.likelihood,
            job.free_parameter_count,
            &dataset,
            config.base_freq,
        );
        local.fold(job.id, &scores);

        let report = Completion {
            worker: id,
            result: JobResult {
                job_id: job.id,
                likelihood: outcome.likelihood,
                scores,
                cpu_time: outcome.cpu_time,
                real_time: outcome.real_time,
            },
        };
        if completions.send(report).await.is_err() {
            // master went away mid-run; nothing left to report to
            return;
        }
    }

    tracing::debug!(worker = %id, "stop received, contributing to reduction");
    let _ = reductions
        .send(ReduceContribution {
            worker: id,
            aggregate: local,
        })
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use modelsieve_types::Job;

    use crate::evaluate::EvalOutcome;
    use crate::space::IndexPolicy;

    // Local stand-ins for modelsieve-testutil's fixtures: the lib-test
    // target is a second compilation of this crate, so testutil's
    // kernel-typed values would be foreign types here.
    struct ConstEval(f64);

    #[async_trait]
    impl Evaluate for ConstEval {
        async fn evaluate(
            &self,
            _job: &Job,
            _pattern: &str,
            _dataset: &Dataset,
            _config: &EvalConfig,
        ) -> EvalOutcome {
            EvalOutcome {
                likelihood: self.0,
                cpu_time: 0.0,
                real_time: 0.0,
            }
        }
    }

    fn small_dataset() -> Dataset {
        Dataset {
            sites: 1000,
            sequences: 8,
        }
    }

    struct Loop {
        tasks: mpsc::Sender<WorkerMsg>,
        completions: mpsc::Receiver<Completion>,
        reductions: mpsc::Receiver<ReduceContribution>,
        handle: tokio::task::JoinHandle<()>,
    }

    fn spawn_worker(id: WorkerId) -> Loop {
        let (task_tx, task_rx) = mpsc::channel(1);
        let (done_tx, done_rx) = mpsc::channel(4);
        let (reduce_tx, reduce_rx) = mpsc::channel(4);
        let handle = tokio::spawn(worker_loop(
            id,
            ModelSpace::new(IndexPolicy::Full).unwrap(),
            task_rx,
            done_tx,
            reduce_tx,
            Arc::new(ConstEval(-100.0)),
            small_dataset(),
            EvalConfig::default(),
        ));
        Loop {
            tasks: task_tx,
            completions: done_rx,
            reductions: reduce_rx,
            handle,
        }
    }

    #[tokio::test]
    async fn test_worker_contributes_exactly_once_after_stop() {
        let mut worker = spawn_worker(WorkerId(3));
        worker
            .tasks
            .send(WorkerMsg::Task(Job {
                id: 0,
                free_parameter_count: 0,
            }))
            .await
            .unwrap();
        let done = worker.completions.recv().await.unwrap();
        assert_eq!(done.worker, WorkerId(3));
        assert_eq!(done.result.job_id, 0);

        worker.tasks.send(WorkerMsg::Stop).await.unwrap();
        let contribution = worker.reductions.recv().await.unwrap();
        assert_eq!(contribution.worker, WorkerId(3));
        assert!(!contribution.aggregate.is_empty());
        // loop has exited; the closed channel proves no second contribution
        assert_eq!(worker.reductions.recv().await, None);
        worker.handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_idle_worker_contributes_empty_aggregate() {
        let mut worker = spawn_worker(WorkerId(0));
        worker.tasks.send(WorkerMsg::Stop).await.unwrap();
        let contribution = worker.reductions.recv().await.unwrap();
        assert!(contribution.aggregate.is_empty());
        assert_eq!(worker.reductions.recv().await, None);
        assert_eq!(worker.completions.recv().await, None);
        worker.handle.await.unwrap();
    }
}
