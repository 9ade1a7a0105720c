//! Single-task reference runner.
//!
//! Evaluates the whole model space in enumeration order without a worker
//! pool. Produces the same [`RunOutcome`] shape as the distributed run and
//! serves as the deterministic reference for the protocol: fold order here
//! is exactly enumeration order.

use modelsieve_types::{JobResult, ResultAggregate};

use crate::criteria::criterion_scores;
use crate::error::EngineResult;
use crate::evaluate::{Dataset, EvalConfig, Evaluate};
use crate::scheduler::RunOutcome;
use crate::space::ModelSpace;

/// Evaluate every job in `space` in order, folding into one aggregate.
pub async fn run_sequential(
    mut space: ModelSpace,
    evaluator: &dyn Evaluate,
    dataset: Dataset,
    config: EvalConfig,
) -> EngineResult<RunOutcome> {
    dataset.validate()?;

    let mut aggregate = ResultAggregate::new();
    let mut results = Vec::with_capacity(space.job_count() as usize);

    while let Some(job) = space.next_job() {
        tracing::debug!(job = job.id, pattern = space.pattern(job.id), "evaluating");
        let pattern = space.pattern_grouped(job.id);
        let outcome = evaluator.evaluate(&job, &pattern, &dataset, &config).await;
        let scores = criterion_scores(
            outcome.likelihood,
            job.free_parameter_count,
            &dataset,
            config.base_freq,
        );
        aggregate.fold(job.id, &scores);
        results.push(JobResult {
            job_id: job.id,
            likelihood: outcome.likelihood,
            scores,
            cpu_time: outcome.cpu_time,
            real_time: outcome.real_time,
        });
    }

    Ok(RunOutcome { aggregate, results })
}
