//! Run report: the per-job evaluation table and the per-criterion summary.

use std::fmt;

use modelsieve_types::Criterion;

use crate::scheduler::RunOutcome;
use crate::space::ModelSpace;

/// Renders a completed run as a fixed-width table plus winner summary.
pub struct RunReport<'a> {
    space: &'a ModelSpace,
    outcome: &'a RunOutcome,
}

impl<'a> RunReport<'a> {
    pub fn new(space: &'a ModelSpace, outcome: &'a RunOutcome) -> Self {
        Self { space, outcome }
    }
}

impl fmt::Display for RunReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>5}  {:<11}  {:>2}  {:>14}", "job", "pattern", "K", "lnL")?;
        for criterion in Criterion::ALL {
            write!(f, "  {:>14}", criterion.label())?;
        }
        writeln!(f, "  {:>9}  {:>9}", "cpu[s]", "real[s]")?;

        for result in &self.outcome.results {
            write!(
                f,
                "{:>5}  {:<11}  {:>2}  {:>14.4}",
                result.job_id,
                self.space.pattern_grouped(result.job_id),
                self.space.parameter_class(result.job_id),
                result.likelihood,
            )?;
            for criterion in Criterion::ALL {
                write!(f, "  {:>14.4}", result.scores[criterion.index()])?;
            }
            writeln!(f, "  {:>9.3}  {:>9.3}", result.cpu_time, result.real_time)?;
        }

        writeln!(f)?;
        writeln!(f, "best model per criterion:")?;
        for criterion in Criterion::ALL {
            match self.outcome.aggregate.best(criterion) {
                Some((score, job_id)) => writeln!(
                    f,
                    "  {:<9} job {:>4}  {:<11}  {:.4}",
                    criterion.label(),
                    job_id,
                    self.space.pattern_grouped(job_id),
                    score,
                )?,
                None => writeln!(f, "  {:<9} (no jobs evaluated)", criterion.label())?,
            }
        }
        Ok(())
    }
}
