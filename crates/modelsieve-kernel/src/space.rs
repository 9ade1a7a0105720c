//! Ordered enumeration of candidate models into jobs.
//!
//! A [`ModelSpace`] walks a finite slice of the catalog under one of three
//! index policies and hands out [`Job`]s in a fixed 0-based order. Job ids
//! are relative enumeration indices; the policy translates them to absolute
//! catalog indices for pattern and parameter-class lookup.

use modelsieve_types::Job;

use crate::catalog;
use crate::error::{EngineError, EngineResult};

/// How relative enumeration indices map onto the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexPolicy {
    /// Sweep the whole catalog in order.
    Full,
    /// A contiguous subrange `lower..upper` of absolute indices.
    Range { lower: u32, upper: u32 },
    /// An explicit list of absolute indices, order preserved.
    Selection(Vec<u32>),
}

/// The ordered, finite space of candidate models for one run.
///
/// Pure data: enumeration does no I/O and never fails. An empty space simply
/// yields zero jobs.
#[derive(Debug, Clone)]
pub struct ModelSpace {
    policy: IndexPolicy,
    count: u32,
    /// Relative index of the current model; `None` before the first
    /// [`advance`](Self::advance) and after exhaustion.
    cursor: Option<u32>,
}

impl ModelSpace {
    /// Build a model space from an index policy.
    ///
    /// Duplicate ids in a `Selection` denote the same job and are enumerated
    /// once, keeping first-occurrence order. Indices outside the catalog are
    /// a configuration error.
    pub fn new(policy: IndexPolicy) -> EngineResult<Self> {
        let policy = match policy {
            IndexPolicy::Full => IndexPolicy::Full,
            IndexPolicy::Range { lower, upper } => {
                if upper > catalog::CATALOG_SIZE {
                    return Err(EngineError::IndexOutOfCatalog(upper - 1));
                }
                let upper = upper.max(lower);
                IndexPolicy::Range { lower, upper }
            }
            IndexPolicy::Selection(ids) => {
                let mut seen = std::collections::HashSet::new();
                let mut deduped = Vec::with_capacity(ids.len());
                for id in ids {
                    if id >= catalog::CATALOG_SIZE {
                        return Err(EngineError::IndexOutOfCatalog(id));
                    }
                    if seen.insert(id) {
                        deduped.push(id);
                    }
                }
                IndexPolicy::Selection(deduped)
            }
        };
        let count = match &policy {
            IndexPolicy::Full => catalog::CATALOG_SIZE,
            IndexPolicy::Range { lower, upper } => upper - lower,
            IndexPolicy::Selection(ids) => ids.len() as u32,
        };
        Ok(Self {
            policy,
            count,
            cursor: None,
        })
    }

    /// Total number of jobs this space enumerates.
    pub fn job_count(&self) -> u32 {
        self.count
    }

    /// Translate a relative enumeration index to an absolute catalog index.
    pub fn absolute_index(&self, relative: u32) -> u32 {
        match &self.policy {
            IndexPolicy::Full => relative,
            IndexPolicy::Range { lower, .. } => lower + relative,
            IndexPolicy::Selection(ids) => ids[relative as usize],
        }
    }

    /// The symmetry pattern of a job, by relative index.
    pub fn pattern(&self, relative: u32) -> &'static str {
        catalog::pattern(self.absolute_index(relative))
    }

    /// The comma-separated pattern form consumed by evaluator backends.
    pub fn pattern_grouped(&self, relative: u32) -> String {
        catalog::pattern_grouped(self.absolute_index(relative))
    }

    /// The free-parameter class K (1..=6) of a job, by relative index.
    pub fn parameter_class(&self, relative: u32) -> u32 {
        catalog::parameter_class(self.absolute_index(relative))
    }

    /// Move to the next model. Returns `false` once the space is exhausted;
    /// exhaustion is terminal.
    pub fn advance(&mut self) -> bool {
        let next = match self.cursor {
            None => 0,
            Some(i) => i + 1,
        };
        self.cursor = Some(next);
        next < self.count
    }

    /// The job at the current cursor, if the cursor is on a valid model.
    pub fn current(&self) -> Option<Job> {
        let relative = self.cursor.filter(|&i| i < self.count)?;
        let class = catalog::parameter_class(self.absolute_index(relative));
        Some(Job {
            id: relative,
            free_parameter_count: class - 1,
        })
    }

    /// Advance and return the next job in one step; `None` when exhausted.
    pub fn next_job(&mut self) -> Option<Job> {
        if self.advance() {
            self.current()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn drain(mut space: ModelSpace) -> Vec<Job> {
        let mut jobs = Vec::new();
        while let Some(job) = space.next_job() {
            jobs.push(job);
        }
        jobs
    }

    #[test]
    fn test_full_sweep_yields_catalog() {
        let space = ModelSpace::new(IndexPolicy::Full).unwrap();
        assert_eq!(space.job_count(), 203);
        let jobs = drain(space);
        assert_eq!(jobs.len(), 203);
        // ids are the 0-based enumeration order
        for (i, job) in jobs.iter().enumerate() {
            assert_eq!(job.id, i as u32);
        }
        // parameter counts follow the catalog groups
        let mut per_class = [0u32; 6];
        for job in &jobs {
            per_class[job.free_parameter_count as usize] += 1;
        }
        assert_eq!(per_class, [1, 31, 90, 65, 15, 1]);
    }

    #[test]
    fn test_range_policy_offsets() {
        let space = ModelSpace::new(IndexPolicy::Range {
            lower: 10,
            upper: 20,
        })
        .unwrap();
        assert_eq!(space.job_count(), 10);
        let absolutes: Vec<u32> = (0..10).map(|i| space.absolute_index(i)).collect();
        assert_eq!(absolutes, (10..20).collect::<Vec<u32>>());
        assert_eq!(drain(space).len(), 10);
    }

    #[test]
    fn test_selection_dedups_preserving_order() {
        let space = ModelSpace::new(IndexPolicy::Selection(vec![5, 2, 2, 9])).unwrap();
        assert_eq!(space.job_count(), 3);
        let absolutes: Vec<u32> = (0..3).map(|i| space.absolute_index(i)).collect();
        assert_eq!(absolutes, vec![5, 2, 9]);
    }

    #[rstest]
    #[case::empty_range(IndexPolicy::Range { lower: 7, upper: 7 })]
    #[case::inverted_range(IndexPolicy::Range { lower: 9, upper: 7 })]
    #[case::empty_selection(IndexPolicy::Selection(vec![]))]
    fn test_empty_space_yields_no_jobs(#[case] policy: IndexPolicy) {
        let mut space = ModelSpace::new(policy).unwrap();
        assert_eq!(space.job_count(), 0);
        assert!(!space.advance());
        assert_eq!(space.current(), None);
    }

    #[rstest]
    #[case::range_past_end(IndexPolicy::Range { lower: 0, upper: 204 })]
    #[case::selection_past_end(IndexPolicy::Selection(vec![0, 203]))]
    fn test_out_of_catalog_rejected(#[case] policy: IndexPolicy) {
        assert!(matches!(
            ModelSpace::new(policy),
            Err(EngineError::IndexOutOfCatalog(_))
        ));
    }

    #[test]
    fn test_exhaustion_is_terminal() {
        let mut space = ModelSpace::new(IndexPolicy::Selection(vec![3])).unwrap();
        assert!(space.advance());
        assert!(space.current().is_some());
        assert!(!space.advance());
        assert_eq!(space.current(), None);
        assert!(!space.advance());
    }

    #[test]
    fn test_current_before_first_advance() {
        let space = ModelSpace::new(IndexPolicy::Full).unwrap();
        assert_eq!(space.current(), None);
    }

    #[test]
    fn test_gtr_job_has_five_free_parameters() {
        let mut space = ModelSpace::new(IndexPolicy::Selection(vec![202])).unwrap();
        let job = space.next_job().unwrap();
        assert_eq!(job.free_parameter_count, 5);
        assert_eq!(space.pattern(0), "012345");
        assert_eq!(space.pattern_grouped(0), "0,1,2,3,4,5");
    }
}
