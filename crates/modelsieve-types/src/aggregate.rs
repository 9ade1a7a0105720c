//! Running best-per-criterion records and their merge operation.

use serde::{Deserialize, Serialize};

use crate::criteria::{Criterion, ScoreVec, CRITERIA_COUNT};

/// The running best `(score, job id)` record per criterion.
///
/// Starts with every score at `+inf`. The fold is a strict `<` minimum, so
/// scores only ever decrease and on an exact tie the first value folded is
/// kept. Merging two aggregates applies the same rule pairwise, which makes
/// merge associative and commutative up to that tie-break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultAggregate {
    /// Best (lowest) score seen so far, per criterion.
    pub best_score: ScoreVec,
    /// Job id that produced `best_score`, per criterion.
    pub best_job_id: [u32; CRITERIA_COUNT],
}

impl ResultAggregate {
    /// An empty aggregate: all scores at `+inf`.
    pub fn new() -> Self {
        Self {
            best_score: [f64::INFINITY; CRITERIA_COUNT],
            best_job_id: [0; CRITERIA_COUNT],
        }
    }

    /// Whether any result has been folded in yet.
    pub fn is_empty(&self) -> bool {
        self.best_score.iter().all(|s| s.is_infinite())
    }

    /// Fold one job's scores into the aggregate.
    pub fn fold(&mut self, job_id: u32, scores: &ScoreVec) {
        for i in 0..CRITERIA_COUNT {
            if scores[i] < self.best_score[i] {
                self.best_score[i] = scores[i];
                self.best_job_id[i] = job_id;
            }
        }
    }

    /// Merge another aggregate into this one.
    ///
    /// Used both for local accumulation and for the cross-worker reduction.
    pub fn merge(&mut self, other: &ResultAggregate) {
        for i in 0..CRITERIA_COUNT {
            if other.best_score[i] < self.best_score[i] {
                self.best_score[i] = other.best_score[i];
                self.best_job_id[i] = other.best_job_id[i];
            }
        }
    }

    /// The winning `(score, job id)` pair for a criterion, if anything has
    /// been folded in.
    pub fn best(&self, criterion: Criterion) -> Option<(f64, u32)> {
        let i = criterion.index();
        if self.best_score[i].is_finite() {
            Some((self.best_score[i], self.best_job_id[i]))
        } else {
            None
        }
    }
}

impl Default for ResultAggregate {
    fn default() -> Self {
        Self::new()
    }
}
