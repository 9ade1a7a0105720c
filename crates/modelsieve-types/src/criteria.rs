//! The fixed set of model-selection criteria.
//!
//! Every job is scored under all criteria at once; lower is always better.
//! The two sample-size flavors differ in what counts as an observation:
//! alignment sites only, or sites times sequences (every matrix cell).

use serde::{Deserialize, Serialize};

/// Number of criteria in [`Criterion`]. Score vectors have this length.
pub const CRITERIA_COUNT: usize = 5;

/// Per-criterion score vector, indexed by `Criterion as usize`.
pub type ScoreVec = [f64; CRITERIA_COUNT];

/// One scalar model-selection criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Criterion {
    /// Akaike information criterion: `-2L + 2k`.
    Aic,
    /// Small-sample corrected AIC with `n` = alignment sites.
    AiccSites,
    /// Small-sample corrected AIC with `n` = sites × sequences.
    AiccCells,
    /// Bayesian information criterion with `n` = alignment sites.
    BicSites,
    /// Bayesian information criterion with `n` = sites × sequences.
    BicCells,
}

impl Criterion {
    /// All criteria, in score-vector order.
    pub const ALL: [Criterion; CRITERIA_COUNT] = [
        Criterion::Aic,
        Criterion::AiccSites,
        Criterion::AiccCells,
        Criterion::BicSites,
        Criterion::BicCells,
    ];

    /// Position of this criterion within a [`ScoreVec`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short label used in report columns.
    pub fn label(self) -> &'static str {
        match self {
            Criterion::Aic => "AIC",
            Criterion::AiccSites => "AICc(n)",
            Criterion::AiccCells => "AICc(nm)",
            Criterion::BicSites => "BIC(n)",
            Criterion::BicCells => "BIC(nm)",
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_covers_score_vec() {
        assert_eq!(Criterion::ALL.len(), CRITERIA_COUNT);
        for (i, c) in Criterion::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn test_labels_unique() {
        let labels: std::collections::HashSet<_> =
            Criterion::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels.len(), CRITERIA_COUNT);
    }
}
