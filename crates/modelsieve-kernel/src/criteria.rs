//! Pure criteria scoring.
//!
//! Maps a job's maximum log-likelihood and parameter/sample counts to one
//! score per [`Criterion`]. No side effects, no fallbacks; the numbers are
//! exact functions of their inputs.

use modelsieve_types::{Criterion, ScoreVec};

use crate::evaluate::{BaseFreqKind, Dataset};

/// The effective parameter count `k` used by every criterion.
///
/// On top of the model's free rate parameters this counts one branch-length
/// parameter per branch plus the rate-heterogeneity shape parameter, and
/// three more free frequencies when base frequencies are jointly optimized.
pub fn effective_parameter_count(
    free_parameter_count: u32,
    dataset: &Dataset,
    base_freq: BaseFreqKind,
) -> u32 {
    let extra = match base_freq {
        BaseFreqKind::Empirical | BaseFreqKind::Equal => 1,
        BaseFreqKind::Optimized => 4,
    };
    free_parameter_count + extra + dataset.branch_count()
}

/// Score a likelihood under every criterion at once.
pub fn criterion_scores(
    likelihood: f64,
    free_parameter_count: u32,
    dataset: &Dataset,
    base_freq: BaseFreqKind,
) -> ScoreVec {
    let k = f64::from(effective_parameter_count(
        free_parameter_count,
        dataset,
        base_freq,
    ));
    let sites = f64::from(dataset.sites);
    let cells = f64::from(dataset.sites) * f64::from(dataset.sequences);

    let mut scores = [0.0; modelsieve_types::CRITERIA_COUNT];
    for criterion in Criterion::ALL {
        scores[criterion.index()] = match criterion {
            Criterion::Aic => aic(likelihood, k),
            Criterion::AiccSites => aicc(likelihood, k, sites),
            Criterion::AiccCells => aicc(likelihood, k, cells),
            Criterion::BicSites => bic(likelihood, k, sites),
            Criterion::BicCells => bic(likelihood, k, cells),
        };
    }
    scores
}

fn aic(likelihood: f64, k: f64) -> f64 {
    -2.0 * likelihood + 2.0 * k
}

fn aicc(likelihood: f64, k: f64, n: f64) -> f64 {
    aic(likelihood, k) + (2.0 * k * (k + 1.0)) / (n - k - 1.0)
}

fn bic(likelihood: f64, k: f64, n: f64) -> f64 {
    -2.0 * likelihood + k * n.ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: Dataset = Dataset {
        sites: 1000,
        sequences: 8,
    };

    #[test]
    fn test_effective_parameter_count() {
        // 8 sequences => 13 branches
        assert_eq!(
            effective_parameter_count(5, &DATASET, BaseFreqKind::Empirical),
            5 + 1 + 13
        );
        assert_eq!(
            effective_parameter_count(5, &DATASET, BaseFreqKind::Equal),
            5 + 1 + 13
        );
        assert_eq!(
            effective_parameter_count(5, &DATASET, BaseFreqKind::Optimized),
            5 + 4 + 13
        );
    }

    #[test]
    fn test_aic_formula() {
        let scores = criterion_scores(-1234.5, 0, &DATASET, BaseFreqKind::Empirical);
        let k = 14.0;
        assert_eq!(scores[Criterion::Aic.index()], 2.0 * 1234.5 + 2.0 * k);
    }

    #[test]
    fn test_aicc_exceeds_aic() {
        let scores = criterion_scores(-1234.5, 3, &DATASET, BaseFreqKind::Empirical);
        let aic = scores[Criterion::Aic.index()];
        assert!(scores[Criterion::AiccSites.index()] > aic);
        assert!(scores[Criterion::AiccCells.index()] > aic);
        // the correction shrinks as n grows
        assert!(scores[Criterion::AiccCells.index()] < scores[Criterion::AiccSites.index()]);
    }

    #[test]
    fn test_bic_formula() {
        let lnl = -987.25;
        let scores = criterion_scores(lnl, 2, &DATASET, BaseFreqKind::Empirical);
        let k = 16.0;
        let n = 1000.0_f64;
        let expected = -2.0 * lnl + k * n.ln();
        assert!((scores[Criterion::BicSites.index()] - expected).abs() < 1e-9);
        let n_cells = 8000.0_f64;
        let expected_cells = -2.0 * lnl + k * n_cells.ln();
        assert!((scores[Criterion::BicCells.index()] - expected_cells).abs() < 1e-9);
    }

    #[test]
    fn test_scores_are_deterministic() {
        let a = criterion_scores(-55.5, 4, &DATASET, BaseFreqKind::Optimized);
        let b = criterion_scores(-55.5, 4, &DATASET, BaseFreqKind::Optimized);
        assert_eq!(a, b);
    }
}
