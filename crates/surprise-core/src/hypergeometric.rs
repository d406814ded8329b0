use std::f64::consts::LN_10;

use thiserror::Error;

use crate::log_space::LogProbability;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HypergeometricError {
    #[error(
        "Invalid parameters: total pairs F={population}, intra-community pairs M={successes}, links n={draws} (need M <= F and n <= F)"
    )]
    InvalidParams {
        population: u64,
        successes: u64,
        draws: u64,
    },
}

/// Parameters for a hypergeometric distribution over node pairs.
///
/// Models placing n links on F possible node pairs without replacement,
/// where M of the pairs are intra-community. X is the number of links that
/// land inside a community.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HypergeometricParams {
    /// Total possible node pairs (F).
    pub population: u64,
    /// Intra-community node pairs (M).
    pub successes: u64,
    /// Observed links (n).
    pub draws: u64,
}

impl HypergeometricParams {
    /// Construct validated hypergeometric parameters.
    ///
    /// # Returns
    /// Validated parameters or [`HypergeometricError::InvalidParams`].
    pub fn new(population: u64, successes: u64, draws: u64) -> Result<Self, HypergeometricError> {
        if successes > population || draws > population {
            return Err(HypergeometricError::InvalidParams {
                population,
                successes,
                draws,
            });
        }
        Ok(Self {
            population,
            successes,
            draws,
        })
    }

    /// Minimum possible value of `X`: `max(0, n - (F - M))`.
    pub fn min_val(&self) -> u64 {
        (self.draws + self.successes).saturating_sub(self.population)
    }

    /// Maximum possible value of `X`: `min(n, M)`.
    pub fn max_val(&self) -> u64 {
        std::cmp::min(self.successes, self.draws)
    }

    /// True when the support is a single point, i.e. `X` is deterministic.
    pub fn is_degenerate(&self) -> bool {
        self.min_val() == self.max_val()
    }

    /// Expected value `E\[X\] = n * M / F`.
    pub fn expected_value(&self) -> f64 {
        if self.population == 0 {
            return 0.0;
        }
        (self.draws as f64) * (self.successes as f64) / (self.population as f64)
    }
}

/// `log10` of the binomial coefficient `C(total, k)`.
///
/// Only the shorter half of the product is summed: with
/// `t = max(k, total - k)`,
/// `ln C(total, k) = sum(ln i, i in t+1..=total) - sum(ln i, i in 2..=total-t)`,
/// so the work is `O(min(k, total - k))` and no factorial is ever formed.
///
/// # Returns
/// Exactly `0.0` when `k == 0` or `k == total`; `-inf` when `k > total`.
pub fn log_binomial(total: u64, k: u64) -> f64 {
    if k > total {
        return f64::NEG_INFINITY;
    }
    if k == 0 || k == total {
        return 0.0;
    }
    let t = std::cmp::max(k, total - k);
    (sum_ln(t + 1, total) - sum_ln(2, total - t)) / LN_10
}

fn sum_ln(from: u64, to: u64) -> f64 {
    (from..=to).map(|i| (i as f64).ln()).sum()
}

/// `log10 P(X = j)` = `log C(M, j) + log C(F - M, n - j) - log C(F, n)`.
///
/// # Returns
/// [`LogProbability::Certain`] when the distribution is degenerate and `j`
/// is its only value, [`LogProbability::IMPOSSIBLE`] outside the support.
pub fn log_pmf(params: &HypergeometricParams, j: u64) -> LogProbability {
    if j < params.min_val() || j > params.max_val() {
        return LogProbability::IMPOSSIBLE;
    }
    if params.is_degenerate() {
        return LogProbability::Certain;
    }
    let log10 = log_binomial(params.successes, j)
        + log_binomial(params.population - params.successes, params.draws - j)
        - log_binomial(params.population, params.draws);
    LogProbability::from_log10(log10)
}

/// `log10 (P(X = j + 1) / P(X = j))` for `min_val <= j < max_val`:
/// `log10((M - j)(n - j)) - log10((j + 1)(F - M - n + j + 1))`.
///
/// All four factors are positive inside that range.
pub fn pmf_ratio_log10(params: &HypergeometricParams, j: u64) -> f64 {
    debug_assert!(j >= params.min_val() && j < params.max_val());
    let remaining_successes = (params.successes - j) as f64;
    let remaining_draws = (params.draws - j) as f64;
    let next = (j + 1) as f64;
    let failures_drawn =
        (params.population - params.successes + j + 1 - params.draws) as f64;
    remaining_successes.log10() + remaining_draws.log10() - next.log10() - failures_drawn.log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn log_binomial_known_values() {
        assert_eq!(log_binomial(0, 0), 0.0);
        assert_eq!(log_binomial(5, 0), 0.0);
        assert_eq!(log_binomial(5, 5), 0.0);
        assert!(close(log_binomial(5, 2), 10f64.log10(), 1e-12));
        assert!(close(log_binomial(10, 3), 120f64.log10(), 1e-12));
        assert_eq!(log_binomial(3, 5), f64::NEG_INFINITY);
    }

    #[test]
    fn log_binomial_large_arguments_stay_finite() {
        // C(100, 50) = 100891344545564193334812497256
        let expected = 100891344545564193334812497256f64.log10();
        assert!(close(log_binomial(100, 50), expected, 1e-10));

        // Far beyond factorial range; C(10^7, 3) ~ 1.6667e20.
        let big = log_binomial(10_000_000, 3);
        let expected = (1e7f64 * (1e7 - 1.0) * (1e7 - 2.0) / 6.0).log10();
        assert!(close(big, expected, 1e-9), "got {big}, want {expected}");
    }

    #[test]
    fn log_pmf_known_values() {
        // N=10, K=3, S=4: P(X=0) = C(3,0)*C(7,4)/C(10,4) = 35/210 = 1/6
        let params = HypergeometricParams::new(10, 3, 4).unwrap();
        let p0 = log_pmf(&params, 0);
        assert!(close(p0.log10(), (1.0f64 / 6.0).log10(), 1e-12));
        // P(X=2) = 3*21/210 = 0.3
        assert!(close(log_pmf(&params, 2).log10(), 0.3f64.log10(), 1e-12));
    }

    #[test]
    fn log_pmf_outside_support_is_impossible() {
        let params = HypergeometricParams::new(10, 3, 4).unwrap();
        assert_eq!(log_pmf(&params, 4), LogProbability::IMPOSSIBLE);
        assert_eq!(log_pmf(&params, 100), LogProbability::IMPOSSIBLE);

        // n=9 of F=10 with F-M=7: at least 2 must land inside.
        let crowded = HypergeometricParams::new(10, 3, 9).unwrap();
        assert_eq!(crowded.min_val(), 2);
        assert_eq!(log_pmf(&crowded, 1), LogProbability::IMPOSSIBLE);
    }

    #[test]
    fn degenerate_supports_are_certain() {
        // M = 0: no intra-community pairs.
        let none = HypergeometricParams::new(6, 0, 3).unwrap();
        assert!(none.is_degenerate());
        assert_eq!(log_pmf(&none, 0), LogProbability::Certain);

        // n = F: every pair is a link, X = M.
        let full = HypergeometricParams::new(6, 2, 6).unwrap();
        assert!(full.is_degenerate());
        assert_eq!(full.min_val(), 2);
        assert_eq!(log_pmf(&full, 2), LogProbability::Certain);

        // Empty network.
        let empty = HypergeometricParams::new(0, 0, 0).unwrap();
        assert_eq!(log_pmf(&empty, 0), LogProbability::Certain);
    }

    #[test]
    fn pmf_ratio_matches_consecutive_terms() {
        let params = HypergeometricParams::new(45, 12, 15).unwrap();
        for j in params.min_val()..params.max_val() {
            let direct = log_pmf(&params, j + 1).log10() - log_pmf(&params, j).log10();
            let ratio = pmf_ratio_log10(&params, j);
            assert!(close(direct, ratio, 1e-10), "j={j}: {direct} vs {ratio}");
        }
    }

    #[test]
    fn test_expected_value() {
        let params = HypergeometricParams::new(1000, 333, 100).unwrap();
        let ev = params.expected_value();
        assert!((ev - 33.3).abs() < 0.1);
    }

    #[test]
    fn expected_value_zero_population() {
        let params = HypergeometricParams {
            population: 0,
            successes: 0,
            draws: 0,
        };
        assert_eq!(params.expected_value(), 0.0);
    }

    #[test]
    fn test_invalid_params() {
        assert!(HypergeometricParams::new(10, 20, 5).is_err()); // M > F
        assert!(HypergeometricParams::new(10, 5, 20).is_err()); // n > F
        assert!(HypergeometricParams::new(10, 10, 10).is_ok());
    }

    // ---------------------------------------------------------------
    // Proptest: property-based / randomized tests
    // ---------------------------------------------------------------

    use proptest::prelude::*;
    use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence, RngAlgorithm};

    fn prob_proptest_config() -> ProptestConfig {
        ProptestConfig {
            cases: 64,
            source_file: Some(file!()),
            failure_persistence: Some(Box::new(FileFailurePersistence::WithSource(
                "proptest-regressions",
            ))),
            rng_algorithm: RngAlgorithm::ChaCha,
            ..ProptestConfig::default()
        }
    }

    proptest! {
        #![proptest_config(prob_proptest_config())]

        /// C(n, k) = C(n, n - k).
        #[test]
        fn log_binomial_symmetry(total in 0u64..5_000, k_frac in 0.0f64..=1.0) {
            let k = (k_frac * total as f64) as u64;
            prop_assert_eq!(log_binomial(total, k), log_binomial(total, total - k));
        }

        /// C(n, 0) = C(n, n) = 1.
        #[test]
        fn log_binomial_boundaries_are_zero(total in 0u64..1_000_000) {
            prop_assert_eq!(log_binomial(total, 0), 0.0);
            prop_assert_eq!(log_binomial(total, total), 0.0);
        }

        /// Pascal's rule in linear space: C(n, k) = C(n-1, k-1) + C(n-1, k).
        #[test]
        fn log_binomial_pascals_rule(n in 2u64..300, k_frac in 0.0f64..1.0) {
            let k = 1 + (k_frac * (n - 1) as f64) as u64;
            prop_assume!(k < n);
            let lhs = log_binomial(n, k);
            let a = log_binomial(n - 1, k - 1);
            let b = log_binomial(n - 1, k);
            let rhs = LogProbability::Log10(a - lhs).fold(LogProbability::Log10(b - lhs));
            prop_assert!(
                rhs.log10().abs() < 1e-9,
                "C({n},{k}) does not satisfy Pascal's rule: residual {}",
                rhs.log10()
            );
        }
    }
}
