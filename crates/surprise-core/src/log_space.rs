use std::f64::consts::LN_10;

/// Default convergence tolerance, in orders of magnitude.
///
/// A term more than `10^-4` times smaller than the running tail total is
/// treated as negligible and ends the summation.
pub const DEFAULT_TOLERANCE: f64 = 4.0;

/// A probability carried in base-10 log space.
///
/// Probability one is its own variant so that "the event is certain" is never
/// decided by comparing a float against zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogProbability {
    /// Probability exactly one.
    Certain,
    /// `log10` of a probability strictly below one (`-inf` for zero).
    Log10(f64),
}

impl LogProbability {
    /// Probability zero.
    pub const IMPOSSIBLE: LogProbability = LogProbability::Log10(f64::NEG_INFINITY);

    /// Wrap a base-10 log. Non-negative logs (including rounding noise just
    /// above zero) saturate to [`LogProbability::Certain`].
    pub fn from_log10(log10: f64) -> Self {
        if log10 >= 0.0 {
            LogProbability::Certain
        } else {
            LogProbability::Log10(log10)
        }
    }

    pub fn log10(self) -> f64 {
        match self {
            LogProbability::Certain => 0.0,
            LogProbability::Log10(v) => v,
        }
    }

    /// Linear-scale probability. Underflows to zero for very small values.
    pub fn probability(self) -> f64 {
        match self {
            LogProbability::Certain => 1.0,
            LogProbability::Log10(v) => 10f64.powf(v),
        }
    }

    /// `-log10` of the probability; never negative.
    pub fn surprise(self) -> f64 {
        match self {
            LogProbability::Certain => 0.0,
            LogProbability::Log10(v) => -v,
        }
    }

    pub fn is_certain(self) -> bool {
        matches!(self, LogProbability::Certain)
    }

    /// Add the probability `term` to `self` without leaving log space.
    ///
    /// With `common = max(a, b)` and `diff = min(a, b) - common` the sum is
    /// `common + log10(1 + 10^diff)`; `diff <= 0` keeps the power in `(0, 1]`.
    pub fn fold(self, term: LogProbability) -> LogProbability {
        match (self, term) {
            (LogProbability::Certain, _) | (_, LogProbability::Certain) => {
                LogProbability::Certain
            }
            (LogProbability::Log10(a), LogProbability::Log10(b)) => {
                let common = a.max(b);
                if common.is_infinite() {
                    // Both operands are probability zero.
                    return LogProbability::IMPOSSIBLE;
                }
                let diff = a.min(b) - common;
                LogProbability::from_log10(common + 10f64.powf(diff).ln_1p() / LN_10)
            }
        }
    }
}

/// True when a term alone has probability one; nothing left to accumulate.
pub fn is_certain(term: LogProbability) -> bool {
    term.is_certain()
}

/// True when `term` sits more than `tolerance` orders of magnitude below the
/// running total, so every later (smaller) term is negligible.
pub fn has_converged(term: LogProbability, running_total: LogProbability, tolerance: f64) -> bool {
    term.log10() - running_total.log10() < -tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn from_log10_saturates_non_negative_values() {
        assert_eq!(LogProbability::from_log10(0.0), LogProbability::Certain);
        assert_eq!(LogProbability::from_log10(3e-16), LogProbability::Certain);
        assert_eq!(
            LogProbability::from_log10(-0.5),
            LogProbability::Log10(-0.5)
        );
    }

    #[test]
    fn surprise_is_never_negative() {
        assert_eq!(LogProbability::Certain.surprise(), 0.0);
        assert!(LogProbability::Certain.surprise().is_sign_positive());
        assert_eq!(LogProbability::Log10(-2.5).surprise(), 2.5);
        assert_eq!(LogProbability::IMPOSSIBLE.surprise(), f64::INFINITY);
    }

    #[test]
    fn fold_adds_linear_probabilities() {
        // 0.3 + 0.2 = 0.5
        let a = LogProbability::from_log10(0.3f64.log10());
        let b = LogProbability::from_log10(0.2f64.log10());
        let sum = a.fold(b);
        assert!(close(sum.log10(), 0.5f64.log10()), "got {sum:?}");
        // Order does not matter.
        assert!(close(b.fold(a).log10(), sum.log10()));
    }

    #[test]
    fn fold_handles_terms_far_below_double_range() {
        // 10^-400 + 10^-401 underflows in linear space but not in log space.
        let a = LogProbability::Log10(-400.0);
        let b = LogProbability::Log10(-401.0);
        let sum = a.fold(b);
        assert!(close(sum.log10(), -400.0 + 1.1f64.log10()), "got {sum:?}");
    }

    #[test]
    fn fold_saturates_at_certainty() {
        // Rounding can push a tail total past one; it must not go positive.
        let big = LogProbability::from_log10(0.6f64.log10());
        assert_eq!(big.fold(big), LogProbability::Certain);
        assert_eq!(
            LogProbability::Certain.fold(LogProbability::Log10(-3.0)),
            LogProbability::Certain
        );
    }

    #[test]
    fn fold_with_impossible_is_identity() {
        let a = LogProbability::Log10(-7.25);
        assert_eq!(a.fold(LogProbability::IMPOSSIBLE), a);
        assert_eq!(LogProbability::IMPOSSIBLE.fold(a), a);
        assert_eq!(
            LogProbability::IMPOSSIBLE.fold(LogProbability::IMPOSSIBLE),
            LogProbability::IMPOSSIBLE
        );
    }

    #[test]
    fn is_certain_only_for_probability_one() {
        assert!(is_certain(LogProbability::Certain));
        assert!(!is_certain(LogProbability::Log10(-1e-300)));
        assert!(!is_certain(LogProbability::IMPOSSIBLE));
    }

    #[test]
    fn has_converged_uses_strict_tolerance() {
        let total = LogProbability::Log10(-2.0);
        assert!(!has_converged(LogProbability::Log10(-6.0), total, 4.0));
        assert!(has_converged(LogProbability::Log10(-6.5), total, 4.0));
        assert!(!has_converged(LogProbability::Log10(-6.5), total, 5.0));
        assert!(has_converged(LogProbability::IMPOSSIBLE, total, 4.0));
        assert!(has_converged(
            LogProbability::Log10(-4.5),
            LogProbability::Certain,
            DEFAULT_TOLERANCE
        ));
    }

    #[test]
    fn probability_round_trips_log10() {
        assert_eq!(LogProbability::Certain.probability(), 1.0);
        assert!(close(LogProbability::Log10(-1.0).probability(), 0.1));
        assert_eq!(LogProbability::IMPOSSIBLE.probability(), 0.0);
    }
}
