//! Arbitrary-precision reference evaluation.
//!
//! Sums the hypergeometric tail with exact rational arithmetic. Cost grows
//! with the size of the binomial coefficients, so this is meant for
//! validating the log-space engine on small and medium networks.

use std::f64::consts::LOG10_2;

use num::bigint::BigInt;
use num::rational::BigRational;
use num::traits::{One, ToPrimitive, Zero};

use crate::hypergeometric::HypergeometricParams;
use crate::surprise::SurpriseParams;

/// Exact binomial coefficient C(n, k) using BigInt.
///
/// # Returns
/// Exact integer value of `C(n, k)`; zero when `k > n`.
pub fn binomial(n: u64, k: u64) -> BigInt {
    if k > n {
        return BigInt::zero();
    }
    // Use the smaller of k and n-k for efficiency
    let k = std::cmp::min(k, n - k);
    if k == 0 {
        return BigInt::one();
    }
    let mut result = BigInt::one();
    for i in 0..k {
        result *= BigInt::from(n - i);
        result /= BigInt::from(i + 1);
    }
    result
}

/// Exact PMF: `P(X = j) = C(M, j) * C(F - M, n - j) / C(F, n)`.
///
/// # Returns
/// Exact probability mass; zero outside the support.
pub fn pmf(params: &HypergeometricParams, j: u64) -> BigRational {
    if j > params.max_val() || j < params.min_val() {
        return BigRational::zero();
    }

    let numerator = binomial(params.successes, j)
        * binomial(params.population - params.successes, params.draws - j);
    let denominator = binomial(params.population, params.draws);

    if denominator.is_zero() {
        return BigRational::zero();
    }

    BigRational::new(numerator, denominator)
}

/// Exact upper tail `P(X >= p)`.
pub fn upper_tail(params: &SurpriseParams) -> BigRational {
    let mut result = BigRational::zero();
    for j in params.observed..=params.hyper.max_val() {
        result += pmf(&params.hyper, j);
    }
    result
}

/// `-log10 P(X >= p)` from the exact tail.
///
/// The logarithm is taken from the numerator and denominator separately so
/// that tails far below `f64::MIN_POSITIVE` still produce a finite score.
pub fn exact_surprise(params: &SurpriseParams) -> f64 {
    let tail = upper_tail(params);
    let log10 = log10_magnitude(tail.numer()) - log10_magnitude(tail.denom());
    (-log10).max(0.0)
}

/// `log10 |x|`, keeping only the top 64 significant bits of `x`.
fn log10_magnitude(x: &BigInt) -> f64 {
    let shift = x.bits().saturating_sub(64);
    let top = (x >> shift).to_f64().unwrap_or(0.0).abs();
    top.log10() + shift as f64 * LOG10_2
}
