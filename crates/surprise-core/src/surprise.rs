use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::hypergeometric::{self, HypergeometricError, HypergeometricParams};
use crate::log_space::{has_converged, is_certain, LogProbability, DEFAULT_TOLERANCE};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurpriseError {
    #[error("{0}")]
    Hypergeometric(#[from] HypergeometricError),
    #[error(
        "Invalid parameters: intra-community links p={observed} exceed min(n={draws}, M={successes})"
    )]
    ObservedOutOfRange {
        observed: u64,
        draws: u64,
        successes: u64,
    },
    #[error("Invalid parameters: {name} must be a non-negative integer count, got {value}")]
    NotACount { name: &'static str, value: f64 },
    #[error("Convergence tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f64),
    #[error("Unknown term strategy '{0}' (expected 'direct' or 'incremental')")]
    UnknownStrategy(String),
}

/// The four Surprise parameters: F, M and n describe the null model, p is
/// the observed number of intra-community links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurpriseParams {
    pub hyper: HypergeometricParams,
    /// Observed intra-community links (p).
    pub observed: u64,
}

impl SurpriseParams {
    /// Validate `(F, M, n, p)`: `M <= F`, `n <= F` and `p <= min(n, M)`.
    pub fn new(
        total_pairs: u64,
        intra_pairs: u64,
        links: u64,
        intra_links: u64,
    ) -> Result<Self, SurpriseError> {
        let hyper = HypergeometricParams::new(total_pairs, intra_pairs, links)?;
        if intra_links > hyper.max_val() {
            return Err(SurpriseError::ObservedOutOfRange {
                observed: intra_links,
                draws: links,
                successes: intra_pairs,
            });
        }
        Ok(Self {
            hyper,
            observed: intra_links,
        })
    }

    /// Accept counts stored as floating point. Negative, fractional and
    /// non-finite values are rejected before the range checks of [`Self::new`].
    pub fn from_f64(
        total_pairs: f64,
        intra_pairs: f64,
        links: f64,
        intra_links: f64,
    ) -> Result<Self, SurpriseError> {
        Self::new(
            as_count("F", total_pairs)?,
            as_count("M", intra_pairs)?,
            as_count("n", links)?,
            as_count("p", intra_links)?,
        )
    }

    pub fn total_pairs(&self) -> u64 {
        self.hyper.population
    }

    pub fn intra_pairs(&self) -> u64 {
        self.hyper.successes
    }

    pub fn links(&self) -> u64 {
        self.hyper.draws
    }

    pub fn intra_links(&self) -> u64 {
        self.observed
    }
}

fn as_count(name: &'static str, value: f64) -> Result<u64, SurpriseError> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value >= u64::MAX as f64 {
        return Err(SurpriseError::NotACount { name, value });
    }
    Ok(value as u64)
}

/// How successive tail terms are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermStrategy {
    /// Every term from three log-binomials.
    Direct,
    /// First term from log-binomials, each later one from the previous term
    /// and the PMF ratio.
    #[default]
    Incremental,
}

impl TermStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            TermStrategy::Direct => "direct",
            TermStrategy::Incremental => "incremental",
        }
    }
}

impl FromStr for TermStrategy {
    type Err = SurpriseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" => Ok(TermStrategy::Direct),
            "incremental" => Ok(TermStrategy::Incremental),
            other => Err(SurpriseError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Summation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurpriseConfig {
    /// Orders of magnitude below the running total at which a term is
    /// considered negligible.
    pub tolerance: f64,
    pub strategy: TermStrategy,
}

impl Default for SurpriseConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            strategy: TermStrategy::default(),
        }
    }
}

impl SurpriseConfig {
    pub fn validate(&self) -> Result<(), SurpriseError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(SurpriseError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}

/// Why the tail summation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Every feasible term up to `min(n, M)` was folded.
    RangeExhausted,
    /// The newest term fell below the tolerance.
    Converged,
    /// A term had probability one.
    CertainTerm,
    /// The running total reached probability one.
    Saturated,
}

impl StopReason {
    pub fn as_str(self) -> &'static str {
        match self {
            StopReason::RangeExhausted => "range_exhausted",
            StopReason::Converged => "converged",
            StopReason::CertainTerm => "certain_term",
            StopReason::Saturated => "saturated",
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One folded term of the tail sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummationStep {
    pub j: u64,
    pub term: LogProbability,
    pub running_total: LogProbability,
}

/// Result of a Surprise evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct SurpriseReport {
    pub params: SurpriseParams,
    pub config: SurpriseConfig,
    /// `log10 P(X >= p)` as accumulated.
    pub log_probability: LogProbability,
    /// `-log10 P(X >= p)`.
    pub score: f64,
    /// First `j` folded into the sum.
    pub first_term: u64,
    /// Last `j` folded into the sum.
    pub last_term: u64,
    pub terms_folded: u64,
    pub stop: StopReason,
}

impl std::fmt::Display for SurpriseReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "F = {}, M = {}, n = {}, p = {}",
            self.params.total_pairs(),
            self.params.intra_pairs(),
            self.params.links(),
            self.params.intra_links()
        )?;
        writeln!(
            f,
            "  Terms folded: {} (j = {}..={}, stopped: {})",
            self.terms_folded, self.first_term, self.last_term, self.stop
        )?;
        write!(f, "Surprise = {}", self.score)
    }
}

/// Surprise of `params` with the default tolerance and term strategy.
pub fn compute_surprise(params: &SurpriseParams) -> f64 {
    sum_tail(params, &SurpriseConfig::default(), |_| {}).score
}

/// Surprise of `params` under an explicit configuration.
pub fn compute_surprise_with(
    params: &SurpriseParams,
    config: &SurpriseConfig,
) -> Result<SurpriseReport, SurpriseError> {
    config.validate()?;
    Ok(sum_tail(params, config, |_| {}))
}

/// Like [`compute_surprise_with`], also returning every summation step.
pub fn surprise_trace(
    params: &SurpriseParams,
    config: &SurpriseConfig,
) -> Result<(SurpriseReport, Vec<SummationStep>), SurpriseError> {
    config.validate()?;
    let mut steps = Vec::new();
    let report = sum_tail(params, config, |step| steps.push(step));
    Ok((report, steps))
}

/// Accumulate `P(X >= p)` term by term, from the first feasible `j` upward.
///
/// Stops when `j` reaches `min(n, M)`, when a new term is negligible against
/// the running total, or when a term or the total reaches probability one.
fn sum_tail(
    params: &SurpriseParams,
    config: &SurpriseConfig,
    mut on_step: impl FnMut(SummationStep),
) -> SurpriseReport {
    let hyper = &params.hyper;
    let j_max = hyper.max_val();
    // Terms below the support carry no mass.
    let first_term = std::cmp::max(params.observed, hyper.min_val());

    let mut j = first_term;
    let mut term = hypergeometric::log_pmf(hyper, j);
    let mut total = term;
    let mut last_term = j;
    let mut terms_folded = 1;
    on_step(SummationStep {
        j,
        term,
        running_total: total,
    });

    let mut stop = StopReason::RangeExhausted;
    while j < j_max {
        if total.is_certain() {
            stop = StopReason::Saturated;
            break;
        }
        let next = match config.strategy {
            TermStrategy::Direct => hypergeometric::log_pmf(hyper, j + 1),
            TermStrategy::Incremental => LogProbability::from_log10(
                term.log10() + hypergeometric::pmf_ratio_log10(hyper, j),
            ),
        };
        j += 1;
        term = next;
        // A certain term is still folded: `Certain` absorbs the total.
        total = total.fold(term);
        last_term = j;
        terms_folded += 1;
        trace!(j, term = term.log10(), total = total.log10(), "folded tail term");
        on_step(SummationStep {
            j,
            term,
            running_total: total,
        });
        if is_certain(term) {
            stop = StopReason::CertainTerm;
            break;
        }
        if has_converged(term, total, config.tolerance) {
            stop = StopReason::Converged;
            break;
        }
    }

    let score = total.surprise();
    debug!(
        f = hyper.population,
        m = hyper.successes,
        n = hyper.draws,
        p = params.observed,
        expected = hyper.expected_value(),
        terms_folded,
        stop = stop.as_str(),
        score,
        "surprise computed"
    );
    SurpriseReport {
        params: *params,
        config: *config,
        log_probability: total,
        score,
        first_term,
        last_term,
        terms_folded,
        stop,
    }
}
