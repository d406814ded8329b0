//! Shared types used across CLI commands and tests.

use serde::Serialize;

use surprise_core::{StopReason, SummationStep, SurpriseParams, SurpriseReport, TermStrategy};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// The four counts under their conventional names.
#[derive(Clone, Copy, Debug, Serialize)]
pub(crate) struct ParameterSummary {
    #[serde(rename = "F")]
    pub(crate) total_pairs: u64,
    #[serde(rename = "M")]
    pub(crate) intra_pairs: u64,
    pub(crate) n: u64,
    pub(crate) p: u64,
}

impl From<&SurpriseParams> for ParameterSummary {
    fn from(params: &SurpriseParams) -> Self {
        Self {
            total_pairs: params.total_pairs(),
            intra_pairs: params.intra_pairs(),
            n: params.links(),
            p: params.intra_links(),
        }
    }
}

/// Output of `surprise params`.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct ParamsReport {
    pub(crate) nodes: usize,
    pub(crate) communities: usize,
    pub(crate) parameters: ParameterSummary,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub(crate) struct TraceStep {
    pub(crate) j: u64,
    pub(crate) log10_term: f64,
    pub(crate) log10_total: f64,
}

impl From<&SummationStep> for TraceStep {
    fn from(step: &SummationStep) -> Self {
        Self {
            j: step.j,
            log10_term: step.term.log10(),
            log10_total: step.running_total.log10(),
        }
    }
}

/// Output of `surprise score` and `surprise compute`.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct ScoreReport {
    pub(crate) parameters: ParameterSummary,
    pub(crate) surprise: f64,
    pub(crate) log10_probability: f64,
    pub(crate) first_term: u64,
    pub(crate) last_term: u64,
    pub(crate) terms_folded: u64,
    pub(crate) stop: StopReason,
    pub(crate) tolerance: f64,
    pub(crate) strategy: TermStrategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) exact_surprise: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) trace: Vec<TraceStep>,
}

impl ScoreReport {
    pub(crate) fn new(report: &SurpriseReport, steps: &[SummationStep]) -> Self {
        Self {
            parameters: ParameterSummary::from(&report.params),
            surprise: report.score,
            log10_probability: report.log_probability.log10(),
            first_term: report.first_term,
            last_term: report.last_term,
            terms_folded: report.terms_folded,
            stop: report.stop,
            tolerance: report.config.tolerance,
            strategy: report.config.strategy,
            exact_surprise: None,
            trace: steps.iter().map(TraceStep::from).collect(),
        }
    }
}
