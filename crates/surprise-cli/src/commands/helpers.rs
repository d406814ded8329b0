// Shared helper functions used across CLI command handlers.

use std::fmt::Write as _;

use miette::IntoDiagnostic;
use serde::Serialize;

use surprise_core::{surprise_trace, SurpriseConfig, SurpriseParams, TermStrategy};

use crate::cli::Cli;
use crate::types::{OutputFormat, ScoreReport, TraceStep};

pub(crate) fn parse_output_format(raw: &str) -> miette::Result<OutputFormat> {
    match raw {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(miette::miette!(
            "Unknown output format: {other}. Use 'text' or 'json'."
        )),
    }
}

pub(crate) fn config_from_cli(cli: &Cli) -> miette::Result<SurpriseConfig> {
    let strategy: TermStrategy = cli.strategy.parse().into_diagnostic()?;
    let config = SurpriseConfig {
        tolerance: cli.tolerance,
        strategy,
    };
    config.validate().into_diagnostic()?;
    Ok(config)
}

/// Run the engine, keeping the per-step trace only when asked for.
pub(crate) fn evaluate(
    params: &SurpriseParams,
    config: &SurpriseConfig,
    keep_trace: bool,
) -> miette::Result<ScoreReport> {
    let (report, steps) = surprise_trace(params, config).into_diagnostic()?;
    let steps = if keep_trace { steps } else { Vec::new() };
    Ok(ScoreReport::new(&report, &steps))
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> miette::Result<()> {
    let rendered = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn render_trace_text(steps: &[TraceStep]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>10}  {:>22}  {:>22}", "j", "log10 P(X = j)", "log10 P(X >= p)");
    for step in steps {
        let _ = writeln!(
            out,
            "{:>10}  {:>22.12}  {:>22.12}",
            step.j, step.log10_term, step.log10_total
        );
    }
    out
}

pub(crate) fn render_score_text(report: &ScoreReport) -> String {
    let mut out = String::new();
    if !report.trace.is_empty() {
        out.push_str(&render_trace_text(&report.trace));
        let _ = writeln!(
            out,
            "  Terms folded: {} (j = {}..={}, stopped: {})",
            report.terms_folded, report.first_term, report.last_term, report.stop
        );
    }
    if let Some(exact) = report.exact_surprise {
        let _ = writeln!(out, "Exact surprise = {exact}");
    }
    let _ = write!(out, "Surprise = {}", report.surprise);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use surprise_core::StopReason;

    use crate::types::ParameterSummary;

    fn report(trace: Vec<TraceStep>) -> ScoreReport {
        ScoreReport {
            parameters: ParameterSummary {
                total_pairs: 6,
                intra_pairs: 2,
                n: 3,
                p: 2,
            },
            surprise: 0.5,
            log10_probability: -0.5,
            first_term: 2,
            last_term: 2,
            terms_folded: 1,
            stop: StopReason::RangeExhausted,
            tolerance: 4.0,
            strategy: TermStrategy::Incremental,
            exact_surprise: None,
            trace,
        }
    }

    #[test]
    fn output_format_parsing() {
        assert_eq!(parse_output_format("text").unwrap(), OutputFormat::Text);
        assert_eq!(parse_output_format("json").unwrap(), OutputFormat::Json);
        assert!(parse_output_format("yaml").is_err());
    }

    #[test]
    fn plain_score_is_a_single_line() {
        assert_eq!(render_score_text(&report(Vec::new())), "Surprise = 0.5");
    }

    #[test]
    fn trace_rows_precede_the_score() {
        let text = render_score_text(&report(vec![TraceStep {
            j: 2,
            log10_term: -0.5,
            log10_total: -0.5,
        }]));
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].contains("log10 P(X = j)"));
        assert!(lines[1].trim_start().starts_with('2'));
        assert!(lines[2].contains("stopped: range_exhausted"));
        assert_eq!(lines.last().copied(), Some("Surprise = 0.5"));
    }

    #[test]
    fn evaluate_drops_trace_unless_requested() {
        let params = SurpriseParams::new(6, 2, 3, 2).unwrap();
        let config = SurpriseConfig::default();
        assert!(evaluate(&params, &config, false).unwrap().trace.is_empty());
        assert_eq!(evaluate(&params, &config, true).unwrap().trace.len(), 1);
    }
}
