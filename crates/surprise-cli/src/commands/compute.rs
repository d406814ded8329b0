// Command handler for: Compute

use miette::IntoDiagnostic;
use tracing::{info, warn};

use surprise_core::{exact, SurpriseConfig, SurpriseParams};

use crate::commands::helpers::{evaluate, print_json, render_score_text};
use crate::types::OutputFormat;

/// Above this many feasible terms the exact tail is slow enough to mention.
const EXACT_TERM_WARNING: u64 = 100_000;

pub(crate) struct ComputeArgs {
    pub(crate) total_pairs: u64,
    pub(crate) intra_pairs: u64,
    pub(crate) links: u64,
    pub(crate) intra_links: u64,
    pub(crate) exact: bool,
}

pub(crate) fn run_compute_command(
    args: &ComputeArgs,
    config: &SurpriseConfig,
    format: OutputFormat,
    trace: bool,
) -> miette::Result<()> {
    let params = SurpriseParams::new(
        args.total_pairs,
        args.intra_pairs,
        args.links,
        args.intra_links,
    )
    .into_diagnostic()?;
    let mut report = evaluate(&params, config, trace)?;

    if args.exact {
        let terms = params.hyper.max_val() - params.observed + 1;
        if terms > EXACT_TERM_WARNING {
            warn!(terms, "exact evaluation sums every feasible term; this may take a while");
        }
        let exact = exact::exact_surprise(&params);
        info!(
            exact,
            approximate = report.surprise,
            "difference = {:e}",
            (exact - report.surprise).abs()
        );
        report.exact_surprise = Some(exact);
    }

    match format {
        OutputFormat::Text => println!("{}", render_score_text(&report)),
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(())
}
