// Command handler for: Score

use std::path::Path;

use surprise_core::SurpriseConfig;
use surprise_net::load_parameters;

use crate::commands::helpers::{evaluate, print_json, render_score_text};
use crate::types::OutputFormat;

pub(crate) fn run_score_command(
    network: &Path,
    partition: &Path,
    config: &SurpriseConfig,
    format: OutputFormat,
    trace: bool,
) -> miette::Result<()> {
    let params = load_parameters(network, partition)?;
    let report = evaluate(&params, config, trace)?;
    match format {
        OutputFormat::Text => println!("{}", render_score_text(&report)),
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(())
}
