#![doc = include_str!("../README.md")]

mod cli;
mod commands;
mod types;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::compute::{run_compute_command, ComputeArgs};
use commands::helpers::{config_from_cli, parse_output_format};
use commands::params::run_params_command;
use commands::score::run_score_command;

fn main() -> miette::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = parse_output_format(&cli.format)?;
    let config = config_from_cli(&cli)?;

    match cli.command {
        Commands::Score { network, partition } => {
            run_score_command(&network, &partition, &config, format, cli.trace)?;
        }
        Commands::Params { network, partition } => {
            run_params_command(&network, &partition, format)?;
        }
        Commands::Compute {
            total_pairs,
            intra_pairs,
            links,
            intra_links,
            exact,
        } => {
            let args = ComputeArgs {
                total_pairs,
                intra_pairs,
                links,
                intra_links,
                exact,
            };
            run_compute_command(&args, &config, format, cli.trace)?;
        }
    }

    Ok(())
}
