// Command handler for: Params

use std::path::Path;

use surprise_net::{derive_parameters, parse_network, parse_partition, read_source};

use crate::commands::helpers::print_json;
use crate::types::{OutputFormat, ParameterSummary, ParamsReport};

pub(crate) fn run_params_command(
    network_path: &Path,
    partition_path: &Path,
    format: OutputFormat,
) -> miette::Result<()> {
    let network_src = read_source(network_path)?;
    let network = parse_network(&network_src, &network_path.display().to_string())?;
    let partition_src = read_source(partition_path)?;
    let partition = parse_partition(
        &partition_src,
        &partition_path.display().to_string(),
        &network,
    )?;
    let params = derive_parameters(&network, &partition)?;

    let report = ParamsReport {
        nodes: network.node_count(),
        communities: partition.community_count(),
        parameters: ParameterSummary::from(&params),
    };
    match format {
        OutputFormat::Text => println!("{}", render_params_text(&report)),
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(())
}

fn render_params_text(report: &ParamsReport) -> String {
    let p = &report.parameters;
    format!(
        "Nodes: {}, communities: {}\nF = {}, M = {}, n = {}, p = {}",
        report.nodes, report.communities, p.total_pairs, p.intra_pairs, p.n, p.p
    )
}
