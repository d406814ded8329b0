use std::path::Path;

use surprise_core::SurpriseParams;
use tracing::info;

use crate::errors::NetworkError;
use crate::network::{parse_network, Network};
use crate::partition::{parse_partition, Partition};

/// Number of unordered pairs among `size` items: `size * (size - 1) / 2`.
pub fn pair_count(size: u64) -> u64 {
    size * size.saturating_sub(1) / 2
}

/// Count the four Surprise parameters of a partitioned network.
///
/// - `F`: node pairs in the network.
/// - `M`: node pairs inside communities, summed over communities.
/// - `n`: links.
/// - `p`: links whose endpoints share a community.
pub fn derive_parameters(
    network: &Network,
    partition: &Partition,
) -> Result<SurpriseParams, NetworkError> {
    if partition.node_count() != network.node_count() {
        return Err(NetworkError::PartitionMismatch {
            network_nodes: network.node_count(),
            partition_nodes: partition.node_count(),
        });
    }

    let total_pairs = pair_count(network.node_count() as u64);
    let intra_pairs: u64 = partition.sizes().iter().map(|&s| pair_count(s)).sum();
    let links = network.edge_count() as u64;
    let intra_links = network
        .edges()
        .filter(|&(a, b)| partition.same_community(a, b))
        .count() as u64;

    info!(
        nodes = network.node_count(),
        communities = partition.community_count(),
        "F = {total_pairs}, M = {intra_pairs}, n = {links}, p = {intra_links}"
    );
    Ok(SurpriseParams::new(
        total_pairs,
        intra_pairs,
        links,
        intra_links,
    )?)
}

/// Read a file as text, mapping failures to [`NetworkError::Io`].
pub fn read_source(path: &Path) -> Result<String, NetworkError> {
    std::fs::read_to_string(path).map_err(|source| NetworkError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read an edge list and a partition file and derive their parameters.
pub fn load_parameters(
    network_path: &Path,
    partition_path: &Path,
) -> Result<SurpriseParams, NetworkError> {
    let network_src = read_source(network_path)?;
    let network = parse_network(&network_src, &network_path.display().to_string())?;
    let partition_src = read_source(partition_path)?;
    let partition = parse_partition(
        &partition_src,
        &partition_path.display().to_string(),
        &network,
    )?;
    derive_parameters(&network, &partition)
}
