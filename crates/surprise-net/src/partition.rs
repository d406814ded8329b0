use indexmap::IndexSet;

use crate::errors::NetworkError;
use crate::network::Network;
use crate::records::records;

/// Assignment of every network node to one community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    communities: IndexSet<String>,
    community_of: Vec<usize>,
    sizes: Vec<u64>,
}

impl Partition {
    /// Build a partition from per-node community indices.
    pub fn from_assignments(communities: IndexSet<String>, community_of: Vec<usize>) -> Self {
        let mut sizes = vec![0u64; communities.len()];
        for &c in &community_of {
            if let Some(size) = sizes.get_mut(c) {
                *size += 1;
            }
        }
        Self {
            communities,
            community_of,
            sizes,
        }
    }

    pub fn node_count(&self) -> usize {
        self.community_of.len()
    }

    pub fn community_count(&self) -> usize {
        self.communities.len()
    }

    /// Community index of a node, by node index.
    pub fn community_of(&self, node: usize) -> Option<usize> {
        self.community_of.get(node).copied()
    }

    pub fn community_label(&self, community: usize) -> Option<&str> {
        self.communities.get_index(community).map(String::as_str)
    }

    /// Number of nodes per community, indexed like [`Self::community_label`].
    pub fn sizes(&self) -> &[u64] {
        &self.sizes
    }

    pub fn same_community(&self, a: usize, b: usize) -> bool {
        match (self.community_of(a), self.community_of(b)) {
            (Some(ca), Some(cb)) => ca == cb,
            _ => false,
        }
    }
}

/// Parse `<node> <community>` lines against `network`.
///
/// Community identifiers are opaque labels. Every network node must be
/// assigned exactly once, and only network nodes may be assigned.
pub fn parse_partition(
    source: &str,
    filename: &str,
    network: &Network,
) -> Result<Partition, NetworkError> {
    let mut communities = IndexSet::new();
    let mut assigned: Vec<Option<usize>> = vec![None; network.node_count()];

    for record in records(source) {
        let (node, community) = record.pair().map_err(|found| {
            NetworkError::malformed(
                record.line,
                "a node label and a community",
                found,
                record.span,
                source,
                filename,
            )
        })?;
        let index = network
            .index_of(node.text)
            .ok_or_else(|| NetworkError::unknown_node(node.text, node.span, source, filename))?;
        if assigned[index].is_some() {
            return Err(NetworkError::duplicate(node.text, node.span, source, filename));
        }
        let (c, _) = communities.insert_full(community.text.to_owned());
        assigned[index] = Some(c);
    }

    let mut missing = assigned
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_none())
        .map(|(i, _)| i);
    if let Some(first) = missing.next() {
        return Err(NetworkError::MissingAssignment {
            label: network.label(first).unwrap_or_default().to_owned(),
            missing: 1 + missing.count(),
        });
    }

    let community_of = assigned.into_iter().flatten().collect();
    Ok(Partition::from_assignments(communities, community_of))
}
