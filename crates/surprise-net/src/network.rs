use indexmap::IndexSet;
use tracing::warn;

use crate::errors::NetworkError;
use crate::records::records;

/// An undirected simple graph read from an edge list.
///
/// Nodes are numbered in order of first appearance. Each edge is stored once
/// as `(low, high)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Network {
    nodes: IndexSet<String>,
    edges: IndexSet<(usize, usize)>,
}

impl Network {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.nodes.get_index_of(label)
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.nodes.get_index(index).map(String::as_str)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().copied()
    }

    /// Register `label` as a node, returning its index.
    pub fn add_node(&mut self, label: &str) -> usize {
        match self.nodes.get_index_of(label) {
            Some(index) => index,
            None => self.nodes.insert_full(label.to_owned()).0,
        }
    }

    /// Add an undirected edge. Returns `false` for self-loops and edges that
    /// are already present.
    pub fn add_edge(&mut self, a: usize, b: usize) -> bool {
        if a == b {
            return false;
        }
        self.edges.insert((a.min(b), a.max(b)))
    }
}

/// Parse a whitespace-separated edge list: one `<node> <node>` pair per line.
///
/// Self-loops and repeated edges are dropped with a warning so the derived
/// link count never exceeds the number of node pairs.
pub fn parse_network(source: &str, filename: &str) -> Result<Network, NetworkError> {
    let mut network = Network::default();
    for record in records(source) {
        let (a, b) = record.pair().map_err(|found| {
            NetworkError::malformed(
                record.line,
                "two node labels",
                found,
                record.span,
                source,
                filename,
            )
        })?;
        let from = network.add_node(a.text);
        let to = network.add_node(b.text);
        if from == to {
            warn!(file = filename, line = record.line, node = a.text, "skipping self-loop");
        } else if !network.add_edge(from, to) {
            warn!(
                file = filename,
                line = record.line,
                "skipping repeated edge {} - {}",
                a.text,
                b.text
            );
        }
    }
    Ok(network)
}
