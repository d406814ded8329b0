//! CLI argument definitions: top-level `Cli` struct and `Commands` enum.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use surprise_core::DEFAULT_TOLERANCE;

pub(crate) const CLI_LONG_ABOUT: &str =
    "Score a partition of a network by Surprise, the negative log10 of the \
    cumulative hypergeometric probability of observing at least as many \
    intra-community links by chance.\n\n\
    Typical use:\n  \
    1. surprise params network.pairs partition.part\n  \
    2. surprise score network.pairs partition.part\n\n\
    Use `surprise compute` to evaluate the score directly from F, M, n and p.";

#[derive(Parser)]
#[command(name = "surprise")]
#[command(about = "Score a network partition by Surprise (cumulative hypergeometric tail)")]
#[command(long_about = CLI_LONG_ABOUT)]
#[command(version)]
pub(crate) struct Cli {
    /// Stop once a term is this many orders of magnitude below the running total
    #[arg(long, global = true, default_value_t = DEFAULT_TOLERANCE)]
    pub(crate) tolerance: f64,

    /// Term evaluation strategy: direct | incremental
    #[arg(long, global = true, default_value = "incremental")]
    pub(crate) strategy: String,

    /// Output format: text | json
    #[arg(long, global = true, default_value = "text")]
    pub(crate) format: String,

    /// Print every summation step
    #[arg(long, global = true, default_value_t = false)]
    pub(crate) trace: bool,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Compute the Surprise of a partition
    Score {
        /// Edge list: one `<node> <node>` pair per line
        network: PathBuf,
        /// Community assignment: one `<node> <community>` pair per line
        partition: PathBuf,
    },

    /// Print the derived F, M, n and p without scoring
    Params {
        /// Edge list: one `<node> <node>` pair per line
        network: PathBuf,
        /// Community assignment: one `<node> <community>` pair per line
        partition: PathBuf,
    },

    /// Evaluate the score directly from the four counts
    Compute {
        /// Node pairs in the network (F)
        #[arg(long = "total-pairs", short = 'F')]
        total_pairs: u64,
        /// Node pairs inside communities (M)
        #[arg(long = "intra-pairs", short = 'M')]
        intra_pairs: u64,
        /// Links in the network (n)
        #[arg(long, short = 'n')]
        links: u64,
        /// Links inside communities (p)
        #[arg(long = "intra-links", short = 'p')]
        intra_links: u64,
        /// Also evaluate the tail with exact rational arithmetic
        #[arg(long, default_value_t = false)]
        exact: bool,
    },
}
