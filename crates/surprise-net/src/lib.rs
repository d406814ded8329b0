pub mod errors;
pub mod network;
pub mod params;
pub mod partition;
mod records;

pub use errors::NetworkError;
pub use network::{parse_network, Network};
pub use params::{derive_parameters, load_parameters, pair_count, read_source};
pub use partition::{parse_partition, Partition};
