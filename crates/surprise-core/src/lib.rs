pub mod exact;
pub mod hypergeometric;
pub mod log_space;
pub mod surprise;

pub use hypergeometric::{log_binomial, log_pmf, HypergeometricError, HypergeometricParams};
pub use log_space::{has_converged, is_certain, LogProbability, DEFAULT_TOLERANCE};
pub use surprise::{
    compute_surprise, compute_surprise_with, surprise_trace, StopReason, SummationStep,
    SurpriseConfig, SurpriseError, SurpriseParams, SurpriseReport, TermStrategy,
};
