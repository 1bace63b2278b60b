pub mod analytic;
pub mod selector;
pub mod structural;

mod heuristics;
mod oracle;

use cascade_core::{NodeId, Prob};
use thiserror::Error;

pub use analytic::{History, LayeredPropagator};
pub use selector::{Phase, Policy, SeedSelector, SelectorConfig};
pub use structural::PageRankConfig;

/// Construction-time precondition violations. All are fatal: the selector
/// is never built and nothing is retried.
#[derive(Debug, Error, PartialEq)]
pub enum SelectError {
    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("cannot add {k} seeds: only {available} unseeded nodes available")]
    SeedBudgetExceeded { k: usize, available: usize },

    #[error("seed {seed} is out of range for a graph of {nodes} nodes")]
    SeedOutOfRange { seed: NodeId, nodes: usize },

    #[error("seed {seed} supplied more than once")]
    DuplicateSeed { seed: NodeId },

    #[error("spread probability {p} is outside [0, 1]")]
    InvalidSpread { p: Prob },

    #[error("policy requires a non-empty initial seed set")]
    EmptySeedSet,
}
