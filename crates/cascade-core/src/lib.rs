pub mod cascade;
pub mod dense;
pub mod estimate;
pub mod graph;
pub mod rng;

// Core types
pub type F = f64;
pub type NodeId = usize;
/// Activation probability in [0, 1].
pub type Prob = f64;

pub use cascade::run_cascade;
pub use dense::DenseGraph;
pub use estimate::{Backend, Estimator};
pub use graph::Graph;
pub use rng::TrialRng;
