use crate::{Graph, NodeId, Prob, TrialRng};
use std::collections::VecDeque;

/// One stochastic Independent Cascade trial.
///
/// Worklist BFS from the seed set: each pop examines the node's inactive
/// neighbors and activates each independently with probability `p`, one
/// Bernoulli draw per examined edge. A node is activated at most once.
/// Returns the per-node activation state at termination.
pub fn run_cascade(graph: &Graph, p: Prob, seeds: &[NodeId], rng: &mut TrialRng) -> Vec<bool> {
    let n = graph.num_nodes();
    let mut activated = vec![false; n];
    let mut queue = VecDeque::new();

    for &s in seeds {
        if !activated[s] {
            activated[s] = true;
            queue.push_back(s);
        }
    }

    while let Some(node) = queue.pop_front() {
        for &nei in graph.neighbors(node) {
            if !activated[nei] && rng.transmit(p) {
                activated[nei] = true;
                queue.push_back(nei);
            }
        }
    }

    activated
}
