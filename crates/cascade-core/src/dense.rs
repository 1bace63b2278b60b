use crate::{Graph, NodeId, Prob, TrialRng};
use std::collections::VecDeque;

/// Dense adjacency-matrix view of a graph, for the batched estimator
/// backend. Row scans visit neighbor ids ascending, matching the sorted
/// adjacency lists of [`Graph`], so both backends consume a trial's random
/// stream identically.
#[derive(Clone, Debug)]
pub struct DenseGraph {
    n: usize,
    adj: Vec<bool>, // row-major n * n
}

impl DenseGraph {
    pub fn from_graph(graph: &Graph) -> Self {
        let n = graph.num_nodes();
        let mut adj = vec![false; n * n];
        for u in 0..n {
            for &v in graph.neighbors(u) {
                adj[u * n + v] = true;
            }
        }
        Self { n, adj }
    }

    pub fn num_nodes(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn row(&self, u: NodeId) -> &[bool] {
        &self.adj[u * self.n..(u + 1) * self.n]
    }
}

/// Dense twin of [`crate::run_cascade`] with identical Bernoulli semantics:
/// one draw per (active node, inactive neighbor) examination.
pub fn run_cascade_dense(
    dense: &DenseGraph,
    p: Prob,
    seeds: &[NodeId],
    rng: &mut TrialRng,
) -> Vec<bool> {
    let n = dense.num_nodes();
    let mut activated = vec![false; n];
    let mut queue = VecDeque::new();

    for &s in seeds {
        if !activated[s] {
            activated[s] = true;
            queue.push_back(s);
        }
    }

    while let Some(node) = queue.pop_front() {
        let row = dense.row(node);
        for nei in 0..n {
            if row[nei] && !activated[nei] && rng.transmit(p) {
                activated[nei] = true;
                queue.push_back(nei);
            }
        }
    }

    activated
}
