//! Structural statistics computed once per selector run: shortest-path
//! tables, centrality scores, degree, personalized PageRank.

use cascade_core::{F, Graph, NodeId};
use std::collections::VecDeque;

/// BFS hop distances from `source`; `None` for unreachable nodes.
pub fn bfs_distances(graph: &Graph, source: NodeId) -> Vec<Option<u32>> {
    let n = graph.num_nodes();
    let mut dist = vec![None; n];
    dist[source] = Some(0);

    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        let d = dist[v].unwrap_or(0);
        for &w in graph.neighbors(v) {
            if dist[w].is_none() {
                dist[w] = Some(d + 1);
                queue.push_back(w);
            }
        }
    }

    dist
}

/// All-pairs shortest-path lengths, one BFS per source. O(V * (V + E)).
pub fn shortest_path_lengths(graph: &Graph) -> Vec<Vec<Option<u32>>> {
    (0..graph.num_nodes())
        .map(|s| bfs_distances(graph, s))
        .collect()
}

/// Closeness centrality: reachable count over total distance, 0 for
/// isolated nodes.
pub fn closeness_centrality(graph: &Graph) -> Vec<F> {
    let n = graph.num_nodes();
    let mut scores = vec![0.0; n];

    for s in 0..n {
        let dist = bfs_distances(graph, s);
        let mut total = 0u64;
        let mut reachable = 0u64;
        for d in dist.into_iter().flatten() {
            if d > 0 {
                total += d as u64;
                reachable += 1;
            }
        }
        if reachable > 0 && total > 0 {
            scores[s] = reachable as F / total as F;
        }
    }

    scores
}

/// Harmonic centrality: sum of inverse distances to all other nodes.
pub fn harmonic_centrality(graph: &Graph) -> Vec<F> {
    let n = graph.num_nodes();
    let mut scores = vec![0.0; n];

    for s in 0..n {
        let dist = bfs_distances(graph, s);
        scores[s] = dist
            .into_iter()
            .flatten()
            .filter(|&d| d > 0)
            .map(|d| 1.0 / d as F)
            .sum();
    }

    scores
}

#[derive(Clone, Debug)]
pub struct PageRankConfig {
    pub damping: F,
    pub max_iterations: usize,
    pub tolerance: F,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        // Matches the selection policies' restart-heavy walk: low damping,
        // machine-precision tolerance.
        Self {
            damping: 0.3,
            max_iterations: 1000,
            tolerance: 1e-16,
        }
    }
}

/// Personalized PageRank via power iteration.
///
/// The restart distribution is uniform over `restart`; dangling-node mass
/// restarts there too. Convergence is measured by the L1 norm of the
/// score delta falling below `n * tolerance`.
pub fn personalized_pagerank(graph: &Graph, restart: &[NodeId], config: &PageRankConfig) -> Vec<F> {
    let n = graph.num_nodes();
    if n == 0 || restart.is_empty() {
        return vec![0.0; n];
    }

    let mut pvec = vec![0.0; n];
    for &r in restart {
        pvec[r] += 1.0 / restart.len() as F;
    }

    let d = config.damping;
    let mut scores = pvec.clone();
    let mut next = vec![0.0_f64; n];

    for _ in 0..config.max_iterations {
        for s in next.iter_mut() {
            *s = 0.0;
        }

        let mut dangling_mass = 0.0;
        for u in 0..n {
            let deg = graph.degree(u);
            if deg == 0 {
                dangling_mass += scores[u];
            } else {
                let share = scores[u] / deg as F;
                for &v in graph.neighbors(u) {
                    next[v] += share;
                }
            }
        }

        for v in 0..n {
            next[v] = d * (next[v] + dangling_mass * pvec[v]) + (1.0 - d) * pvec[v];
        }

        let diff: F = scores
            .iter()
            .zip(next.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();

        std::mem::swap(&mut scores, &mut next);

        if diff < n as F * config.tolerance {
            break;
        }
    }

    scores
}
