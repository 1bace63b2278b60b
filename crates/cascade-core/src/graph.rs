use crate::{DenseGraph, NodeId};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

/// Simple undirected graph over contiguous zero-based node ids.
///
/// Adjacency lists are kept sorted ascending so every traversal visits
/// neighbors in the same order regardless of backend.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Graph {
    n: usize,
    adjacency: Vec<Vec<NodeId>>,
    num_edges: usize,
}

impl Graph {
    /// Build from an undirected edge list. Self-loops and duplicate edges
    /// are ignored; node ids must be below `n`.
    pub fn from_edges(n: usize, edges: &[(NodeId, NodeId)]) -> Self {
        let mut adjacency = vec![Vec::new(); n];
        let mut num_edges = 0;

        for &(u, v) in edges {
            if u == v || u >= n || v >= n {
                continue;
            }
            if adjacency[u].contains(&v) {
                continue;
            }
            adjacency[u].push(v);
            adjacency[v].push(u);
            num_edges += 1;
        }

        for list in adjacency.iter_mut() {
            list.sort_unstable();
        }

        Self { n, adjacency, num_edges }
    }

    pub fn num_nodes(&self) -> usize {
        self.n
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn neighbors(&self, u: NodeId) -> &[NodeId] {
        &self.adjacency[u]
    }

    pub fn degree(&self, u: NodeId) -> usize {
        self.adjacency[u].len()
    }

    pub fn max_degree(&self) -> usize {
        self.adjacency.iter().map(|a| a.len()).max().unwrap_or(0)
    }

    /// Lowest-id node of maximum degree.
    pub fn highest_degree_node(&self) -> Option<NodeId> {
        (0..self.n).max_by_key(|&u| (self.degree(u), std::cmp::Reverse(u)))
    }

    /// Fraction of possible edges present.
    pub fn density(&self) -> f64 {
        if self.n < 2 {
            return 0.0;
        }
        let possible = self.n * (self.n - 1) / 2;
        self.num_edges as f64 / possible as f64
    }

    pub fn to_dense(&self) -> DenseGraph {
        DenseGraph::from_graph(self)
    }

    /// Complete graph on `n` nodes.
    pub fn complete(n: usize) -> Self {
        let mut edges = Vec::with_capacity(n * (n - 1) / 2);
        for u in 0..n {
            for v in (u + 1)..n {
                edges.push((u, v));
            }
        }
        Self::from_edges(n, &edges)
    }

    /// Path graph 0 - 1 - ... - (n-1).
    pub fn path(n: usize) -> Self {
        let edges: Vec<_> = (1..n).map(|v| (v - 1, v)).collect();
        Self::from_edges(n, &edges)
    }

    /// A clique of `core` nodes with `arms` pendant chains of `arm_len`
    /// nodes attached to consecutive core nodes. With (5, 4, 2)-ish
    /// parameters this is the star-of-stars shape used in scenario tests.
    pub fn star_of_stars(core: usize, arms: usize, arm_len: usize) -> Self {
        let mut edges = Vec::new();
        for u in 0..core {
            for v in (u + 1)..core {
                edges.push((u, v));
            }
        }
        let mut next = core;
        for a in 0..arms {
            let mut attach = a % core.max(1);
            for _ in 0..arm_len {
                edges.push((attach, next));
                attach = next;
                next += 1;
            }
        }
        Self::from_edges(core + arms * arm_len, &edges)
    }

    /// Erdős–Rényi G(n, q) with a fixed seed.
    pub fn gnp(n: usize, q: f64, seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut edges = Vec::new();
        for u in 0..n {
            for v in (u + 1)..n {
                if rng.gen::<f64>() < q {
                    edges.push((u, v));
                }
            }
        }
        Self::from_edges(n, &edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges_dedup() {
        let g = Graph::from_edges(3, &[(0, 1), (1, 0), (1, 1), (1, 2)]);
        assert_eq!(g.num_edges(), 2);
        assert_eq!(g.neighbors(1), &[0, 2]);
        assert_eq!(g.degree(1), 2);
    }

    #[test]
    fn test_complete() {
        let g = Graph::complete(5);
        assert_eq!(g.num_edges(), 10);
        for u in 0..5 {
            assert_eq!(g.degree(u), 4);
        }
        assert!((g.density() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_star_of_stars_shape() {
        // 5-clique core, four 2-node pendant arms: 13 nodes total
        let g = Graph::star_of_stars(5, 4, 2);
        assert_eq!(g.num_nodes(), 13);
        // core nodes 0..4 with an arm attached have degree 5
        assert_eq!(g.degree(0), 5);
        // arm tips have degree 1
        assert_eq!(g.degree(6), 1);
    }

    #[test]
    fn test_highest_degree_ties_to_lowest_id() {
        let g = Graph::path(4); // nodes 1 and 2 both have degree 2
        assert_eq!(g.highest_degree_node(), Some(1));
    }

    #[test]
    fn test_gnp_reproducible() {
        let a = Graph::gnp(30, 0.2, 7);
        let b = Graph::gnp(30, 0.2, 7);
        assert_eq!(a.num_edges(), b.num_edges());
        for u in 0..30 {
            assert_eq!(a.neighbors(u), b.neighbors(u));
        }
    }
}
