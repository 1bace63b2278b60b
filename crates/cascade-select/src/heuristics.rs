//! Selection policies driven by structural statistics or the analytic
//! propagator instead of the Monte Carlo oracle.

use crate::analytic::{History, LayeredPropagator};
use crate::selector::SeedSelector;
use crate::structural;
use cascade_core::{F, Graph, NodeId};

/// Highest-degree neighbor of `node` not yet seeded; ties go to the
/// lowest id. `None` when the whole neighborhood is seeded.
fn best_unseeded_neighbor(graph: &Graph, seeds: &[NodeId], node: NodeId) -> Option<NodeId> {
    graph
        .neighbors(node)
        .iter()
        .copied()
        .filter(|u| !seeds.contains(u))
        .max_by_key(|&u| (graph.degree(u), std::cmp::Reverse(u)))
}

/// Farthest-point traversal: each step appends the candidate with the
/// largest mean shortest-path distance to the current seeds.
pub(crate) fn select_gonzalez(sel: &mut SeedSelector<'_>) {
    let apsp = sel.timed_precompute(structural::shortest_path_lengths);

    for _ in 0..sel.k_remaining {
        let candidates = sel.candidates();
        let mut best = candidates[0];
        let mut best_dist = F::NEG_INFINITY;

        for &c in &candidates {
            let mut total = 0u64;
            let mut counted = 0u64;
            for &s in &sel.seeds {
                if let Some(d) = apsp[c][s] {
                    total += d as u64;
                    counted += 1;
                }
            }
            let mean = if counted > 0 {
                total as F / counted as F
            } else {
                0.0
            };
            if mean > best_dist {
                best_dist = mean;
                best = c;
            }
        }

        sel.seeds.push(best);
    }
}

/// Appends the minimum-closeness non-seed node each step; with
/// `choose_neighbor`, the pick is upgraded to its highest-degree unseeded
/// neighbor when one exists (otherwise the original pick stands).
pub(crate) fn select_furthest_non_seed(sel: &mut SeedSelector<'_>, choose_neighbor: bool) {
    let closeness = sel.timed_precompute(structural::closeness_centrality);

    for _ in 0..sel.k_remaining {
        let candidates = sel.candidates();
        let mut choice = candidates[0];
        for &c in &candidates {
            if closeness[c] < closeness[choice] {
                choice = c;
            }
        }

        if choose_neighbor {
            if let Some(upgrade) = best_unseeded_neighbor(sel.graph, &sel.seeds, choice) {
                choice = upgrade;
            }
        }

        sel.seeds.push(choice);
    }
}

/// Iterates degree bins from 1 upward; within a bin candidates are ranked
/// by ascending harmonic centrality, admitted until k seeds are collected.
pub(crate) fn select_degree_lowest_centrality(sel: &mut SeedSelector<'_>, choose_neighbor: bool) {
    let centrality = sel.timed_precompute(structural::harmonic_centrality);
    let max_degree = sel.graph.max_degree();
    let mut remaining = sel.k_remaining;

    for degree in 1..=max_degree {
        if remaining == 0 {
            break;
        }

        let mut bin: Vec<NodeId> = (0..sel.graph.num_nodes())
            .filter(|&u| sel.graph.degree(u) == degree && !sel.seeds.contains(&u))
            .collect();
        bin.sort_by(|&a, &b| {
            centrality[a]
                .partial_cmp(&centrality[b])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });

        for node in bin {
            if remaining == 0 {
                break;
            }
            let choice = if choose_neighbor {
                best_unseeded_neighbor(sel.graph, &sel.seeds, node).unwrap_or(node)
            } else {
                node
            };
            if sel.seeds.contains(&choice) {
                continue;
            }
            sel.seeds.push(choice);
            remaining -= 1;
        }
    }
}

/// Degree bins ranked by the degree of each candidate's best unseeded
/// neighbor, descending. The `choose_neighbor` form admits the neighbor
/// itself, de-duplicated against earlier admissions.
pub(crate) fn select_degree_highest_degree_neighbor(
    sel: &mut SeedSelector<'_>,
    choose_neighbor: bool,
) {
    let max_degree = sel.graph.max_degree();
    let mut remaining = sel.k_remaining;

    for degree in 1..=max_degree {
        if remaining == 0 {
            break;
        }

        let bin: Vec<NodeId> = (0..sel.graph.num_nodes())
            .filter(|&u| sel.graph.degree(u) == degree && !sel.seeds.contains(&u))
            .collect();

        // (candidate, best neighbor or itself, that node's degree)
        let mut ranked: Vec<(NodeId, NodeId, usize)> = bin
            .into_iter()
            .map(|node| match best_unseeded_neighbor(sel.graph, &sel.seeds, node) {
                Some(nei) => (node, nei, sel.graph.degree(nei)),
                None => (node, node, degree),
            })
            .collect();
        ranked.sort_by_key(|&(node, _, best_degree)| (std::cmp::Reverse(best_degree), node));

        for (node, neighbor, _) in ranked {
            if remaining == 0 {
                break;
            }
            let choice = if choose_neighbor { neighbor } else { node };
            if sel.seeds.contains(&choice) {
                continue;
            }
            sel.seeds.push(choice);
            remaining -= 1;
        }
    }
}

/// Layered log-space propagation with cumulative history: each step roots
/// a BFS pass at the newest seed and appends the node least likely to be
/// activated by any seed so far. Deterministic; never samples.
pub(crate) fn select_bfs_myopic(sel: &mut SeedSelector<'_>) {
    let mut prop = LayeredPropagator::new(sel.graph.num_nodes(), sel.p, History::Cumulative);

    for _ in 0..sel.k_remaining {
        let root = *sel.seeds.last().expect("root seed established");
        prop.propagate(sel.graph, root);
        if let Some(next) = prop.next_seed(&sel.seeds) {
            sel.seeds.push(next);
        }
    }
}

/// Single propagation pass from the newest seed; appends the k lowest-
/// probability nodes of that pass in one batch.
pub(crate) fn select_naive_bfs_myopic(sel: &mut SeedSelector<'_>) {
    let mut prop = LayeredPropagator::new(sel.graph.num_nodes(), sel.p, History::Snapshot);
    let root = *sel.seeds.last().expect("root seed established");
    prop.propagate(sel.graph, root);
    let picks = prop.lowest_k(&sel.seeds, sel.k_remaining);
    sel.seeds.extend(picks);
}

/// Personalized PageRank restarted uniformly on the current seeds; each
/// step appends the lowest-ranked non-seed node.
pub(crate) fn select_ppr_myopic(sel: &mut SeedSelector<'_>) {
    let config = structural::PageRankConfig::default();

    for _ in 0..sel.k_remaining {
        let ranks = structural::personalized_pagerank(sel.graph, &sel.seeds, &config);
        let candidates = sel.candidates();
        let mut choice = candidates[0];
        for &c in &candidates {
            if ranks[c] < ranks[choice] {
                choice = c;
            }
        }
        sel.seeds.push(choice);
    }
}

/// One PageRank solve; appends the k lowest-ranked non-seeds in a batch.
pub(crate) fn select_naive_ppr_myopic(sel: &mut SeedSelector<'_>) {
    let config = structural::PageRankConfig::default();
    let ranks = structural::personalized_pagerank(sel.graph, &sel.seeds, &config);

    let mut candidates = sel.candidates();
    candidates.sort_by(|&a, &b| {
        ranks[a]
            .partial_cmp(&ranks[b])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });
    candidates.truncate(sel.k_remaining);
    sel.seeds.extend(candidates);
}
