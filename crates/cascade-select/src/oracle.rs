//! Selection policies that query the Monte Carlo estimator.

use crate::selector::SeedSelector;
use cascade_core::{NodeId, Prob};
use rand::Rng;
use rayon::prelude::*;

/// k distinct nodes uniformly without replacement. No oracle calls.
pub(crate) fn select_random(sel: &mut SeedSelector<'_>) {
    let candidates = sel.candidates();
    let picks = rand::seq::index::sample(&mut sel.rng, candidates.len(), sel.k_remaining);
    for i in picks {
        sel.seeds.push(candidates[i]);
    }
}

/// Ground-truth baseline: every step estimates every remaining candidate
/// and keeps the one maximizing the bottleneck probability. The candidate
/// fan-out runs in parallel with serial inner estimates; each candidate
/// gets its own pre-drawn base seed so the fan-out stays deterministic.
pub(crate) fn select_greedy(sel: &mut SeedSelector<'_>) {
    for step in 0..sel.k_remaining {
        let candidates = sel.candidates();
        let base_seeds: Vec<u64> = candidates.iter().map(|_| sel.rng.gen()).collect();
        let graph = sel.graph;
        let p = sel.p;
        let trials = sel.trials;
        let seeds = sel.seeds.clone();

        let minima: Vec<Prob> = candidates
            .par_iter()
            .zip(base_seeds.par_iter())
            .map(|(&c, &base_seed)| {
                let mut extended = seeds.clone();
                extended.push(c);
                let est = cascade_core::Estimator::new(trials, base_seed);
                let probs = est.estimate_serial(graph, p, &extended);
                probs.iter().copied().fold(f64::INFINITY, f64::min)
            })
            .collect();
        sel.count_oracle_calls(candidates.len());

        // first argmax, as stable as the candidate ordering
        let mut best = 0;
        for (i, &m) in minima.iter().enumerate() {
            if m > minima[best] {
                best = i;
            }
        }

        tracing::debug!(step, of = sel.k_remaining, choice = candidates[best], "greedy step");
        sel.seeds.push(candidates[best]);
    }
}

/// One estimate per step; appends the node with the minimum activation
/// probability, breaking exact ties uniformly at random. The randomized
/// tie-break is part of the contract and reproduces under a fixed seed.
pub(crate) fn select_myopic(sel: &mut SeedSelector<'_>) {
    for _ in 0..sel.k_remaining {
        let seeds = sel.seeds.clone();
        let probs = sel.oracle_estimate(&seeds);

        let candidates = sel.candidates();
        let min_val = candidates
            .iter()
            .map(|&u| probs[u])
            .fold(f64::INFINITY, f64::min);
        let tied: Vec<NodeId> = candidates
            .into_iter()
            .filter(|&u| probs[u] == min_val)
            .collect();

        let choice = tied[sel.rng.gen_range(0..tied.len())];
        sel.seeds.push(choice);
    }
}

/// One estimate on the initial seed set only; appends the k lowest-
/// probability nodes from that snapshot.
pub(crate) fn select_naive_myopic(sel: &mut SeedSelector<'_>) {
    let seeds = sel.seeds.clone();
    let probs = sel.oracle_estimate(&seeds);

    let mut candidates = sel.candidates();
    candidates.sort_by(|&a, &b| {
        probs[a]
            .partial_cmp(&probs[b])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });
    candidates.truncate(sel.k_remaining);
    sel.seeds.extend(candidates);
}
