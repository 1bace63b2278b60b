//! Bounds on how far the layered log-space propagator drifts from the
//! sampling estimator. On trees the propagator is exact; on graphs with
//! cycles its layer-independence assumption loses precision, so the
//! bounds there are loose by intent.

use cascade_core::{Estimator, Graph};
use cascade_select::{History, LayeredPropagator};

const TRIALS: usize = 20_000;

#[test]
fn exact_on_a_path() {
    let g = Graph::path(6);
    let mut prop = LayeredPropagator::new(6, 0.5, History::Cumulative);
    prop.propagate(&g, 0);
    let analytic = prop.activation_probabilities();

    for (u, expected) in [(0, 1.0), (1, 0.5), (2, 0.25), (3, 0.125)] {
        assert!(
            (analytic[u] - expected).abs() < 1e-12,
            "node {u}: {} vs {expected}",
            analytic[u]
        );
    }

    let sampled = Estimator::new(TRIALS, 11).estimate(&g, 0.5, &[0]);
    for u in 0..6 {
        // 4 standard errors at 20k trials
        assert!(
            (analytic[u] - sampled[u]).abs() < 0.02,
            "node {u}: analytic {} vs sampled {}",
            analytic[u],
            sampled[u]
        );
    }
}

#[test]
fn bounded_divergence_with_cycles() {
    let g = Graph::star_of_stars(5, 4, 2);
    let mut prop = LayeredPropagator::new(g.num_nodes(), 0.5, History::Cumulative);
    prop.propagate(&g, 0);
    let analytic = prop.activation_probabilities();

    let sampled = Estimator::new(TRIALS, 23).estimate(&g, 0.5, &[0]);
    for u in 0..g.num_nodes() {
        let gap = (analytic[u] - sampled[u]).abs();
        assert!(
            gap < 0.15,
            "node {u}: analytic {} vs sampled {} (gap {gap})",
            analytic[u],
            sampled[u]
        );
    }
}

#[test]
fn cumulative_history_raises_coverage() {
    // a second propagation pass can only increase every node's combined
    // activation probability
    let g = Graph::gnp(20, 0.2, 5);
    let mut prop = LayeredPropagator::new(20, 0.4, History::Cumulative);
    prop.propagate(&g, 0);
    let after_one = prop.activation_probabilities();
    prop.propagate(&g, 13);
    let after_two = prop.activation_probabilities();

    for u in 0..20 {
        assert!(
            after_two[u] >= after_one[u] - 1e-12,
            "node {u} lost coverage: {} -> {}",
            after_one[u],
            after_two[u]
        );
    }
    assert_eq!(after_two[13], 1.0);
}
