use crate::cascade::run_cascade;
use crate::dense::run_cascade_dense;
use crate::{Graph, NodeId, Prob, TrialRng};
use rayon::prelude::*;

/// Which trial loop executes the cascade.
///
/// `Auto` picks the dense matrix scan for small, dense graphs and the
/// adjacency-list walk otherwise. Backends are statistically and
/// numerically equivalent: same Bernoulli draw per examined edge, same
/// visit order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Sparse,
    Dense,
    Auto,
}

/// Monte Carlo activation-probability estimator.
///
/// Runs `trials` independent cascade trials and averages the activation
/// vectors. Each trial derives its own random stream from
/// `(base_seed, trial_id)`, so the estimate is identical for any thread
/// count and any completion order.
#[derive(Clone, Debug)]
pub struct Estimator {
    pub trials: usize,
    pub base_seed: u64,
    /// Worker threads for the trial fan-out; `None` uses the global pool.
    pub threads: Option<usize>,
    pub backend: Backend,
}

impl Default for Estimator {
    fn default() -> Self {
        Self {
            trials: 1000,
            base_seed: 42,
            threads: None,
            backend: Backend::Auto,
        }
    }
}

impl Estimator {
    pub fn new(trials: usize, base_seed: u64) -> Self {
        Self {
            trials,
            base_seed,
            ..Self::default()
        }
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Per-node activation probability for `seeds` under spread `p`.
    pub fn estimate(&self, graph: &Graph, p: Prob, seeds: &[NodeId]) -> Vec<Prob> {
        let n = graph.num_nodes();
        let use_dense = match self.backend {
            Backend::Sparse => false,
            Backend::Dense => true,
            Backend::Auto => n <= 4096 && graph.density() >= 0.05,
        };
        let dense = use_dense.then(|| graph.to_dense());

        let run_trial = |trial: usize| -> Vec<bool> {
            let mut rng = TrialRng::from_trial_id(self.base_seed, trial as u64);
            match &dense {
                Some(d) => run_cascade_dense(d, p, seeds, &mut rng),
                None => run_cascade(graph, p, seeds, &mut rng),
            }
        };

        let fan_out = || {
            (0..self.trials)
                .into_par_iter()
                .map(run_trial)
                .fold(
                    || vec![0u64; n],
                    |mut counts, activated| {
                        for (c, a) in counts.iter_mut().zip(activated) {
                            *c += a as u64;
                        }
                        counts
                    },
                )
                .reduce(
                    || vec![0u64; n],
                    |mut a, b| {
                        for (x, y) in a.iter_mut().zip(b) {
                            *x += y;
                        }
                        a
                    },
                )
        };

        let counts = match self.threads {
            Some(t) => match rayon::ThreadPoolBuilder::new().num_threads(t).build() {
                Ok(pool) => pool.install(fan_out),
                Err(e) => {
                    tracing::warn!("thread pool of size {t} unavailable ({e}), using global pool");
                    fan_out()
                }
            },
            None => fan_out(),
        };

        counts
            .into_iter()
            .map(|c| c as Prob / self.trials as Prob)
            .collect()
    }

    /// Sequential trial loop. Used when the caller is already inside a
    /// parallel fan-out (one estimate per candidate seed) and must not
    /// nest pools. Produces the same result as [`Self::estimate`].
    pub fn estimate_serial(&self, graph: &Graph, p: Prob, seeds: &[NodeId]) -> Vec<Prob> {
        let n = graph.num_nodes();
        let mut counts = vec![0u64; n];
        for trial in 0..self.trials {
            let mut rng = TrialRng::from_trial_id(self.base_seed, trial as u64);
            let activated = run_cascade(graph, p, seeds, &mut rng);
            for (c, a) in counts.iter_mut().zip(activated) {
                *c += a as u64;
            }
        }
        counts
            .into_iter()
            .map(|c| c as Prob / self.trials as Prob)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_matches_serial() {
        let g = Graph::gnp(30, 0.2, 3);
        let est = Estimator::new(200, 7).with_backend(Backend::Sparse);
        let par = est.estimate(&g, 0.4, &[0, 5]);
        let ser = est.estimate_serial(&g, 0.4, &[0, 5]);
        assert_eq!(par, ser);
    }

    #[test]
    fn test_probabilities_in_range() {
        let g = Graph::gnp(25, 0.3, 9);
        let est = Estimator::new(100, 1);
        for prob in est.estimate(&g, 0.5, &[1]) {
            assert!((0.0..=1.0).contains(&prob));
        }
    }

    #[test]
    fn test_seeds_always_active() {
        let g = Graph::path(10);
        let est = Estimator::new(50, 5);
        let probs = est.estimate(&g, 0.2, &[3, 8]);
        assert_eq!(probs[3], 1.0);
        assert_eq!(probs[8], 1.0);
    }
}
