use crate::{heuristics, oracle, SelectError};
use cascade_core::{Backend, Estimator, Graph, NodeId, Prob};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::time::{Duration, Instant};

/// Closed set of selection policies, dispatched with a single match at the
/// selector boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Policy {
    /// k distinct nodes uniformly at random; no oracle calls.
    Random,
    /// Ground-truth baseline: one estimate per remaining candidate per
    /// step, argmax of the resulting bottleneck probability. O(k*n)
    /// estimator calls.
    Greedy,
    /// One estimate per step; appends the globally least-covered node,
    /// ties broken uniformly at random.
    Myopic,
    /// One estimate total; appends the k least-covered nodes from that
    /// single snapshot.
    NaiveMyopic,
    /// Farthest-point traversal over precomputed shortest-path lengths.
    Gonzalez,
    /// Minimum-closeness non-seed; optionally upgraded to its
    /// highest-degree unseeded neighbor.
    FurthestNonSeed { choose_neighbor: bool },
    /// Degree bins from 1 upward, ranked by ascending harmonic centrality
    /// within each bin.
    DegreeLowestCentrality { choose_neighbor: bool },
    /// Degree bins ranked by the degree of each candidate's best unseeded
    /// neighbor, descending.
    DegreeHighestDegreeNeighbor { choose_neighbor: bool },
    /// Layered log-space propagation with cumulative per-seed history.
    BfsMyopic,
    /// Layered log-space propagation scoring from a single pass.
    NaiveBfsMyopic,
    /// Personalized PageRank restarted on the seeds; iterative picks.
    PprMyopic,
    /// Personalized PageRank; one batch of the k lowest ranks.
    NaivePprMyopic,
}

impl Policy {
    /// Whether the policy establishes its own first seed (the
    /// highest-degree node) when none is supplied.
    pub fn self_initializes(&self) -> bool {
        !matches!(
            self,
            Policy::Random
                | Policy::Greedy
                | Policy::DegreeLowestCentrality { .. }
                | Policy::DegreeHighestDegreeNeighbor { .. }
        )
    }

    /// Whether selection is rooted at the newest seed and therefore needs
    /// a non-empty seed set to start from.
    fn requires_root(&self) -> bool {
        matches!(
            self,
            Policy::BfsMyopic | Policy::NaiveBfsMyopic | Policy::PprMyopic | Policy::NaivePprMyopic
        )
    }
}

#[derive(Clone, Debug)]
pub struct SelectorConfig {
    /// Edge transmission probability, shared by every traversal.
    pub p: Prob,
    /// Seeds the policy must add (self-initialization consumes one).
    pub k: usize,
    /// Externally supplied seed sequence; skips policy initialization.
    pub seeds: Option<Vec<NodeId>>,
    pub trials: usize,
    pub threads: Option<usize>,
    pub backend: Backend,
    /// Master seed driving trial sampling and tie-breaking.
    pub seed: u64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            p: 0.5,
            k: 100,
            seeds: None,
            trials: 1000,
            threads: None,
            backend: Backend::Auto,
            seed: 42,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Selecting,
    Done,
}

/// Seed-growing state machine. Owns the seed sequence exclusively; seeds
/// are only ever appended, never removed, and the sequence freezes once
/// the selector reaches `Done`.
#[derive(Debug)]
pub struct SeedSelector<'g> {
    pub(crate) graph: &'g Graph,
    pub(crate) policy: Policy,
    pub(crate) p: Prob,
    pub(crate) k_remaining: usize,
    pub(crate) seeds: Vec<NodeId>,
    pub(crate) trials: usize,
    pub(crate) threads: Option<usize>,
    pub(crate) backend: Backend,
    pub(crate) rng: ChaCha20Rng,
    phase: Phase,
    evaluations: Vec<Prob>,
    oracle_calls: usize,
    precompute_time: Duration,
}

impl<'g> SeedSelector<'g> {
    pub fn new(graph: &'g Graph, policy: Policy, config: SelectorConfig) -> Result<Self, SelectError> {
        let n = graph.num_nodes();
        if n == 0 {
            return Err(SelectError::EmptyGraph);
        }
        if !(0.0..=1.0).contains(&config.p) || config.p.is_nan() {
            return Err(SelectError::InvalidSpread { p: config.p });
        }

        let externally_seeded = config.seeds.is_some();
        let supplied = config.seeds.unwrap_or_default();
        let mut seen = vec![false; n];
        for &s in &supplied {
            if s >= n {
                return Err(SelectError::SeedOutOfRange { seed: s, nodes: n });
            }
            if seen[s] {
                return Err(SelectError::DuplicateSeed { seed: s });
            }
            seen[s] = true;
        }

        let available = n - supplied.len();
        if config.k > available {
            return Err(SelectError::SeedBudgetExceeded {
                k: config.k,
                available,
            });
        }
        let will_have_root = if externally_seeded {
            !supplied.is_empty()
        } else {
            policy.self_initializes() && config.k > 0
        };
        if policy.requires_root() && !will_have_root {
            return Err(SelectError::EmptySeedSet);
        }

        Ok(Self {
            graph,
            policy,
            p: config.p,
            k_remaining: config.k,
            seeds: supplied,
            trials: config.trials,
            threads: config.threads,
            backend: config.backend,
            rng: ChaCha20Rng::seed_from_u64(config.seed),
            phase: if externally_seeded {
                Phase::Selecting
            } else {
                Phase::Initializing
            },
            evaluations: Vec::new(),
            oracle_calls: 0,
            precompute_time: Duration::ZERO,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn seeds(&self) -> &[NodeId] {
        &self.seeds
    }

    /// Estimator invocations made during selection (not evaluation).
    pub fn oracle_calls(&self) -> usize {
        self.oracle_calls
    }

    /// Wall time spent building structural tables, amortized once per run
    /// and reported separately from per-step selection time.
    pub fn precompute_time(&self) -> Duration {
        self.precompute_time
    }

    /// Force-set the seed sequence (evaluation/figure hook). The selector
    /// moves straight to `Done`.
    pub fn override_seeds(&mut self, seeds: Vec<NodeId>) {
        self.seeds = seeds;
        self.k_remaining = 0;
        self.phase = Phase::Done;
        self.evaluations.clear();
    }

    /// Grow the seed set to its target size. Idempotent once `Done`.
    pub fn predict(&mut self) -> &[NodeId] {
        if self.phase == Phase::Done {
            return &self.seeds;
        }

        if self.phase == Phase::Initializing {
            if self.policy.self_initializes() && self.k_remaining > 0 {
                if let Some(root) = self.graph.highest_degree_node() {
                    self.seeds.push(root);
                    self.k_remaining -= 1;
                }
            }
            self.phase = Phase::Selecting;
        }

        if self.k_remaining > 0 {
            match self.policy {
                Policy::Random => oracle::select_random(self),
                Policy::Greedy => oracle::select_greedy(self),
                Policy::Myopic => oracle::select_myopic(self),
                Policy::NaiveMyopic => oracle::select_naive_myopic(self),
                Policy::Gonzalez => heuristics::select_gonzalez(self),
                Policy::FurthestNonSeed { choose_neighbor } => {
                    heuristics::select_furthest_non_seed(self, choose_neighbor)
                }
                Policy::DegreeLowestCentrality { choose_neighbor } => {
                    heuristics::select_degree_lowest_centrality(self, choose_neighbor)
                }
                Policy::DegreeHighestDegreeNeighbor { choose_neighbor } => {
                    heuristics::select_degree_highest_degree_neighbor(self, choose_neighbor)
                }
                Policy::BfsMyopic => heuristics::select_bfs_myopic(self),
                Policy::NaiveBfsMyopic => heuristics::select_naive_bfs_myopic(self),
                Policy::PprMyopic => heuristics::select_ppr_myopic(self),
                Policy::NaivePprMyopic => heuristics::select_naive_ppr_myopic(self),
            }
            self.k_remaining = 0;
        }

        self.phase = Phase::Done;
        &self.seeds
    }

    /// Run the estimator once per growing prefix of the final sequence and
    /// record the bottleneck (minimum) probability for each prefix length.
    pub fn evaluate(&mut self) -> Vec<Prob> {
        self.predict();

        if self.evaluations.is_empty() {
            for len in 1..=self.seeds.len() {
                let prefix = self.seeds[..len].to_vec();
                let probs = self.estimator().estimate(self.graph, self.p, &prefix);
                let bottleneck = probs.iter().copied().fold(f64::INFINITY, f64::min);
                self.evaluations.push(bottleneck);
            }
        }

        self.evaluations.clone()
    }

    /// The estimator for one oracle invocation. Each call draws a fresh
    /// base seed from the control-thread stream, so whole runs reproduce
    /// under a fixed config seed.
    pub(crate) fn estimator(&mut self) -> Estimator {
        Estimator::new(self.trials, self.rng.gen())
            .with_threads(self.threads)
            .with_backend(self.backend)
    }

    /// One oracle call: estimate the activation vector for `seeds`.
    pub(crate) fn oracle_estimate(&mut self, seeds: &[NodeId]) -> Vec<Prob> {
        self.oracle_calls += 1;
        let est = self.estimator();
        est.estimate(self.graph, self.p, seeds)
    }

    pub(crate) fn count_oracle_calls(&mut self, calls: usize) {
        self.oracle_calls += calls;
    }

    /// Nodes not yet seeded, in id order.
    pub(crate) fn candidates(&self) -> Vec<NodeId> {
        (0..self.graph.num_nodes())
            .filter(|u| !self.seeds.contains(u))
            .collect()
    }

    /// Time a structural precompute and fold it into the amortized
    /// precompute counter.
    pub(crate) fn timed_precompute<T>(&mut self, f: impl FnOnce(&Graph) -> T) -> T {
        let start = Instant::now();
        let value = f(self.graph);
        let elapsed = start.elapsed();
        self.precompute_time += elapsed;
        tracing::debug!(policy = ?self.policy, ?elapsed, "structural precompute");
        value
    }
}
