//! Deterministic alternative to Monte Carlo estimation: a breadth-first
//! layering from the newest seed, propagating transmission probabilities
//! layer by layer in log space.
//!
//! The approximation treats influence arriving through different layers as
//! independent, which trades exactness for speed and determinism. Known to
//! lose precision on large or deep graphs; tests bound its divergence from
//! the sampling estimator instead of expecting agreement.

use cascade_core::{F, Graph, NodeId, Prob};

/// Log probabilities at or above this are treated as certain activation.
/// `log1p(-exp(x))` degenerates there: `exp` rounds to exactly 1 and the
/// combination underflows to a spurious -inf.
const NEAR_CERTAIN_LOG: F = -1e-15;

/// How activation evidence survives across seed-growth iterations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum History {
    /// Keep a per-node list of per-seed contributions and combine them
    /// into the true cumulative multi-seed activation probability.
    Cumulative,
    /// Score nodes from the current BFS pass alone, ignoring earlier
    /// seeds. Cheaper and admittedly approximate.
    Snapshot,
}

/// Per-node record in the propagation arena, indexed by node id.
/// Pass-local fields are cleared explicitly between seed-growth
/// iterations; `history` survives.
#[derive(Clone, Debug, Default)]
struct NodeRecord {
    from_parent: Vec<F>,
    from_neighbor: Vec<F>,
    to_neighbor: Option<F>,
    to_child: Option<F>,
    children: Vec<NodeId>,
    /// Per-seed activation log-probabilities (Cumulative mode).
    history: Vec<F>,
    /// Activation log-probability from the current pass (Snapshot mode).
    activation: Option<F>,
    final_log: Option<F>,
}

impl NodeRecord {
    fn reset_pass(&mut self) {
        self.from_parent.clear();
        self.from_neighbor.clear();
        self.to_neighbor = None;
        self.to_child = None;
        self.children.clear();
        self.activation = None;
        self.final_log = None;
    }
}

/// Log-probability that at least one of the events occurs, given their
/// individual log-probabilities.
fn at_least_one<I>(logs: I) -> F
where
    I: IntoIterator<Item = F>,
{
    // log of "none occurs" is the sum of log(1 - p_i)
    let none: F = logs.into_iter().map(|x| (-x.exp()).ln_1p()).sum();
    (-none.exp()).ln_1p()
}

pub struct LayeredPropagator {
    p: Prob,
    history: History,
    records: Vec<NodeRecord>,
}

impl LayeredPropagator {
    pub fn new(n: usize, p: Prob, history: History) -> Self {
        Self {
            p,
            history,
            records: vec![NodeRecord::default(); n],
        }
    }

    /// One BFS pass rooted at the newest seed. Updates every reached
    /// node's activation evidence; in Cumulative mode the pass appends to
    /// each node's history and finalizes the multi-seed combination.
    pub fn propagate(&mut self, graph: &Graph, root: NodeId) {
        let n = graph.num_nodes();
        debug_assert_eq!(n, self.records.len());

        for rec in self.records.iter_mut() {
            rec.reset_pass();
        }

        let log_p = self.p.ln();
        {
            let rec = &mut self.records[root];
            rec.from_parent.push(0.0); // log(1): the root is active
            rec.from_neighbor.push(F::NEG_INFINITY);
            rec.to_neighbor = Some(log_p);
            rec.to_child = Some(log_p);
            match self.history {
                History::Cumulative => rec.history = vec![0.0],
                History::Snapshot => rec.activation = Some(0.0),
            }
            rec.final_log = Some(0.0);
        }

        let mut in_last = vec![false; n];
        let mut in_cur = vec![false; n];
        let mut in_next = vec![false; n];

        let mut last: Vec<NodeId> = Vec::new();
        let mut cur = vec![root];
        in_cur[root] = true;
        let mut next: Vec<NodeId> = Vec::new();

        while !cur.is_empty() {
            // Same-layer transmission first: to_neighbor only depends on
            // the previous layer, so it is safe to hand to layer-mates.
            for &node in &cur {
                self.compute_to_neighbor(node);
                let t = self.records[node].to_neighbor.unwrap_or(F::NEG_INFINITY);

                for &nei in graph.neighbors(node) {
                    if in_last[nei] {
                        continue; // a parent, not a target
                    }
                    if in_cur[nei] {
                        self.records[nei].from_neighbor.push(t);
                    } else {
                        if !in_next[nei] {
                            in_next[nei] = true;
                            next.push(nei);
                        }
                        self.records[node].children.push(nei);
                    }
                }
            }

            // Neighbor contributions are complete; fold them in and hand
            // transmission down to the next layer.
            for &node in &cur {
                self.compute_to_child(node);
                let t = self.records[node].to_child.unwrap_or(F::NEG_INFINITY);
                let children = std::mem::take(&mut self.records[node].children);
                for &child in &children {
                    self.records[child].from_parent.push(t);
                }
                self.records[node].children = children;
            }

            for &u in &last {
                in_last[u] = false;
            }
            for &u in &cur {
                in_cur[u] = false;
                in_last[u] = true;
            }
            for &u in &next {
                in_next[u] = false;
                in_cur[u] = true;
            }
            last = std::mem::take(&mut cur);
            cur = std::mem::take(&mut next);
        }

        if self.history == History::Cumulative {
            for rec in self.records.iter_mut() {
                if rec.final_log == Some(0.0) {
                    continue; // already certain (the root)
                }
                if rec.history.iter().any(|&x| x > NEAR_CERTAIN_LOG) {
                    // effectively guaranteed activation; the log-space
                    // combination is unstable this close to zero
                    rec.final_log = Some(0.0);
                } else {
                    rec.final_log = Some(at_least_one(rec.history.iter().copied()));
                }
            }
        }
    }

    fn compute_to_neighbor(&mut self, node: NodeId) {
        let rec = &mut self.records[node];
        if rec.to_neighbor.is_none() {
            let reached = at_least_one(rec.from_parent.iter().copied());
            rec.to_neighbor = Some(reached + self.p.ln());
        }
    }

    fn compute_to_child(&mut self, node: NodeId) {
        let rec = &mut self.records[node];
        if rec.to_child.is_none() {
            let incoming = rec
                .from_parent
                .iter()
                .chain(rec.from_neighbor.iter())
                .copied();
            let reached = at_least_one(incoming);
            match self.history {
                History::Cumulative => rec.history.push(reached),
                History::Snapshot => rec.activation = Some(reached),
            }
            rec.to_child = Some(reached + self.p.ln());
        }
    }

    fn score(&self, u: NodeId) -> F {
        match self.history {
            History::Cumulative => self.records[u].final_log.unwrap_or(F::NEG_INFINITY),
            History::Snapshot => self.records[u].activation.unwrap_or(F::NEG_INFINITY),
        }
    }

    /// Lowest-scored node outside the seed set; ties go to the lowest id.
    pub fn next_seed(&self, seeds: &[NodeId]) -> Option<NodeId> {
        (0..self.records.len())
            .filter(|u| !seeds.contains(u))
            .min_by(|&a, &b| {
                self.score(a)
                    .partial_cmp(&self.score(b))
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.cmp(&b))
            })
    }

    /// The k lowest-scored nodes outside the seed set, ascending.
    pub fn lowest_k(&self, seeds: &[NodeId], k: usize) -> Vec<NodeId> {
        let mut candidates: Vec<NodeId> = (0..self.records.len())
            .filter(|u| !seeds.contains(u))
            .collect();
        candidates.sort_by(|&a, &b| {
            self.score(a)
                .partial_cmp(&self.score(b))
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });
        candidates.truncate(k);
        candidates
    }

    /// Linear-space activation probabilities from the current evidence.
    pub fn activation_probabilities(&self) -> Vec<Prob> {
        (0..self.records.len())
            .map(|u| self.score(u).exp())
            .collect()
    }
}
