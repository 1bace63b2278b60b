use crate::spreadability;
use crate::{ExperimentReport, IterationReport, RunManifest, write_report};
use cascade_core::Graph;
use cascade_select::{Policy, SeedSelector, SelectorConfig};
use clap::{Parser, Subcommand, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "cascade")]
#[command(about = "Influence spread estimation and seed selection")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a seed-selection experiment and write a JSON report
    Experiment {
        /// Graph family
        #[arg(long, value_enum, default_value = "gnp")]
        graph: GraphKind,

        /// Node count for generated graphs
        #[arg(long, default_value = "100")]
        nodes: usize,

        /// Edge probability (gnp only)
        #[arg(long, default_value = "0.1")]
        edge_prob: f64,

        /// Selection policy
        #[arg(long, value_enum)]
        policy: PolicyKind,

        /// Transmission probability
        #[arg(long, default_value = "0.5")]
        p: f64,

        /// Number of seeds to select
        #[arg(long, default_value = "5")]
        k: usize,

        /// Monte Carlo trials per estimate
        #[arg(long, default_value = "1000")]
        trials: usize,

        /// Repetitions, each rooted at a distinct random initial seed
        #[arg(long, default_value = "1")]
        iterations: usize,

        /// Worker threads (default: the global pool)
        #[arg(long)]
        threads: Option<usize>,

        /// Master random seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Skip the per-prefix evaluation pass
        #[arg(long)]
        no_eval: bool,

        /// Output JSON file (default: print to stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Scan p for values giving low, medium, and high spreadability
    Spreadability {
        /// Graph family
        #[arg(long, value_enum, default_value = "gnp")]
        graph: GraphKind,

        /// Node count for generated graphs
        #[arg(long, default_value = "100")]
        nodes: usize,

        /// Edge probability (gnp only)
        #[arg(long, default_value = "0.1")]
        edge_prob: f64,

        /// Sampled roots per p value
        #[arg(long, default_value = "100")]
        samples: usize,

        /// Master random seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum GraphKind {
    #[value(name = "gnp")]
    Gnp,
    #[value(name = "complete")]
    Complete,
    #[value(name = "star-of-stars")]
    StarOfStars,
}

impl GraphKind {
    fn label(self) -> &'static str {
        match self {
            GraphKind::Gnp => "gnp",
            GraphKind::Complete => "complete",
            GraphKind::StarOfStars => "star-of-stars",
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PolicyKind {
    #[value(name = "random")]
    Random,
    #[value(name = "greedy")]
    Greedy,
    #[value(name = "myopic")]
    Myopic,
    #[value(name = "naive-myopic")]
    NaiveMyopic,
    #[value(name = "gonzalez")]
    Gonzalez,
    #[value(name = "furthest-non-seed-0")]
    FurthestNonSeed0,
    #[value(name = "furthest-non-seed-1")]
    FurthestNonSeed1,
    #[value(name = "degree-lowest-centrality-0")]
    DegreeLowestCentrality0,
    #[value(name = "degree-lowest-centrality-1")]
    DegreeLowestCentrality1,
    #[value(name = "degree-highest-degree-neighbor-0")]
    DegreeHighestDegreeNeighbor0,
    #[value(name = "degree-highest-degree-neighbor-1")]
    DegreeHighestDegreeNeighbor1,
    #[value(name = "bfs-myopic")]
    BfsMyopic,
    #[value(name = "naive-bfs-myopic")]
    NaiveBfsMyopic,
    #[value(name = "ppr-myopic")]
    PprMyopic,
    #[value(name = "naive-ppr-myopic")]
    NaivePprMyopic,
}

impl PolicyKind {
    fn label(self) -> &'static str {
        match self {
            PolicyKind::Random => "random",
            PolicyKind::Greedy => "greedy",
            PolicyKind::Myopic => "myopic",
            PolicyKind::NaiveMyopic => "naive-myopic",
            PolicyKind::Gonzalez => "gonzalez",
            PolicyKind::FurthestNonSeed0 => "furthest-non-seed-0",
            PolicyKind::FurthestNonSeed1 => "furthest-non-seed-1",
            PolicyKind::DegreeLowestCentrality0 => "degree-lowest-centrality-0",
            PolicyKind::DegreeLowestCentrality1 => "degree-lowest-centrality-1",
            PolicyKind::DegreeHighestDegreeNeighbor0 => "degree-highest-degree-neighbor-0",
            PolicyKind::DegreeHighestDegreeNeighbor1 => "degree-highest-degree-neighbor-1",
            PolicyKind::BfsMyopic => "bfs-myopic",
            PolicyKind::NaiveBfsMyopic => "naive-bfs-myopic",
            PolicyKind::PprMyopic => "ppr-myopic",
            PolicyKind::NaivePprMyopic => "naive-ppr-myopic",
        }
    }
}

impl From<PolicyKind> for Policy {
    fn from(kind: PolicyKind) -> Self {
        match kind {
            PolicyKind::Random => Policy::Random,
            PolicyKind::Greedy => Policy::Greedy,
            PolicyKind::Myopic => Policy::Myopic,
            PolicyKind::NaiveMyopic => Policy::NaiveMyopic,
            PolicyKind::Gonzalez => Policy::Gonzalez,
            PolicyKind::FurthestNonSeed0 => Policy::FurthestNonSeed { choose_neighbor: false },
            PolicyKind::FurthestNonSeed1 => Policy::FurthestNonSeed { choose_neighbor: true },
            PolicyKind::DegreeLowestCentrality0 => {
                Policy::DegreeLowestCentrality { choose_neighbor: false }
            }
            PolicyKind::DegreeLowestCentrality1 => {
                Policy::DegreeLowestCentrality { choose_neighbor: true }
            }
            PolicyKind::DegreeHighestDegreeNeighbor0 => {
                Policy::DegreeHighestDegreeNeighbor { choose_neighbor: false }
            }
            PolicyKind::DegreeHighestDegreeNeighbor1 => {
                Policy::DegreeHighestDegreeNeighbor { choose_neighbor: true }
            }
            PolicyKind::BfsMyopic => Policy::BfsMyopic,
            PolicyKind::NaiveBfsMyopic => Policy::NaiveBfsMyopic,
            PolicyKind::PprMyopic => Policy::PprMyopic,
            PolicyKind::NaivePprMyopic => Policy::NaivePprMyopic,
        }
    }
}

pub fn build_graph(kind: GraphKind, nodes: usize, edge_prob: f64, seed: u64) -> Graph {
    match kind {
        GraphKind::Gnp => Graph::gnp(nodes, edge_prob, seed),
        GraphKind::Complete => Graph::complete(nodes),
        // a clique core of 5 with 2-node pendant arms filling the rest
        GraphKind::StarOfStars => {
            let core = nodes.min(5);
            let arms = nodes.saturating_sub(core) / 2;
            Graph::star_of_stars(core, arms, 2)
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run_experiment_command(
    graph: GraphKind,
    nodes: usize,
    edge_prob: f64,
    policy: PolicyKind,
    p: f64,
    k: usize,
    trials: usize,
    iterations: usize,
    threads: Option<usize>,
    seed: u64,
    no_eval: bool,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    anyhow::ensure!(iterations >= 1, "iterations must be at least 1");

    let g = build_graph(graph, nodes, edge_prob, seed);
    anyhow::ensure!(
        iterations <= g.num_nodes(),
        "cannot pick {iterations} distinct initial seeds from {} nodes",
        g.num_nodes()
    );
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    // a single iteration lets the policy pick its own root; repeated runs
    // each start from a distinct random one
    let roots: Vec<Option<usize>> = if iterations == 1 {
        vec![None]
    } else {
        rand::seq::index::sample(&mut rng, g.num_nodes(), iterations)
            .into_iter()
            .map(Some)
            .collect()
    };

    let mut reports: Vec<IterationReport> = Vec::with_capacity(iterations);
    for (i, &root) in roots.iter().enumerate() {
        let cfg = SelectorConfig {
            p,
            k,
            seeds: root.map(|r| vec![r]),
            trials,
            threads,
            seed: rng.gen(),
            ..SelectorConfig::default()
        };
        let mut sel = SeedSelector::new(&g, policy.into(), cfg)?;

        let start = Instant::now();
        let seeds = sel.predict().to_vec();
        let total = start.elapsed();
        let precompute = sel.precompute_time();
        let selection = total.saturating_sub(precompute);

        let evaluations = if no_eval { None } else { Some(sel.evaluate()) };
        tracing::info!(iteration = i, ?seeds, elapsed = ?total, "selection complete");

        reports.push(IterationReport {
            initial_seed: root,
            seeds,
            evaluations,
            oracle_calls: sel.oracle_calls(),
            precompute_secs: precompute.as_secs_f64(),
            selection_secs: selection.as_secs_f64(),
        });
    }

    // every iteration runs in the same mode, so the curves line up
    let mean_curve = reports.first().and_then(|first| {
        let len = first.evaluations.as_ref()?.len();
        let mut curve = vec![0.0; len];
        for report in &reports {
            for (acc, v) in curve.iter_mut().zip(report.evaluations.as_ref()?) {
                *acc += v;
            }
        }
        for acc in curve.iter_mut() {
            *acc /= reports.len() as f64;
        }
        Some(curve)
    });

    let report = ExperimentReport {
        manifest: RunManifest {
            graph: graph.label().to_string(),
            nodes: g.num_nodes(),
            edges: g.num_edges(),
            policy: policy.label().to_string(),
            p,
            k,
            trials,
            iterations,
            seed,
        },
        iterations: reports,
        mean_curve,
    };

    match out {
        Some(path) => {
            write_report(&path, &report)?;
            println!("wrote {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

pub fn run_spreadability_command(
    graph: GraphKind,
    nodes: usize,
    edge_prob: f64,
    samples: usize,
    seed: u64,
) -> anyhow::Result<()> {
    anyhow::ensure!(samples >= 1, "need at least one sampled root");

    let g = build_graph(graph, nodes, edge_prob, seed);
    let bands = spreadability::search(&g, samples, seed);

    println!("graph: {} ({} nodes, {} edges)", graph.label(), g.num_nodes(), g.num_edges());
    println!("low:  p = {:.2}", bands.low);
    println!("med:  p = {:.2}", bands.med);
    println!("high: p = {:.2}", bands.high);
    Ok(())
}
