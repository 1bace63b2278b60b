//! Experiment driver for the cascade crates: builds synthetic graphs,
//! runs seed selection repeatedly, and writes JSON reports.

pub mod cli;
pub mod spreadability;

use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Everything needed to reproduce one experiment run.
#[derive(Clone, Debug, Serialize)]
pub struct RunManifest {
    pub graph: String,
    pub nodes: usize,
    pub edges: usize,
    pub policy: String,
    pub p: f64,
    pub k: usize,
    pub trials: usize,
    pub iterations: usize,
    pub seed: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct IterationReport {
    /// Externally supplied root; absent when the policy self-initializes.
    pub initial_seed: Option<usize>,
    pub seeds: Vec<usize>,
    /// Bottleneck probability per growing seed prefix.
    pub evaluations: Option<Vec<f64>>,
    pub oracle_calls: usize,
    pub precompute_secs: f64,
    pub selection_secs: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExperimentReport {
    pub manifest: RunManifest,
    pub iterations: Vec<IterationReport>,
    /// Per-prefix bottleneck probability averaged across iterations.
    pub mean_curve: Option<Vec<f64>>,
}

pub fn write_report(path: &Path, report: &ExperimentReport) -> anyhow::Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)?;
    Ok(())
}
