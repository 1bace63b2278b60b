//! Transmission-probability calibration: scan p in 0.01 steps and report
//! the values bracketing low, medium, and high mean activation fractions.

use cascade_core::{Estimator, Graph};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const LOW: f64 = 0.2;
const MED: f64 = 0.5;
const HIGH: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpreadabilityBands {
    pub low: f64,
    pub med: f64,
    pub high: f64,
}

/// For each p, a single-trial cascade runs from each of `samples` roots
/// drawn with replacement; the activation fraction is averaged over the
/// roots. Each band reports the largest p still below its threshold
/// (high is then bumped to the first p at or above it).
pub fn search(graph: &Graph, samples: usize, seed: u64) -> SpreadabilityBands {
    let n = graph.num_nodes();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let roots: Vec<usize> = (0..samples).map(|_| rng.gen_range(0..n)).collect();

    let p_vals: Vec<f64> = (1..100).map(|i| i as f64 / 100.0).collect();
    let mut fractions = Vec::with_capacity(p_vals.len());
    for &p in &p_vals {
        let mut total = 0.0;
        for &root in &roots {
            let activated: f64 = Estimator::new(1, rng.gen())
                .estimate(graph, p, &[root])
                .iter()
                .sum();
            total += activated / n as f64;
        }
        fractions.push(total / samples as f64);
    }

    let mut low_idx = None;
    let mut med_idx = None;
    let mut high_idx = None;
    for (i, &f) in fractions.iter().enumerate() {
        if f < LOW {
            low_idx = Some(i);
        }
        if f < MED {
            med_idx = Some(i);
        }
        if f < HIGH {
            high_idx = Some(i);
        }
    }

    let last = p_vals.len() - 1;
    let low = p_vals[low_idx.unwrap_or(0)];
    let med = p_vals[med_idx.unwrap_or(p_vals.len() / 2)];
    let high = match high_idx {
        // the scan never stayed below the band, or only its final value
        // did; settle for the largest scanned p
        None => p_vals[last],
        Some(i) if i == last => p_vals[last],
        // step up to the first p at or above the band
        Some(i) => p_vals[i + 1],
    };

    SpreadabilityBands { low, med, high }
}
