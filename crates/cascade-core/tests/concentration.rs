use cascade_core::{Estimator, Graph};
use serde_json::json;
use std::fs::File;
use std::io::Write;

fn estimate_std(g: &Graph, trials: usize, reps: usize, node: usize) -> f64 {
    let values: Vec<f64> = (0..reps)
        .map(|rep| {
            let est = Estimator::new(trials, 1000 + rep as u64);
            est.estimate(g, 0.5, &[0])[node]
        })
        .collect();
    let mean = values.iter().sum::<f64>() / reps as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (reps - 1) as f64;
    var.sqrt()
}

#[test]
fn stderr_shrinks_with_sqrt_trials() {
    // Law of large numbers: 100x the trials, ~10x smaller standard error.
    let g = Graph::path(5);
    let node = 2;
    let reps = 30;

    let std_small = estimate_std(&g, 100, reps, node);
    let std_large = estimate_std(&g, 10_000, reps, node);
    let ratio = std_small / std_large;

    let results = json!({
        "std_100": std_small,
        "std_10000": std_large,
        "ratio": ratio,
        "expected_ratio": 10.0,
    });
    std::fs::create_dir_all("runs").ok();
    let mut file = File::create("runs/concentration.json").unwrap();
    write!(file, "{}", serde_json::to_string(&results).unwrap()).unwrap();

    println!("stderr ratio: {:.2} (expected ~10)", ratio);
    assert!(
        ratio > 5.0 && ratio < 20.0,
        "stderr ratio {} outside [5, 20]",
        ratio
    );
}
