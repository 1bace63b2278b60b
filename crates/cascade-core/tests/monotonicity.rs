use cascade_core::{Estimator, Graph};

#[test]
fn activation_probability_is_monotone_in_p() {
    let g = Graph::gnp(40, 0.1, 13);
    let trials = 5000;
    let node = 25;

    // 3 standard errors of slack for a Bernoulli mean at this trial count
    let slack = 3.0 * (0.25f64 / trials as f64).sqrt();

    let mut last = 0.0;
    for step in 0..=10 {
        let p = step as f64 / 10.0;
        let est = Estimator::new(trials, 42 + step as u64);
        let prob = est.estimate(&g, p, &[0])[node];
        assert!(
            prob >= last - slack,
            "estimate dropped from {} to {} at p = {}",
            last,
            prob,
            p
        );
        last = prob;
    }

    // endpoints are exact
    let at_zero = Estimator::new(100, 42).estimate(&g, 0.0, &[0])[node];
    assert_eq!(at_zero, 0.0);
}
