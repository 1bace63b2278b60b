use crate::Prob;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Private random stream for one cascade trial.
///
/// Streams are derived from `(base_seed, trial_id)`, never shared between
/// trials: a single generator reused across parallel workers would
/// correlate the trial outcomes.
pub struct TrialRng {
    rng: ChaCha20Rng,
}

impl TrialRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn from_trial_id(base_seed: u64, trial_id: u64) -> Self {
        // Combine seeds deterministically
        let seed = base_seed.wrapping_add(trial_id.wrapping_mul(0x9e3779b97f4a7c15));
        Self::new(seed)
    }

    /// One Bernoulli draw for an edge transmission. Draws are strict
    /// (`u < p`), so p = 0 never transmits and p = 1 always does.
    pub fn transmit(&mut self, p: Prob) -> bool {
        self.rng.gen::<f64>() < p
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.gen()
    }
}
