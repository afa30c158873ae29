//! Deterministic per-trial RNG derivation.
//!
//! A master seed expands into per-trial sub-seeds via BLAKE3 hashing, so a
//! seeded simulation produces identical trials regardless of the order the
//! parallel trial loop schedules them in.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Derives an independent seeded RNG for each simulation trial.
#[derive(Debug, Clone, Copy)]
pub struct TrialRng {
    master_seed: u64,
}

impl TrialRng {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Deterministic sub-seed for one trial, independent of derivation order.
    pub fn sub_seed(&self, trial: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(&trial.to_le_bytes());
        let hash = hasher.finalize();
        u64::from_le_bytes(hash.as_bytes()[..8].try_into().expect("blake3 output is 32 bytes"))
    }

    /// Seeded StdRng for one trial.
    pub fn rng_for(&self, trial: u64) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(trial))
    }
}
