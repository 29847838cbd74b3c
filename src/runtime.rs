//! Deterministic randomness
//!
//! Nothing in the solver is random. Randomness only enters when synthetic
//! sensor datasets are generated, and every such draw goes through an RNG
//! built here so that a seed fully determines the output.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seed used when the caller does not supply one
pub const DEFAULT_SEED: u64 = 42;

/// Seeded generator; the same seed always yields the same stream
pub fn deterministic_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = deterministic_rng(DEFAULT_SEED);
        let mut b = deterministic_rng(DEFAULT_SEED);

        let xs: Vec<u64> = (0..8).map(|_| a.gen()).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.gen()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_different_seeds_differ() {
        let x: u64 = deterministic_rng(1).gen();
        let y: u64 = deterministic_rng(2).gen();
        assert_ne!(x, y);
    }
}
