//! # RandomNumberGenerator
//!
//! A thin wrapper around the `rand` crate's `StdRng` that centralizes every
//! source of randomness in the engine. Seeding through [`from_seed`] makes
//! whole runs reproducible, which the determinism tests rely on.
//!
//! [`from_seed`]: RandomNumberGenerator::from_seed
//!
//! ## Example
//!
//! ```rust
//! use tspga::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let p = rng.gen_probability();
//! assert!((0.0..1.0).contains(&p));
//! ```

use rand::seq::SliceRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng` that provides the random
/// primitives the optimizer needs: uniform indices, probabilities, unbiased
/// shuffles, and distinct index samples.
#[derive(Debug, Clone)]
pub struct RandomNumberGenerator {
    rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates a uniform `f64` in the given range.
    pub fn gen_range(&mut self, from: f64, to: f64) -> f64 {
        self.rng.gen_range(from..to)
    }

    /// Generates a uniform index in `0..len`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero; callers guard against empty collections.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Generates a uniform probability in `[0, 1)`.
    pub fn gen_probability(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Returns `true` with the given probability.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.gen_probability() < probability
    }

    /// Shuffles a slice in place with an unbiased Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        values.shuffle(&mut self.rng);
    }

    /// Draws `count` distinct indices from `0..len` without replacement.
    ///
    /// Uses a partial Fisher-Yates over an index vector, so the cost is
    /// O(len) setup plus O(count) draws. If `count >= len`, every index is
    /// returned once.
    pub fn sample_indices(&mut self, len: usize, count: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        let count = count.min(len);
        for i in 0..count {
            let j = self.rng.gen_range(i..len);
            indices.swap(i, j);
        }
        indices.truncate(count);
        indices
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gen_range_bounds() {
        let mut rng = RandomNumberGenerator::new();
        for _ in 0..100 {
            let v = rng.gen_range(-1.0, 1.0);
            assert!((-1.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_gen_index_bounds() {
        let mut rng = RandomNumberGenerator::new();
        for _ in 0..100 {
            assert!(rng.gen_index(7) < 7);
        }
    }

    #[test]
    fn test_gen_bool_extremes() {
        let mut rng = RandomNumberGenerator::new();
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut rng1 = RandomNumberGenerator::from_seed(42);
        let mut rng2 = RandomNumberGenerator::from_seed(42);

        let seq1: Vec<f64> = (0..5).map(|_| rng1.gen_probability()).collect();
        let seq2: Vec<f64> = (0..5).map(|_| rng2.gen_probability()).collect();

        assert_eq!(seq1, seq2);
    }

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut rng = RandomNumberGenerator::from_seed(7);
        let mut values: Vec<usize> = (0..20).collect();
        rng.shuffle(&mut values);

        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_sample_indices_distinct() {
        let mut rng = RandomNumberGenerator::from_seed(11);
        let sample = rng.sample_indices(10, 4);

        assert_eq!(sample.len(), 4);
        let mut sorted = sample.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 4);
    }

    #[test]
    fn test_sample_indices_count_capped_at_len() {
        let mut rng = RandomNumberGenerator::from_seed(11);
        let sample = rng.sample_indices(3, 10);

        assert_eq!(sample.len(), 3);
    }
}
