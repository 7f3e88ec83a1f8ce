//! # Tournament Selection
//!
//! Parents are chosen by drawing a small uniform sample of the population
//! without replacement and keeping the shortest member. Selection pressure is
//! bounded by the sample size and each draw costs O(k), with no need to
//! consult more than the sampled tours.

use crate::error::{OptionExt, Result, TspError};
use crate::rng::RandomNumberGenerator;

/// Tournament selection over a population ordered arbitrarily, judged by the
/// per-member lengths (lower is better).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a tournament of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::Configuration`] if the size is below 2; a
    /// one-member tournament degenerates to uniform random selection.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 2 {
            return Err(TspError::Configuration(
                "tournament size must be at least 2".to_string(),
            ));
        }
        Ok(Self { tournament_size })
    }

    /// Returns the configured tournament size.
    pub fn size(&self) -> usize {
        self.tournament_size
    }

    /// Runs one tournament and returns the index of the winner: the member
    /// with the smallest length among a uniform sample drawn without
    /// replacement. When the population is smaller than the tournament, the
    /// whole population competes.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::Other`] if `lengths` is empty, or
    /// [`TspError::RandomGeneration`] if the draw yields no candidates.
    pub fn select(
        &self,
        lengths: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<usize> {
        if lengths.is_empty() {
            return Err(TspError::Other(
                "cannot run a tournament over an empty population".to_string(),
            ));
        }

        let sample = rng.sample_indices(lengths.len(), self.tournament_size);
        let mut candidates = sample.iter().copied();
        let mut winner = candidates.next().ok_or_else_tsp(|| {
            TspError::RandomGeneration("tournament draw produced no candidates".to_string())
        })?;
        for index in candidates {
            if lengths[index] < lengths[winner] {
                winner = index;
            }
        }
        Ok(winner)
    }
}
