//! # Genetic Algorithm Configuration
//!
//! [`GaConfig`] carries every tunable of the optimizer. The size-adaptive
//! defaults live in a static bracket table keyed by point count:
//! [`GaConfig::for_point_count`] is a pure function over that table, so each
//! bracket can be unit-tested directly instead of hiding behind inline
//! branching. Small instances get large populations, many generations, and
//! 2-opt refinement; very large instances collapse to a minimal population
//! with high mutation because per-generation cost is O(population × N).

use crate::error::{Result, TspError};

/// Configuration for the genetic optimizer.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GaConfig {
    /// Number of tours kept in the population.
    pub population_size: usize,
    /// Number of best tours copied unchanged into the next generation.
    pub elite_count: usize,
    /// Configured tournament size; the effective size is clamped to half the
    /// population and never below 2.
    pub tournament_size: usize,
    /// Probability of applying a swap mutation to a new candidate.
    pub mutation_rate: f64,
    /// Probability of crossing two parents instead of cloning the first.
    pub crossover_rate: f64,
    /// Iteration cap for a run.
    pub max_generations: usize,
    /// Whether the seed tour and elite candidates get 2-opt refinement.
    pub two_opt_enabled: bool,
    /// Probability of applying a budgeted 2-opt pass as an extra mutation
    /// operator. Zero disables the operator.
    pub two_opt_mutation_rate: f64,
    /// Attempts to find a non-duplicate candidate before padding the
    /// population with a fresh random tour.
    pub duplicate_retry_limit: usize,
}

/// One row of the adaptive table: configuration for point counts up to and
/// including `max_points`.
struct Bracket {
    max_points: usize,
    config: GaConfig,
}

/// The size-adaptive parameter table, sorted ascending by `max_points`.
///
/// The constants are empirical tuning knobs; the shape is the contract:
/// population, generations, and 2-opt eligibility shrink monotonically as
/// the point count grows, mutation rate rises to compensate.
static ADAPTIVE_TABLE: &[Bracket] = &[
    Bracket {
        max_points: 50,
        config: GaConfig {
            population_size: 120,
            elite_count: 6,
            tournament_size: 5,
            mutation_rate: 0.15,
            crossover_rate: 0.9,
            max_generations: 1_500,
            two_opt_enabled: true,
            two_opt_mutation_rate: 0.25,
            duplicate_retry_limit: 10,
        },
    },
    Bracket {
        max_points: 200,
        config: GaConfig {
            population_size: 80,
            elite_count: 4,
            tournament_size: 4,
            mutation_rate: 0.2,
            crossover_rate: 0.85,
            max_generations: 800,
            two_opt_enabled: true,
            two_opt_mutation_rate: 0.1,
            duplicate_retry_limit: 10,
        },
    },
    Bracket {
        max_points: 1_000,
        config: GaConfig {
            population_size: 40,
            elite_count: 3,
            tournament_size: 3,
            mutation_rate: 0.25,
            crossover_rate: 0.8,
            max_generations: 300,
            two_opt_enabled: true,
            two_opt_mutation_rate: 0.05,
            duplicate_retry_limit: 6,
        },
    },
    Bracket {
        max_points: 5_000,
        config: GaConfig {
            population_size: 12,
            elite_count: 2,
            tournament_size: 3,
            mutation_rate: 0.35,
            crossover_rate: 0.7,
            max_generations: 100,
            two_opt_enabled: false,
            two_opt_mutation_rate: 0.0,
            duplicate_retry_limit: 4,
        },
    },
    Bracket {
        max_points: usize::MAX,
        config: GaConfig {
            population_size: 3,
            elite_count: 1,
            tournament_size: 2,
            mutation_rate: 0.5,
            crossover_rate: 0.6,
            max_generations: 30,
            two_opt_enabled: false,
            two_opt_mutation_rate: 0.0,
            duplicate_retry_limit: 2,
        },
    },
];

impl GaConfig {
    /// Selects the configuration bracket for a point count.
    ///
    /// Pure data lookup over the sorted adaptive table; the same input
    /// always yields the same configuration.
    pub fn for_point_count(point_count: usize) -> Self {
        ADAPTIVE_TABLE
            .iter()
            .find(|bracket| point_count <= bracket.max_points)
            .map(|bracket| bracket.config.clone())
            .expect("adaptive table covers all point counts")
    }

    /// Checks that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::Configuration`] naming the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(TspError::Configuration(
                "population size must be at least 2".to_string(),
            ));
        }
        if self.elite_count >= self.population_size {
            return Err(TspError::Configuration(format!(
                "elite count {} must be below the population size {}",
                self.elite_count, self.population_size
            )));
        }
        if self.tournament_size < 2 {
            return Err(TspError::Configuration(
                "tournament size must be at least 2".to_string(),
            ));
        }
        for (name, rate) in [
            ("mutation rate", self.mutation_rate),
            ("crossover rate", self.crossover_rate),
            ("2-opt mutation rate", self.two_opt_mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(TspError::Configuration(format!(
                    "{} {} must be within [0, 1]",
                    name, rate
                )));
            }
        }
        if self.max_generations == 0 {
            return Err(TspError::Configuration(
                "generation cap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Effective tournament size: the configured size clamped to half the
    /// population, but never below 2.
    pub fn effective_tournament_size(&self) -> usize {
        self.tournament_size
            .min(self.population_size / 2)
            .max(2)
    }
}
