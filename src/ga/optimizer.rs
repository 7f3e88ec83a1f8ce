//! # Genetic Optimizer
//!
//! The generation-stepping state machine. A [`GeneticOptimizer`] moves
//! through `Uninitialized -> Initialized -> Evolving -> Terminated` with no
//! skips: the population must be seeded before the first step, and a
//! terminated optimizer refuses further steps.
//!
//! Each generation copies the elite tours unchanged (so the best-known
//! length never worsens), fills the remaining slots through tournament
//! selection, order crossover, and mutation, suppresses duplicate interiors,
//! and re-sorts. A failure while breeding one candidate discards that
//! candidate and substitutes a fresh random tour; it never aborts the run.

use tracing::{debug, warn};

use crate::error::{Result, TspError};
use crate::ga::config::GaConfig;
use crate::ga::crossover::order_crossover_random;
use crate::ga::mutation::{swap_mutation, two_opt_mutation};
use crate::ga::population::Population;
use crate::ga::selection::TournamentSelection;
use crate::local_search::TwoOpt;
use crate::matrix::DistanceMatrix;
use crate::rng::RandomNumberGenerator;
use crate::tour::Tour;

/// Lifecycle states of the optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerState {
    /// Created; no population exists yet.
    Uninitialized,
    /// Population seeded; ready for the first generation step.
    Initialized,
    /// At least one generation step has run.
    Evolving,
    /// The run has ended; no further steps are accepted.
    Terminated,
}

/// The genetic optimizer over a fixed distance matrix.
#[derive(Debug, Clone)]
pub struct GeneticOptimizer<'a> {
    matrix: &'a DistanceMatrix,
    config: GaConfig,
    selection: TournamentSelection,
    two_opt: TwoOpt,
    rng: RandomNumberGenerator,
    state: OptimizerState,
    population: Population,
    generation: usize,
    best: Option<Tour>,
    best_length: f64,
    best_generation: usize,
    stagnant_generations: usize,
}

impl<'a> GeneticOptimizer<'a> {
    /// Creates an optimizer with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::Configuration`] if the configuration is invalid.
    pub fn new(
        matrix: &'a DistanceMatrix,
        config: GaConfig,
        rng: RandomNumberGenerator,
    ) -> Result<Self> {
        config.validate()?;
        let selection = TournamentSelection::new(config.effective_tournament_size())?;
        let two_opt = TwoOpt::for_point_count(matrix.size());

        Ok(Self {
            matrix,
            config,
            selection,
            two_opt,
            rng,
            state: OptimizerState::Uninitialized,
            population: Population::with_capacity(0),
            generation: 0,
            best: None,
            best_length: f64::INFINITY,
            best_generation: 0,
            stagnant_generations: 0,
        })
    }

    /// Creates an optimizer configured by the adaptive table for the
    /// matrix's point count.
    pub fn with_adaptive_config(
        matrix: &'a DistanceMatrix,
        rng: RandomNumberGenerator,
    ) -> Result<Self> {
        let config = GaConfig::for_point_count(matrix.size());
        Self::new(matrix, config, rng)
    }

    /// Seeds the population and records the initial best tour.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::Configuration`] if called in any state other
    /// than `Uninitialized`.
    pub fn initialize(&mut self) -> Result<()> {
        if self.state != OptimizerState::Uninitialized {
            return Err(TspError::Configuration(format!(
                "initialize called in state {:?}",
                self.state
            )));
        }

        self.population = Population::seed(self.matrix, &self.config, &mut self.rng)?;
        self.record_best();
        self.state = OptimizerState::Initialized;
        Ok(())
    }

    /// Runs one generation step. Returns `true` if the best-known tour
    /// strictly improved.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::Configuration`] if the optimizer has not been
    /// initialized or has already terminated.
    pub fn step(&mut self) -> Result<bool> {
        match self.state {
            OptimizerState::Initialized | OptimizerState::Evolving => {}
            other => {
                return Err(TspError::Configuration(format!(
                    "step called in state {:?}",
                    other
                )))
            }
        }
        self.state = OptimizerState::Evolving;

        let lengths = self.population.lengths();
        let mut next = Population::with_capacity(self.config.population_size);

        // Elitism: the top tours survive unchanged, so the best length is
        // monotonically non-worsening across generations.
        for elite in self.population.tours().iter().take(self.config.elite_count) {
            next.push(elite.clone());
        }

        while next.len() < self.config.population_size {
            let mut accepted = false;
            for _ in 0..self.config.duplicate_retry_limit {
                let candidate = match self.breed_candidate(&lengths) {
                    Ok(candidate) => candidate,
                    Err(error) => {
                        // One bad candidate must never abort the run.
                        warn!(%error, "breeding failed; substituting a random tour");
                        Tour::random(self.matrix.size(), &mut self.rng)?
                    }
                };
                if next.push_unique(candidate) {
                    accepted = true;
                    break;
                }
            }
            if !accepted {
                next.push(Tour::random(self.matrix.size(), &mut self.rng)?);
            }
        }

        next.sort_by_length(self.matrix);
        self.population = next;
        self.generation += 1;

        let improved = self.record_best();
        if improved {
            debug!(
                generation = self.generation,
                best = self.best_length,
                "best tour improved"
            );
        }
        Ok(improved)
    }

    /// Marks the run as finished. Idempotent; the population is left in its
    /// last fully-sorted, valid state.
    pub fn terminate(&mut self) {
        self.state = OptimizerState::Terminated;
    }

    /// Breeds one candidate: two tournament parents, order crossover with
    /// the configured probability (otherwise a clone of the first parent),
    /// then swap and optional 2-opt mutation.
    fn breed_candidate(&mut self, lengths: &[f64]) -> Result<Tour> {
        let first = self.selection.select(lengths, &mut self.rng)?;
        let second = self.selection.select(lengths, &mut self.rng)?;

        let parent1 = &self.population.tours()[first];
        let interior = if self.rng.gen_bool(self.config.crossover_rate) {
            let parent2 = &self.population.tours()[second];
            order_crossover_random(parent1.interior(), parent2.interior(), &mut self.rng)?
        } else {
            parent1.interior().to_vec()
        };

        let mut child = Tour::from_interior(interior, self.matrix.size())?;
        if self.rng.gen_bool(self.config.mutation_rate) {
            swap_mutation(&mut child, &mut self.rng);
        }
        if self.config.two_opt_enabled && self.rng.gen_bool(self.config.two_opt_mutation_rate) {
            two_opt_mutation(&mut child, self.matrix, &self.two_opt);
        }
        Ok(child)
    }

    /// Promotes the current population's best tour into long-lived state if
    /// it strictly improves the prior best. The promoted tour is an owned
    /// copy, never an alias into the live population.
    fn record_best(&mut self) -> bool {
        let Some(best) = self.population.best() else {
            return false;
        };
        let length = best
            .cached_length()
            .unwrap_or_else(|| best.recompute_length(self.matrix));

        if length < self.best_length {
            self.best = Some(best.clone());
            self.best_length = length;
            self.best_generation = self.generation;
            self.stagnant_generations = 0;
            true
        } else {
            if self.generation > 0 {
                self.stagnant_generations += 1;
            }
            false
        }
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> OptimizerState {
        self.state
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Returns the number of completed generation steps.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Returns the best tour seen so far, if the optimizer was initialized.
    pub fn best_tour(&self) -> Option<&Tour> {
        self.best.as_ref()
    }

    /// Returns the length of the best tour seen so far.
    pub fn best_length(&self) -> f64 {
        self.best_length
    }

    /// Returns the generation at which the best tour was found.
    pub fn best_generation(&self) -> usize {
        self.best_generation
    }

    /// Returns the number of consecutive generations without improvement.
    pub fn stagnant_generations(&self) -> usize {
        self.stagnant_generations
    }

    /// Returns the current population.
    pub fn population(&self) -> &Population {
        &self.population
    }
}
