//! # Genetic Algorithm
//!
//! The population-based optimizer: size-adaptive configuration, tournament
//! selection, order crossover, swap and 2-opt mutation, elitism, duplicate
//! suppression, and the generation-stepping state machine.

pub mod config;
pub mod crossover;
pub mod mutation;
pub mod optimizer;
pub mod population;
pub mod selection;

pub use config::GaConfig;
pub use crossover::{order_crossover, order_crossover_random};
pub use mutation::{swap_mutation, two_opt_mutation};
pub use optimizer::{GeneticOptimizer, OptimizerState};
pub use population::Population;
pub use selection::TournamentSelection;
