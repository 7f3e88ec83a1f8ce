//! # tspga
//!
//! A heuristic optimization engine for the Euclidean traveling salesman
//! problem: a nearest-neighbor construction heuristic refined by a genetic
//! algorithm with tournament selection, order crossover, swap mutation,
//! elitism, and budget-limited 2-opt local search. Parameters adapt to the
//! instance size through a pure bracket table, and a run controller bounds
//! every run by iterations, wall-clock timeout, and cooperative
//! cancellation.
//!
//! ## Example
//!
//! ```rust
//! use tspga::matrix::DistanceMatrix;
//! use tspga::point::PointSet;
//! use tspga::rng::RandomNumberGenerator;
//! use tspga::runner::{RunController, RunOptions, TracingSink};
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let points = PointSet::generate_random(20, &mut rng).unwrap();
//! let matrix = DistanceMatrix::build(&points).unwrap();
//!
//! let options = RunOptions::builder().iteration_cap(50).seed(42).build();
//! let controller = RunController::new(&matrix, options);
//! let report = controller.run(&mut TracingSink).unwrap();
//!
//! assert_eq!(report.best.order.first(), Some(&0));
//! assert_eq!(report.best.order.last(), Some(&0));
//! ```

pub mod construction;
pub mod error;
pub mod ga;
pub mod local_search;
pub mod matrix;
pub mod point;
pub mod rng;
pub mod runner;
pub mod tour;

// Re-export commonly used types for convenience
pub use construction::nearest_neighbor_tour;
pub use error::{OptionExt, Result, ResultExt, TspError};
pub use ga::{GaConfig, GeneticOptimizer, OptimizerState, Population};
pub use local_search::{TwoOpt, TwoOptBudget};
pub use matrix::DistanceMatrix;
pub use point::{Point, PointSet};
pub use runner::{
    CancelToken, ProgressEvent, ProgressSink, RunController, RunOptions, RunReport,
    TerminationReason, TourSnapshot, TracingSink,
};
pub use tour::Tour;
