//! # Error Types
//!
//! Custom error types for the TSP engine. Construction-time failures (empty
//! point sets, capacity limits, bad configuration) abort a run; a malformed
//! row in tabular input is recoverable and is reported through
//! [`TspError::InputRow`] so callers can skip it with a diagnostic.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use tspga::error::{TspError, Result};
//!
//! fn build_something(n: usize) -> Result<()> {
//!     if n == 0 {
//!         return Err(TspError::EmptyPointSet);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Adding context to a foreign error:
//!
//! ```rust
//! use tspga::error::{Result, ResultExt};
//! use std::fs::File;
//!
//! fn open_points(path: &str) -> Result<File> {
//!     File::open(path).context("failed to open point file")
//! }
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur in the TSP engine.
#[derive(Error, Debug)]
pub enum TspError {
    /// No points were supplied; a distance matrix or tour cannot be built.
    #[error("Empty point set: cannot operate on zero points")]
    EmptyPointSet,

    /// The point count exceeds what the O(N²) distance matrix can hold.
    #[error("Capacity error: {0}")]
    Capacity(String),

    /// An invalid configuration was provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A tour violated a structural invariant (wrong boundary, not a
    /// permutation, wrong length).
    #[error("Invalid tour: {0}")]
    InvalidTour(String),

    /// A single row of tabular point input could not be parsed. Recoverable:
    /// loaders skip the row and keep going.
    #[error("Malformed input row {line}: {reason}")]
    InputRow { line: usize, reason: String },

    /// Error that occurs when random number generation fails.
    #[error("Random generation error: {0}")]
    RandomGeneration(String),

    /// Error that occurs when an I/O operation fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for TSP engine operations.
pub type Result<T> = std::result::Result<T, TspError>;

/// Extension trait for Result to add context to errors.
///
/// ## Examples
///
/// ```rust
/// use tspga::error::ResultExt;
/// use std::fs::File;
///
/// fn read_file(path: &str) -> tspga::error::Result<()> {
///     File::open(path).context("failed to open file")?;
///     Ok(())
/// }
/// ```
pub trait ResultExt<T, E> {
    /// Converts the error to a [`TspError`] with the provided context.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| TspError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
///
/// ## Examples
///
/// ```rust
/// use tspga::error::{TspError, OptionExt};
///
/// fn shortest(lengths: &[f64]) -> tspga::error::Result<f64> {
///     lengths
///         .iter()
///         .copied()
///         .min_by(|a, b| a.total_cmp(b))
///         .ok_or_else_tsp(|| TspError::EmptyPointSet)
/// }
/// ```
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T>` using a closure to generate
    /// the error.
    fn ok_or_else_tsp<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> TspError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_tsp<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> TspError,
    {
        self.ok_or_else(err_fn)
    }
}
