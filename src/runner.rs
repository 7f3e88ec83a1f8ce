//! # Run Controller
//!
//! Drives the optimizer through a bounded loop: up to the iteration cap or
//! until a wall-clock timeout elapses, whichever comes first. Hitting the
//! timeout is an expected termination mode, not an error; the controller
//! reports the best-known result either way.
//!
//! Cancellation is cooperative: a [`CancelToken`] is inspected at the top of
//! every iteration, so a run always stops between generations and the
//! population is left in its last fully-sorted, valid state. Progress is
//! emitted to a [`ProgressSink`] at a configurable cadence; the sink only
//! ever receives owned snapshots, never references into the live population,
//! so a UI thread can hold them while the optimizer keeps evolving.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;

use crate::error::{OptionExt, Result, TspError};
use crate::ga::optimizer::GeneticOptimizer;
use crate::matrix::DistanceMatrix;
use crate::rng::RandomNumberGenerator;
use crate::tour::Tour;

/// An owned copy of a tour and its length, safe to hand to another thread.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TourSnapshot {
    /// The full closed visiting order.
    pub order: Vec<usize>,
    /// The total length of the tour.
    pub length: f64,
}

impl TourSnapshot {
    /// Copies a tour into a snapshot, recomputing the length if no cached
    /// value is available.
    pub fn from_tour(tour: &Tour, matrix: &DistanceMatrix) -> Self {
        Self {
            order: tour.order().to_vec(),
            length: tour
                .cached_length()
                .unwrap_or_else(|| tour.recompute_length(matrix)),
        }
    }
}

/// A progress report emitted while a run is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    /// Completed generation count.
    pub iteration: usize,
    /// Best length found so far.
    pub best_length: f64,
    /// Generation at which the best was found.
    pub best_iteration: usize,
    /// Consecutive generations without improvement.
    pub stagnant_iterations: usize,
    /// Time since the run started.
    pub elapsed: Duration,
}

/// Why a run stopped. All three are normal outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The configured generation cap was reached.
    IterationCap,
    /// The wall-clock timeout elapsed.
    Timeout,
    /// The cancel token was triggered.
    Cancelled,
}

/// The final report of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// The best tour found.
    pub best: TourSnapshot,
    /// Total generations completed.
    pub iterations: usize,
    /// Generation at which the best was found.
    pub best_iteration: usize,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
    /// Why the run stopped.
    pub reason: TerminationReason,
}

/// Consumer of progress reports and tour snapshots: the display collaborator.
///
/// Implementations produce nothing back into the optimizer; the only signal
/// flowing the other way is a [`CancelToken`].
pub trait ProgressSink {
    /// Called at the configured reporting cadence and once at the end.
    fn on_progress(&mut self, event: &ProgressEvent);

    /// Called whenever the best tour improves, with an owned snapshot of the
    /// new best and of the runner-up tours for comparative display.
    fn on_best(&mut self, _best: &TourSnapshot, _secondary: &[TourSnapshot]) {}
}

/// A [`ProgressSink`] that logs through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn on_progress(&mut self, event: &ProgressEvent) {
        info!(
            iteration = event.iteration,
            best_length = event.best_length,
            best_iteration = event.best_iteration,
            elapsed_ms = event.elapsed.as_millis() as u64,
            "progress"
        );
    }

    fn on_best(&mut self, best: &TourSnapshot, _secondary: &[TourSnapshot]) {
        info!(length = best.length, "new best tour");
    }
}

/// A cooperative cancellation flag shared between the controller and an
/// external collaborator.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a fresh, untriggered token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. The run stops before its next generation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns `true` if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Options for a single run. Everything is optional; unset values fall back
/// to the adaptive table and the size-scaled default timeout.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    iteration_cap: Option<usize>,
    timeout: Option<Duration>,
    seed: Option<u64>,
    report_every: usize,
    secondary_count: usize,
}

impl RunOptions {
    /// Returns a builder for run options.
    pub fn builder() -> RunOptionsBuilder {
        RunOptionsBuilder::default()
    }

    /// The default wall-clock timeout for a point count. Grows with N so
    /// that large instances get time proportional to their per-generation
    /// cost.
    pub fn default_timeout(point_count: usize) -> Duration {
        Duration::from_secs(5) + Duration::from_millis(4 * point_count as u64)
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            iteration_cap: None,
            timeout: None,
            seed: None,
            report_every: 10,
            secondary_count: 5,
        }
    }
}

/// Builder for [`RunOptions`].
#[derive(Debug, Clone, Default)]
pub struct RunOptionsBuilder {
    iteration_cap: Option<usize>,
    timeout: Option<Duration>,
    seed: Option<u64>,
    report_every: Option<usize>,
    secondary_count: Option<usize>,
}

impl RunOptionsBuilder {
    /// Overrides the adaptive table's generation cap.
    pub fn iteration_cap(mut self, value: usize) -> Self {
        self.iteration_cap = Some(value);
        self
    }

    /// Overrides the size-scaled default timeout.
    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = Some(value);
        self
    }

    /// Fixes the random seed for a reproducible run.
    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    /// Sets the reporting cadence in generations.
    pub fn report_every(mut self, value: usize) -> Self {
        self.report_every = Some(value.max(1));
        self
    }

    /// Sets how many runner-up tours accompany each best-tour snapshot.
    pub fn secondary_count(mut self, value: usize) -> Self {
        self.secondary_count = Some(value);
        self
    }

    /// Builds the options.
    pub fn build(self) -> RunOptions {
        let defaults = RunOptions::default();
        RunOptions {
            iteration_cap: self.iteration_cap,
            timeout: self.timeout,
            seed: self.seed,
            report_every: self.report_every.unwrap_or(defaults.report_every),
            secondary_count: self.secondary_count.unwrap_or(defaults.secondary_count),
        }
    }
}

/// Orchestrates a bounded optimization run over a distance matrix.
#[derive(Debug, Clone)]
pub struct RunController<'a> {
    matrix: &'a DistanceMatrix,
    options: RunOptions,
    cancel: CancelToken,
}

impl<'a> RunController<'a> {
    /// Creates a controller for the given matrix and options.
    pub fn new(matrix: &'a DistanceMatrix, options: RunOptions) -> Self {
        Self {
            matrix,
            options,
            cancel: CancelToken::new(),
        }
    }

    /// Returns a token that an external collaborator can use to stop the
    /// run between generations.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Runs the optimizer to completion and returns the final report.
    ///
    /// The loop stops at the iteration cap, the timeout, or cancellation;
    /// none of the three is an error. A final progress event is always
    /// emitted before returning.
    ///
    /// # Errors
    ///
    /// Returns an error only if the optimizer itself cannot be constructed
    /// or seeded (empty point set, invalid configuration).
    pub fn run(&self, sink: &mut dyn ProgressSink) -> Result<RunReport> {
        let rng = match self.options.seed {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };

        let mut optimizer = GeneticOptimizer::with_adaptive_config(self.matrix, rng)?;
        let iteration_cap = self
            .options
            .iteration_cap
            .unwrap_or(optimizer.config().max_generations);
        let timeout = self
            .options
            .timeout
            .unwrap_or_else(|| RunOptions::default_timeout(self.matrix.size()));

        let started = Instant::now();
        optimizer.initialize()?;
        self.emit_best(&optimizer, sink);

        let reason = loop {
            if self.cancel.is_cancelled() {
                break TerminationReason::Cancelled;
            }
            if optimizer.generation() >= iteration_cap {
                break TerminationReason::IterationCap;
            }
            if started.elapsed() >= timeout {
                break TerminationReason::Timeout;
            }

            let improved = optimizer.step()?;
            if improved {
                self.emit_best(&optimizer, sink);
            }
            if optimizer.generation() % self.options.report_every == 0 {
                sink.on_progress(&self.progress_event(&optimizer, started));
            }
        };

        optimizer.terminate();
        sink.on_progress(&self.progress_event(&optimizer, started));

        let best = optimizer
            .best_tour()
            .map(|tour| TourSnapshot::from_tour(tour, self.matrix))
            .ok_or_else_tsp(|| {
                TspError::Other("run finished without a best tour".to_string())
            })?;

        info!(
            iterations = optimizer.generation(),
            best_length = best.length,
            ?reason,
            "run finished"
        );

        Ok(RunReport {
            best,
            iterations: optimizer.generation(),
            best_iteration: optimizer.best_generation(),
            elapsed: started.elapsed(),
            reason,
        })
    }

    fn progress_event(&self, optimizer: &GeneticOptimizer<'_>, started: Instant) -> ProgressEvent {
        ProgressEvent {
            iteration: optimizer.generation(),
            best_length: optimizer.best_length(),
            best_iteration: optimizer.best_generation(),
            stagnant_iterations: optimizer.stagnant_generations(),
            elapsed: started.elapsed(),
        }
    }

    fn emit_best(&self, optimizer: &GeneticOptimizer<'_>, sink: &mut dyn ProgressSink) {
        let Some(best) = optimizer.best_tour() else {
            return;
        };
        let snapshot = TourSnapshot::from_tour(best, self.matrix);
        let secondary: Vec<TourSnapshot> = optimizer
            .population()
            .snapshots(self.options.secondary_count)
            .iter()
            .map(|tour| TourSnapshot::from_tour(tour, self.matrix))
            .collect();
        sink.on_best(&snapshot, &secondary);
    }
}
