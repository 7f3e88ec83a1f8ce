//! # 2-opt Local Search
//!
//! Edge-pair exchange that untangles crossing segments of a tour. For the
//! edge pair `(i, i+1)` and `(j, j+1)` the move removes both edges and
//! reconnects the tour as `(i, j)` and `(i+1, j+1)` by reversing the segment
//! between positions `i+1` and `j` inclusive. The reversal only reorders
//! interior positions, so tour validity is structurally guaranteed.
//!
//! A full sweep costs O(N²) checks per pass, which is only affordable for a
//! few hundred points. The [`TwoOptBudget`] caps the number of checks per
//! call and widens the index stride as N grows, so coverage stays sparse but
//! nonzero on large instances.

use tracing::trace;

use crate::matrix::DistanceMatrix;
use crate::tour::Tour;

/// Minimum gain for a move to be accepted, filtering floating-point noise
/// that would otherwise cause endless churn between equivalent tours.
pub const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// Check budget for a single [`TwoOpt::improve`] call.
///
/// The exact constants are tuning knobs; the contract is only that the
/// budget shrinks (strides widen, check caps drop) as the point count grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoOptBudget {
    /// Step between successive candidate `i` and `j` positions.
    pub stride: usize,
    /// Maximum number of edge-pair checks per call.
    pub max_checks: usize,
    /// Maximum number of improving sweeps per call.
    pub max_passes: usize,
}

impl TwoOptBudget {
    /// An unbudgeted full 2-opt: every pair checked, swept to a fixed point.
    pub fn exhaustive() -> Self {
        Self {
            stride: 1,
            max_checks: usize::MAX,
            max_passes: 50,
        }
    }

    /// Selects a budget for the given point count.
    ///
    /// Thresholds are chosen so that small instances get the exhaustive
    /// search while large instances fall back to a sparse strided sample.
    pub fn for_point_count(point_count: usize) -> Self {
        match point_count {
            0..=300 => Self::exhaustive(),
            301..=1_000 => Self {
                stride: 1,
                max_checks: 200_000,
                max_passes: 5,
            },
            1_001..=5_000 => Self {
                stride: 2,
                max_checks: 60_000,
                max_passes: 2,
            },
            5_001..=20_000 => Self {
                stride: 8,
                max_checks: 30_000,
                max_passes: 1,
            },
            _ => Self {
                stride: 32,
                max_checks: 15_000,
                max_passes: 1,
            },
        }
    }
}

/// Budget-limited 2-opt local search over closed tours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoOpt {
    budget: TwoOptBudget,
}

impl TwoOpt {
    /// Creates a 2-opt search with an explicit budget.
    pub fn new(budget: TwoOptBudget) -> Self {
        Self { budget }
    }

    /// Creates a 2-opt search budgeted for the given point count.
    pub fn for_point_count(point_count: usize) -> Self {
        Self::new(TwoOptBudget::for_point_count(point_count))
    }

    /// Returns the configured budget.
    pub fn budget(&self) -> TwoOptBudget {
        self.budget
    }

    /// Improves the tour in place until no improving pair is found within
    /// the budget. Returns `true` if any move was applied.
    ///
    /// The cached length is invalidated by every applied reversal; callers
    /// re-evaluate lazily as usual.
    pub fn improve(&self, tour: &mut Tour, matrix: &DistanceMatrix) -> bool {
        let n = matrix.size();
        if n < 4 {
            // Fewer than four points admit no crossing edges.
            return false;
        }

        let stride = self.budget.stride.max(1);
        let mut checks = 0usize;
        let mut improved_any = false;

        for _ in 0..self.budget.max_passes {
            let mut improved_pass = false;

            // Edge k connects positions k and k+1 of the closed order; the
            // last usable j is n-1 so that j+1 stays inside the order.
            let mut i = 0;
            while i + 2 < n {
                let mut j = i + 2;
                while j < n {
                    if checks >= self.budget.max_checks {
                        return improved_any;
                    }
                    checks += 1;

                    let order = tour.order();
                    let removed =
                        matrix.get(order[i], order[i + 1]) + matrix.get(order[j], order[j + 1]);
                    let replaced =
                        matrix.get(order[i], order[j]) + matrix.get(order[i + 1], order[j + 1]);

                    if removed - replaced > IMPROVEMENT_EPSILON {
                        tour.reverse_segment(i + 1, j);
                        improved_pass = true;
                        improved_any = true;
                    }
                    j += stride;
                }
                i += stride;
            }

            if !improved_pass {
                break;
            }
            trace!(checks, "2-opt pass applied improvements");
        }

        improved_any
    }
}
