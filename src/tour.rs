//! # Tour
//!
//! A [`Tour`] is a closed visiting order over point indices: it starts and
//! ends at index 0 and visits every other index exactly once in between. The
//! total length is cached and the cache is invalidated in the same operation
//! as any interior mutation, so a stale length can never be observed.
//!
//! ## Example
//!
//! ```rust
//! use tspga::matrix::DistanceMatrix;
//! use tspga::point::{Point, PointSet};
//! use tspga::tour::Tour;
//!
//! let points = PointSet::from_points(vec![
//!     Point::new("0", 0.0, 0.0),
//!     Point::new("1", 0.0, 10.0),
//!     Point::new("2", 10.0, 10.0),
//! ])
//! .unwrap();
//! let matrix = DistanceMatrix::build(&points).unwrap();
//!
//! let mut tour = Tour::from_interior(vec![1, 2], matrix.size()).unwrap();
//! assert_eq!(tour.order(), &[0, 1, 2, 0]);
//! let length = tour.length(&matrix);
//! assert!(length > 0.0);
//! ```

use crate::error::{Result, TspError};
use crate::matrix::DistanceMatrix;
use crate::rng::RandomNumberGenerator;

/// A closed tour over point indices, with a lazily cached total length.
///
/// Invariants: the order has length N+1, `order[0] == order[N] == 0`, and the
/// interior `order[1..N]` is a permutation of `1..N`. Every mutating method
/// preserves these structurally and invalidates the cached length.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    order: Vec<usize>,
    cached_length: Option<f64>,
}

impl Tour {
    /// Builds a closed tour from an interior ordering of `1..point_count`.
    ///
    /// The start index 0 is prepended and appended; the interior is taken
    /// as-is.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::InvalidTour`] if the interior is not a permutation
    /// of `1..point_count`.
    pub fn from_interior(interior: Vec<usize>, point_count: usize) -> Result<Self> {
        let mut order = Vec::with_capacity(interior.len() + 2);
        order.push(0);
        order.extend(interior);
        order.push(0);

        let tour = Self {
            order,
            cached_length: None,
        };
        tour.validate(point_count)?;
        Ok(tour)
    }

    /// Builds the trivial closed tour `[0, 1, ..., N-1, 0]`.
    ///
    /// For N = 1 this is `[0, 0]` with length zero.
    pub fn identity(point_count: usize) -> Result<Self> {
        if point_count == 0 {
            return Err(TspError::EmptyPointSet);
        }
        Self::from_interior((1..point_count).collect(), point_count)
    }

    /// Builds a tour with a uniformly random interior ordering.
    ///
    /// Uses an unbiased Fisher-Yates shuffle of `1..point_count`.
    pub fn random(point_count: usize, rng: &mut RandomNumberGenerator) -> Result<Self> {
        if point_count == 0 {
            return Err(TspError::EmptyPointSet);
        }
        let mut interior: Vec<usize> = (1..point_count).collect();
        rng.shuffle(&mut interior);
        Self::from_interior(interior, point_count)
    }

    /// Checks the structural invariants against a point count.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::InvalidTour`] naming the first violated invariant.
    pub fn validate(&self, point_count: usize) -> Result<()> {
        if self.order.len() != point_count + 1 {
            return Err(TspError::InvalidTour(format!(
                "expected order length {}, found {}",
                point_count + 1,
                self.order.len()
            )));
        }
        if self.order[0] != 0 || self.order[point_count] != 0 {
            return Err(TspError::InvalidTour(
                "tour must start and end at index 0".to_string(),
            ));
        }

        let mut seen = vec![false; point_count];
        for &index in &self.order[1..point_count] {
            if index == 0 || index >= point_count {
                return Err(TspError::InvalidTour(format!(
                    "interior index {} out of range 1..{}",
                    index, point_count
                )));
            }
            if seen[index] {
                return Err(TspError::InvalidTour(format!(
                    "interior index {} appears more than once",
                    index
                )));
            }
            seen[index] = true;
        }
        Ok(())
    }

    /// Returns the full closed visiting order, including both endpoints.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Returns the interior of the tour (everything between the endpoints).
    pub fn interior(&self) -> &[usize] {
        &self.order[1..self.order.len() - 1]
    }

    /// Returns the cached length, if the tour has been evaluated since its
    /// last mutation.
    pub fn cached_length(&self) -> Option<f64> {
        self.cached_length
    }

    /// Returns the total length, computing and caching it if necessary.
    pub fn length(&mut self, matrix: &DistanceMatrix) -> f64 {
        match self.cached_length {
            Some(length) => length,
            None => {
                let length = self.recompute_length(matrix);
                self.cached_length = Some(length);
                length
            }
        }
    }

    /// Recomputes the total length from scratch: the sum of consecutive
    /// matrix lookups along the closed order. Pure; does not touch the cache.
    pub fn recompute_length(&self, matrix: &DistanceMatrix) -> f64 {
        self.order
            .windows(2)
            .map(|pair| matrix.get(pair[0], pair[1]))
            .sum()
    }

    /// Swaps two interior positions (0-based within the interior) and
    /// invalidates the cached length.
    ///
    /// # Panics
    ///
    /// Panics if either position is outside the interior.
    pub fn swap_interior(&mut self, a: usize, b: usize) {
        let len = self.order.len();
        assert!(a < len - 2 && b < len - 2, "interior position out of range");
        self.order.swap(a + 1, b + 1);
        self.cached_length = None;
    }

    /// Reverses the closed-order segment `from..=to` and invalidates the
    /// cached length. Positions index into the full order; the endpoints at
    /// position 0 and N must not be included.
    ///
    /// This is the 2-opt primitive: reversing a segment exchanges the two
    /// edges at its boundary without changing which points are visited.
    ///
    /// # Panics
    ///
    /// Panics if the range touches either fixed endpoint or `from > to`.
    pub fn reverse_segment(&mut self, from: usize, to: usize) {
        assert!(from >= 1 && to <= self.order.len() - 2, "segment touches a fixed endpoint");
        assert!(from <= to, "segment bounds reversed");
        self.order[from..=to].reverse();
        self.cached_length = None;
    }

    /// Replaces the interior ordering wholesale and invalidates the cache.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::InvalidTour`] if the new interior is not a
    /// permutation of `1..N` of the right length. The tour is left untouched
    /// on error.
    pub fn set_interior(&mut self, interior: &[usize]) -> Result<()> {
        let replacement = Self::from_interior(interior.to_vec(), self.order.len() - 1)?;
        self.order = replacement.order;
        self.cached_length = None;
        Ok(())
    }
}
