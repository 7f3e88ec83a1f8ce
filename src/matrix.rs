//! # Distance Matrix
//!
//! The pairwise Euclidean distance matrix over a [`PointSet`]. Built once per
//! point set and never mutated afterwards; every later cost lookup is a plain
//! indexed read. Construction is the dominant up-front cost at O(N²) time and
//! space, so an explicit capacity guard rejects point counts that would
//! allocate an impractical matrix.
//!
//! ## Example
//!
//! ```rust
//! use tspga::matrix::DistanceMatrix;
//! use tspga::point::{Point, PointSet};
//!
//! let points = PointSet::from_points(vec![
//!     Point::new("0", 0.0, 0.0),
//!     Point::new("1", 3.0, 4.0),
//! ])
//! .unwrap();
//! let matrix = DistanceMatrix::build(&points).unwrap();
//!
//! assert_eq!(matrix.get(0, 1), 5.0);
//! assert_eq!(matrix.get(1, 0), 5.0);
//! ```

use tracing::debug;

use crate::error::{Result, TspError};
use crate::point::PointSet;

/// Upper bound on the point count a matrix may be built for.
///
/// Above this the O(N²) allocation alone exceeds 20 GB; callers that need
/// larger instances need an approximation scheme, not a dense matrix.
pub const MAX_POINTS: usize = 50_000;

/// A symmetric N×N matrix of pairwise Euclidean distances.
///
/// Invariants: `get(i, i) == 0`, `get(i, j) == get(j, i)`, all entries
/// non-negative, and the contents never change after [`build`] returns.
///
/// [`build`]: DistanceMatrix::build
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    distances: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds the distance matrix for a point set.
    ///
    /// Each unordered pair is computed once and mirrored into both halves;
    /// the diagonal stays zero.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::EmptyPointSet`] for an empty set and
    /// [`TspError::Capacity`] when the point count exceeds [`MAX_POINTS`].
    pub fn build(points: &PointSet) -> Result<Self> {
        let n = points.len();
        if n == 0 {
            return Err(TspError::EmptyPointSet);
        }
        if n > MAX_POINTS {
            return Err(TspError::Capacity(format!(
                "point count {} exceeds the {} limit for a dense distance matrix",
                n, MAX_POINTS
            )));
        }

        let mut distances = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points.points()[i].distance_to(&points.points()[j]);
                distances[i * n + j] = d;
                distances[j * n + i] = d;
            }
        }

        debug!(size = n, "distance matrix built");
        Ok(Self { size: n, distances })
    }

    /// Returns the number of points the matrix covers.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the distance between points `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.distances[i * self.size + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    fn square_points() -> PointSet {
        PointSet::from_points(vec![
            Point::new("0", 0.0, 0.0),
            Point::new("1", 0.0, 10.0),
            Point::new("2", 10.0, 10.0),
            Point::new("3", 10.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_matrix_is_symmetric_with_zero_diagonal() {
        let matrix = DistanceMatrix::build(&square_points()).unwrap();

        for i in 0..matrix.size() {
            assert_eq!(matrix.get(i, i), 0.0);
            for j in 0..matrix.size() {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
                assert!(matrix.get(i, j) >= 0.0);
            }
        }
    }

    #[test]
    fn test_matrix_distances() {
        let matrix = DistanceMatrix::build(&square_points()).unwrap();

        assert_eq!(matrix.get(0, 1), 10.0);
        assert_eq!(matrix.get(1, 2), 10.0);
        assert_eq!(matrix.get(0, 2), 200.0_f64.sqrt());
    }

    #[test]
    fn test_single_point_matrix() {
        let points = PointSet::from_points(vec![Point::new("0", 5.0, 5.0)]).unwrap();
        let matrix = DistanceMatrix::build(&points).unwrap();

        assert_eq!(matrix.size(), 1);
        assert_eq!(matrix.get(0, 0), 0.0);
    }

    #[test]
    fn test_duplicate_points_have_zero_distance() {
        let points = PointSet::from_points(vec![
            Point::new("0", 1.0, 1.0),
            Point::new("1", 1.0, 1.0),
            Point::new("2", 4.0, 5.0),
        ])
        .unwrap();
        let matrix = DistanceMatrix::build(&points).unwrap();

        assert_eq!(matrix.get(0, 1), 0.0);
        assert_eq!(matrix.get(1, 2), matrix.get(0, 2));
    }
}
