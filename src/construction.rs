//! # Nearest-Neighbor Construction
//!
//! Builds an initial tour by repeatedly visiting the closest unvisited point.
//! The unvisited set is an ordered index list and the scan only walks the
//! remaining entries, so the whole construction is O(N²) with a stable
//! first-found tie-break: identical runs always produce identical tours.

use tracing::debug;

use crate::error::{Result, TspError};
use crate::matrix::DistanceMatrix;
use crate::tour::Tour;

/// Builds a tour by the nearest-neighbor heuristic, starting and ending at
/// index 0.
///
/// At every step the closest member of the remaining unvisited list is
/// chosen; ties go to the earliest index in the list, which keeps the output
/// deterministic for a given matrix.
///
/// # Errors
///
/// Returns [`TspError::EmptyPointSet`] if the matrix is empty (which
/// [`DistanceMatrix::build`] already prevents).
pub fn nearest_neighbor_tour(matrix: &DistanceMatrix) -> Result<Tour> {
    let n = matrix.size();
    if n == 0 {
        return Err(TspError::EmptyPointSet);
    }

    // Ascending index order makes the tie-break reproducible.
    let mut unvisited: Vec<usize> = (1..n).collect();
    let mut interior = Vec::with_capacity(n.saturating_sub(1));
    let mut current = 0;

    while !unvisited.is_empty() {
        let mut best_pos = 0;
        let mut best_distance = matrix.get(current, unvisited[0]);

        for (pos, &candidate) in unvisited.iter().enumerate().skip(1) {
            let distance = matrix.get(current, candidate);
            if distance < best_distance {
                best_distance = distance;
                best_pos = pos;
            }
        }

        current = unvisited.remove(best_pos);
        interior.push(current);
    }

    let tour = Tour::from_interior(interior, n)?;
    debug!(points = n, "nearest-neighbor tour constructed");
    Ok(tour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{Point, PointSet};

    fn matrix_for(coords: &[(f64, f64)]) -> DistanceMatrix {
        let points = coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Point::new(i.to_string(), x, y))
            .collect();
        DistanceMatrix::build(&PointSet::from_points(points).unwrap()).unwrap()
    }

    #[test]
    fn test_square_finds_perimeter() {
        // 4 corners of a 10x10 square: the perimeter of length 40 is optimal
        // and nearest-neighbor from 0 must find it exactly.
        let matrix = matrix_for(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
        let mut tour = nearest_neighbor_tour(&matrix).unwrap();

        assert!(tour.validate(4).is_ok());
        assert_eq!(tour.length(&matrix), 40.0);
    }

    #[test]
    fn test_single_point() {
        let matrix = matrix_for(&[(5.0, 5.0)]);
        let mut tour = nearest_neighbor_tour(&matrix).unwrap();

        assert_eq!(tour.order(), &[0, 0]);
        assert_eq!(tour.length(&matrix), 0.0);
    }

    #[test]
    fn test_collinear_points_visited_in_order() {
        let matrix = matrix_for(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let tour = nearest_neighbor_tour(&matrix).unwrap();

        assert_eq!(tour.order(), &[0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_duplicate_points_do_not_break_construction() {
        let matrix = matrix_for(&[(0.0, 0.0), (2.0, 2.0), (2.0, 2.0), (5.0, 0.0)]);
        let tour = nearest_neighbor_tour(&matrix).unwrap();

        assert!(tour.validate(4).is_ok());
        // Tie between the duplicates goes to the lower index.
        assert_eq!(tour.order()[1], 1);
        assert_eq!(tour.order()[2], 2);
    }

    #[test]
    fn test_construction_is_deterministic() {
        let coords: Vec<(f64, f64)> = (0..10)
            .map(|i| ((i * 37 % 11) as f64, (i * 53 % 13) as f64))
            .collect();
        let matrix = matrix_for(&coords);

        let first = nearest_neighbor_tour(&matrix).unwrap();
        for _ in 0..5 {
            let again = nearest_neighbor_tour(&matrix).unwrap();
            assert_eq!(first.order(), again.order());
        }
    }
}
