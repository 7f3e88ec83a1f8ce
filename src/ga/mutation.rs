//! # Mutation Operators
//!
//! Two mutation operators over tours: a swap of two random interior
//! positions, and an optional budgeted 2-opt pass treated as a heavyweight
//! mutation for instances small enough to afford it. Both preserve tour
//! validity structurally and invalidate the cached length through the tour's
//! own mutators.

use crate::local_search::TwoOpt;
use crate::matrix::DistanceMatrix;
use crate::rng::RandomNumberGenerator;
use crate::tour::Tour;

/// Swaps two distinct random interior positions of the tour.
///
/// Tours with fewer than two interior points have nothing to swap and are
/// left untouched.
pub fn swap_mutation(tour: &mut Tour, rng: &mut RandomNumberGenerator) {
    let interior_len = tour.interior().len();
    if interior_len < 2 {
        return;
    }

    let a = rng.gen_index(interior_len);
    let mut b = rng.gen_index(interior_len - 1);
    if b >= a {
        b += 1;
    }
    tour.swap_interior(a, b);
}

/// Applies one budgeted 2-opt pass as a mutation operator.
///
/// Returns `true` if the tour improved. The caller gates this on the
/// configured probability and on the adaptive table's 2-opt eligibility.
pub fn two_opt_mutation(tour: &mut Tour, matrix: &DistanceMatrix, two_opt: &TwoOpt) -> bool {
    two_opt.improve(tour, matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::TwoOptBudget;
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
    fn test_swap_mutation_keeps_tour_valid() {
        let mut rng = RandomNumberGenerator::from_seed(17);
        let mut tour = Tour::identity(10).unwrap();

        for _ in 0..50 {
            swap_mutation(&mut tour, &mut rng);
            assert!(tour.validate(10).is_ok());
        }
    }

    #[test]
    fn test_swap_mutation_changes_interior() {
        let mut rng = RandomNumberGenerator::from_seed(17);
        let mut tour = Tour::identity(10).unwrap();
        let before = tour.interior().to_vec();

        swap_mutation(&mut tour, &mut rng);

        // Exactly two interior positions differ after a swap.
        let differing = tour
            .interior()
            .iter()
            .zip(&before)
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(differing, 2);
    }

    #[test]
    fn test_swap_mutation_invalidates_cache() {
        let matrix = matrix_for(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let mut rng = RandomNumberGenerator::from_seed(1);
        let mut tour = Tour::identity(4).unwrap();
        tour.length(&matrix);

        swap_mutation(&mut tour, &mut rng);
        assert_eq!(tour.cached_length(), None);
    }

    #[test]
    fn test_swap_mutation_noop_on_tiny_tours() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let mut tour = Tour::identity(2).unwrap();
        let before = tour.order().to_vec();

        swap_mutation(&mut tour, &mut rng);
        assert_eq!(tour.order(), &before[..]);
    }

    #[test]
    fn test_two_opt_mutation_never_worsens() {
        let coords: Vec<(f64, f64)> = (0..20)
            .map(|i| ((i * 71 % 53) as f64, (i * 113 % 47) as f64))
            .collect();
        let matrix = matrix_for(&coords);
        let mut rng = RandomNumberGenerator::from_seed(3);
        let mut tour = Tour::random(20, &mut rng).unwrap();
        let before = tour.recompute_length(&matrix);

        let two_opt = TwoOpt::new(TwoOptBudget::exhaustive());
        two_opt_mutation(&mut tour, &matrix, &two_opt);

        assert!(tour.validate(20).is_ok());
        assert!(tour.recompute_length(&matrix) <= before + 1e-9);
    }
}
