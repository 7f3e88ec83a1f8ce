//! # Population
//!
//! An ordered collection of tours, kept sorted ascending by length after
//! every generation. Duplicate interiors are suppressed through a hash of
//! the interior sequence, so membership checks stay O(1) per candidate
//! instead of an O(N) comparison against every member (a deliberate
//! collision-tolerant shortcut).

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use tracing::debug;

use crate::error::Result;
use crate::construction::nearest_neighbor_tour;
use crate::ga::config::GaConfig;
use crate::local_search::TwoOpt;
use crate::matrix::DistanceMatrix;
use crate::rng::RandomNumberGenerator;
use crate::tour::Tour;

/// A population of tours with hash-based duplicate suppression.
#[derive(Debug, Clone)]
pub struct Population {
    tours: Vec<Tour>,
    interior_hashes: HashSet<u64>,
}

/// Hashes a tour's interior ordering.
fn interior_hash(tour: &Tour) -> u64 {
    let mut hasher = DefaultHasher::new();
    tour.interior().hash(&mut hasher);
    hasher.finish()
}

impl Population {
    /// Creates an empty population with room for `capacity` tours.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tours: Vec::with_capacity(capacity),
            interior_hashes: HashSet::with_capacity(capacity),
        }
    }

    /// Seeds the initial population: one nearest-neighbor tour (refined with
    /// 2-opt when the configuration allows it), the rest uniformly random
    /// permutations. The result is sorted ascending by length.
    pub fn seed(
        matrix: &DistanceMatrix,
        config: &GaConfig,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self> {
        let mut population = Self::with_capacity(config.population_size);

        let mut seed_tour = nearest_neighbor_tour(matrix)?;
        if config.two_opt_enabled {
            TwoOpt::for_point_count(matrix.size()).improve(&mut seed_tour, matrix);
        }
        population.push_unique(seed_tour);

        while population.len() < config.population_size {
            let mut accepted = false;
            for _ in 0..config.duplicate_retry_limit {
                let candidate = Tour::random(matrix.size(), rng)?;
                if population.push_unique(candidate) {
                    accepted = true;
                    break;
                }
            }
            if !accepted {
                // Tiny instances run out of distinct permutations; pad with
                // a duplicate so the population reaches its configured size.
                population.push(Tour::random(matrix.size(), rng)?);
            }
        }

        population.sort_by_length(matrix);
        debug!(
            size = population.len(),
            best = population.tours[0].cached_length(),
            "population seeded"
        );
        Ok(population)
    }

    /// Returns the number of tours.
    pub fn len(&self) -> usize {
        self.tours.len()
    }

    /// Returns `true` if the population holds no tours.
    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    /// Returns the tours in their current order.
    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    /// Returns the shortest tour. Meaningful after [`sort_by_length`].
    ///
    /// [`sort_by_length`]: Population::sort_by_length
    pub fn best(&self) -> Option<&Tour> {
        self.tours.first()
    }

    /// Returns owned copies of the `count` best tours, for comparative
    /// display by an external collaborator.
    pub fn snapshots(&self, count: usize) -> Vec<Tour> {
        self.tours.iter().take(count).cloned().collect()
    }

    /// Returns `true` if a tour with the same interior ordering (by hash) is
    /// already present.
    pub fn contains_interior(&self, tour: &Tour) -> bool {
        self.interior_hashes.contains(&interior_hash(tour))
    }

    /// Adds a tour unless its interior duplicates an existing member.
    /// Returns `true` if the tour was added.
    pub fn push_unique(&mut self, tour: Tour) -> bool {
        if self.interior_hashes.insert(interior_hash(&tour)) {
            self.tours.push(tour);
            true
        } else {
            false
        }
    }

    /// Adds a tour unconditionally, bypassing duplicate suppression.
    pub fn push(&mut self, tour: Tour) {
        self.interior_hashes.insert(interior_hash(&tour));
        self.tours.push(tour);
    }

    /// Evaluates every tour against the matrix and sorts ascending by
    /// length. Cached lengths are reused where still valid.
    pub fn sort_by_length(&mut self, matrix: &DistanceMatrix) {
        for tour in &mut self.tours {
            tour.length(matrix);
        }
        self.tours.sort_by(|a, b| {
            let la = a.cached_length().unwrap_or(f64::INFINITY);
            let lb = b.cached_length().unwrap_or(f64::INFINITY);
            la.total_cmp(&lb)
        });
    }

    /// Returns the cached length of every tour in order. Meaningful after
    /// [`sort_by_length`].
    ///
    /// [`sort_by_length`]: Population::sort_by_length
    pub fn lengths(&self) -> Vec<f64> {
        self.tours
            .iter()
            .map(|t| t.cached_length().unwrap_or(f64::INFINITY))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{Point, PointSet};

    fn matrix_for(count: usize) -> DistanceMatrix {
        let points = (0..count)
            .map(|i| {
                Point::new(
                    i.to_string(),
                    (i * 37 % 101) as f64,
                    (i * 73 % 89) as f64,
                )
            })
            .collect();
        DistanceMatrix::build(&PointSet::from_points(points).unwrap()).unwrap()
    }

    #[test]
    fn test_seed_fills_population_with_valid_tours() {
        let matrix = matrix_for(12);
        let config = GaConfig::for_point_count(12);
        let mut rng = RandomNumberGenerator::from_seed(8);

        let population = Population::seed(&matrix, &config, &mut rng).unwrap();

        assert_eq!(population.len(), config.population_size);
        for tour in population.tours() {
            assert!(tour.validate(12).is_ok());
        }
    }

    #[test]
    fn test_seed_is_sorted_ascending() {
        let matrix = matrix_for(15);
        let config = GaConfig::for_point_count(15);
        let mut rng = RandomNumberGenerator::from_seed(8);

        let population = Population::seed(&matrix, &config, &mut rng).unwrap();
        let lengths = population.lengths();

        for pair in lengths.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_seed_handles_tiny_instances() {
        // 3 points have only two distinct interiors; padding must still
        // reach the configured population size.
        let matrix = matrix_for(3);
        let config = GaConfig::for_point_count(3);
        let mut rng = RandomNumberGenerator::from_seed(8);

        let population = Population::seed(&matrix, &config, &mut rng).unwrap();
        assert_eq!(population.len(), config.population_size);
    }

    #[test]
    fn test_push_unique_rejects_duplicate_interior() {
        let mut population = Population::with_capacity(4);
        let tour = Tour::from_interior(vec![2, 1, 3], 4).unwrap();

        assert!(population.push_unique(tour.clone()));
        assert!(!population.push_unique(tour.clone()));
        assert!(population.contains_interior(&tour));
        assert_eq!(population.len(), 1);
    }

    #[test]
    fn test_snapshots_are_owned_copies() {
        let matrix = matrix_for(8);
        let config = GaConfig::for_point_count(8);
        let mut rng = RandomNumberGenerator::from_seed(8);
        let population = Population::seed(&matrix, &config, &mut rng).unwrap();

        let snapshots = population.snapshots(3);
        assert_eq!(snapshots.len(), 3);
        assert_eq!(snapshots[0].order(), population.best().unwrap().order());
    }
}
