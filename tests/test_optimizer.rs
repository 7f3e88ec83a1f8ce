use tspga::{
    construction::nearest_neighbor_tour,
    ga::{GaConfig, GeneticOptimizer, OptimizerState},
    matrix::DistanceMatrix,
    point::{Point, PointSet},
    rng::RandomNumberGenerator,
};

fn random_instance(count: usize, seed: u64) -> DistanceMatrix {
    let mut rng = RandomNumberGenerator::from_seed(seed);
    let points = PointSet::generate_random(count, &mut rng).unwrap();
    DistanceMatrix::build(&points).unwrap()
}

#[test]
fn test_optimizer_never_loses_to_its_seed_tour() {
    let matrix = random_instance(25, 40);
    let mut nn_tour = nearest_neighbor_tour(&matrix).unwrap();
    let nn_length = nn_tour.length(&matrix);

    let rng = RandomNumberGenerator::from_seed(41);
    let mut optimizer = GeneticOptimizer::with_adaptive_config(&matrix, rng).unwrap();
    optimizer.initialize().unwrap();
    for _ in 0..50 {
        optimizer.step().unwrap();
    }

    // The population is seeded with the (2-opt refined) nearest-neighbor
    // tour and elitism never drops the best, so the result can only match
    // or beat plain nearest-neighbor.
    assert!(optimizer.best_length() <= nn_length);
}

#[test]
fn test_elitism_makes_best_monotone() {
    let matrix = random_instance(18, 7);
    let rng = RandomNumberGenerator::from_seed(8);
    let mut optimizer = GeneticOptimizer::with_adaptive_config(&matrix, rng).unwrap();
    optimizer.initialize().unwrap();

    let mut best_so_far = optimizer.best_length();
    for _ in 0..60 {
        optimizer.step().unwrap();
        assert!(optimizer.best_length() <= best_so_far);
        best_so_far = optimizer.best_length();
    }
}

#[test]
fn test_every_tour_in_every_generation_is_a_permutation() {
    let matrix = random_instance(12, 13);
    let rng = RandomNumberGenerator::from_seed(14);
    let mut optimizer = GeneticOptimizer::with_adaptive_config(&matrix, rng).unwrap();
    optimizer.initialize().unwrap();

    for _ in 0..25 {
        optimizer.step().unwrap();
        for tour in optimizer.population().tours() {
            tour.validate(12).unwrap();
        }
    }
}

#[test]
fn test_square_instance_converges_to_perimeter() {
    let points = PointSet::from_points(vec![
        Point::new("0", 0.0, 0.0),
        Point::new("1", 0.0, 10.0),
        Point::new("2", 10.0, 10.0),
        Point::new("3", 10.0, 0.0),
    ])
    .unwrap();
    let matrix = DistanceMatrix::build(&points).unwrap();

    let rng = RandomNumberGenerator::from_seed(15);
    let mut optimizer = GeneticOptimizer::with_adaptive_config(&matrix, rng).unwrap();
    optimizer.initialize().unwrap();
    for _ in 0..10 {
        optimizer.step().unwrap();
    }

    assert_eq!(optimizer.best_length(), 40.0);
}

#[test]
fn test_explicit_config_is_honored() {
    let matrix = random_instance(10, 20);
    let config = GaConfig {
        population_size: 8,
        elite_count: 2,
        tournament_size: 3,
        mutation_rate: 0.3,
        crossover_rate: 0.8,
        max_generations: 40,
        two_opt_enabled: false,
        two_opt_mutation_rate: 0.0,
        duplicate_retry_limit: 4,
    };
    let rng = RandomNumberGenerator::from_seed(21);
    let mut optimizer = GeneticOptimizer::new(&matrix, config, rng).unwrap();
    optimizer.initialize().unwrap();

    assert_eq!(optimizer.population().len(), 8);
    optimizer.step().unwrap();
    assert_eq!(optimizer.population().len(), 8);
}

#[test]
fn test_invalid_config_is_rejected_at_construction() {
    let matrix = random_instance(10, 20);
    let mut config = GaConfig::for_point_count(10);
    config.population_size = 1;

    let rng = RandomNumberGenerator::from_seed(21);
    assert!(GeneticOptimizer::new(&matrix, config, rng).is_err());
}

#[test]
fn test_terminated_optimizer_keeps_its_result() {
    let matrix = random_instance(10, 30);
    let rng = RandomNumberGenerator::from_seed(31);
    let mut optimizer = GeneticOptimizer::with_adaptive_config(&matrix, rng).unwrap();
    optimizer.initialize().unwrap();
    optimizer.step().unwrap();

    let best = optimizer.best_tour().unwrap().clone();
    optimizer.terminate();

    assert_eq!(optimizer.state(), OptimizerState::Terminated);
    assert_eq!(optimizer.best_tour().unwrap().order(), best.order());
}
