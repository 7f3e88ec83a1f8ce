use std::thread;
use std::time::Duration;

use tspga::{
    matrix::DistanceMatrix,
    point::PointSet,
    rng::RandomNumberGenerator,
    runner::{
        ProgressEvent, ProgressSink, RunController, RunOptions, TerminationReason, TourSnapshot,
    },
};

fn random_instance(count: usize, seed: u64) -> DistanceMatrix {
    let mut rng = RandomNumberGenerator::from_seed(seed);
    let points = PointSet::generate_random(count, &mut rng).unwrap();
    DistanceMatrix::build(&points).unwrap()
}

#[derive(Default)]
struct RecordingSink {
    events: Vec<ProgressEvent>,
    snapshots: Vec<(TourSnapshot, Vec<TourSnapshot>)>,
}

impl ProgressSink for RecordingSink {
    fn on_progress(&mut self, event: &ProgressEvent) {
        self.events.push(event.clone());
    }

    fn on_best(&mut self, best: &TourSnapshot, secondary: &[TourSnapshot]) {
        self.snapshots.push((best.clone(), secondary.to_vec()));
    }
}

#[test]
fn test_report_matches_final_event() {
    let matrix = random_instance(15, 1);
    let options = RunOptions::builder().iteration_cap(30).seed(2).build();
    let controller = RunController::new(&matrix, options);
    let mut sink = RecordingSink::default();

    let report = controller.run(&mut sink).unwrap();

    assert_eq!(report.reason, TerminationReason::IterationCap);
    let last = sink.events.last().unwrap();
    assert_eq!(last.iteration, report.iterations);
    assert_eq!(last.best_iteration, report.best_iteration);
    assert_eq!(last.best_length, report.best.length);
}

#[test]
fn test_best_snapshots_are_closed_tours() {
    let matrix = random_instance(12, 3);
    let options = RunOptions::builder().iteration_cap(40).seed(4).build();
    let controller = RunController::new(&matrix, options);
    let mut sink = RecordingSink::default();

    controller.run(&mut sink).unwrap();

    assert!(!sink.snapshots.is_empty());
    for (best, secondary) in &sink.snapshots {
        assert_eq!(best.order.first(), Some(&0));
        assert_eq!(best.order.last(), Some(&0));
        assert_eq!(best.order.len(), 13);
        for tour in secondary {
            assert_eq!(tour.order.len(), 13);
        }
    }
}

#[test]
fn test_cancellation_from_another_thread() {
    let matrix = random_instance(60, 5);
    // A generous cap and timeout: only cancellation can stop this run early.
    let options = RunOptions::builder()
        .iteration_cap(usize::MAX)
        .timeout(Duration::from_secs(600))
        .seed(6)
        .build();
    let controller = RunController::new(&matrix, options);
    let token = controller.cancel_token();

    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        token.cancel();
    });

    let mut sink = RecordingSink::default();
    let report = controller.run(&mut sink).unwrap();
    canceller.join().unwrap();

    assert_eq!(report.reason, TerminationReason::Cancelled);
    assert!(report.best.length > 0.0);
}

#[test]
fn test_snapshot_outlives_the_run() {
    // The snapshot handed to the sink is an owned copy; it must stay intact
    // after the run (and the optimizer's population) is gone.
    let first_snapshot;
    {
        let matrix = random_instance(10, 8);
        let options = RunOptions::builder().iteration_cap(10).seed(9).build();
        let controller = RunController::new(&matrix, options);
        let mut sink = RecordingSink::default();
        controller.run(&mut sink).unwrap();
        first_snapshot = sink.snapshots.remove(0).0;
    }

    assert_eq!(first_snapshot.order.first(), Some(&0));
    assert!(first_snapshot.length.is_finite());
}

#[test]
fn test_iteration_cap_override_beats_adaptive_default() {
    let matrix = random_instance(10, 11);
    let options = RunOptions::builder().iteration_cap(3).seed(12).build();
    let controller = RunController::new(&matrix, options);

    let report = controller.run(&mut RecordingSink::default()).unwrap();
    assert_eq!(report.iterations, 3);
}
