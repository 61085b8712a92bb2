/// Integration tests for background runs and cooperative cancellation
mod common;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use common::assert_invariants;
use simulator::{LeadChart, SimulationWorker, TossSimulation};

const HUGE_RUN: u64 = 1_000_000_000;

#[tokio::test]
async fn test_stop_running_worker() {
    let mut simulation = TossSimulation::new(HUGE_RUN, Some(17)).unwrap();

    let notified = Arc::new(AtomicU64::new(0));
    let counter = notified.clone();
    simulation.subscribe_fn(move |event| {
        // Notifications arrive in toss order, one per toss
        let previous = counter.fetch_add(1, Ordering::SeqCst);
        assert_eq!(event.index, previous + 1);
    });

    let handle = SimulationWorker::spawn(simulation);

    while notified.load(Ordering::SeqCst) == 0 {
        sleep(Duration::from_millis(1)).await;
    }
    handle.stop();
    handle.stop();

    let simulation = handle.join().await.expect("worker failed");

    assert!(simulation.is_cancelled());
    assert!(simulation.completed_tosses() >= 1);
    assert!(simulation.completed_tosses() < HUGE_RUN);
    assert_eq!(notified.load(Ordering::SeqCst), simulation.completed_tosses());
    assert_invariants(&simulation.statistics());
    assert!(simulation.head_lead_time_relative().is_ok());
}

#[tokio::test]
async fn test_stop_handle_from_another_task() {
    let simulation = TossSimulation::new(HUGE_RUN, None).unwrap();
    let handle = SimulationWorker::spawn(simulation);
    let stop = handle.stop_handle();

    let stopper = tokio::spawn(async move {
        sleep(Duration::from_millis(20)).await;
        stop.stop();
    });

    let simulation = handle.join().await.expect("worker failed");
    stopper.await.unwrap();

    assert!(simulation.completed_tosses() < HUGE_RUN);
    assert_invariants(&simulation.statistics());
}

#[tokio::test]
async fn test_shared_chart_readable_after_join() {
    let chart = Arc::new(Mutex::new(LeadChart::new()));
    let mut simulation = TossSimulation::new(5_000, Some(23)).unwrap();
    simulation.subscribe(chart.clone());

    let handle = SimulationWorker::spawn(simulation);
    let simulation = handle.join().await.expect("worker failed");

    let chart = chart.lock().unwrap();
    let stats = simulation.statistics();
    assert_eq!(chart.tosses(), stats.completed_tosses);
    assert_eq!(chart.current_value(), stats.running_sum());

    // Segments are chained: each one starts on the axis where the previous ended
    let segments = chart.segments();
    assert_eq!(segments[0].points[0], (0, 0));
    for pair in segments.windows(2) {
        let end = *pair[0].points.last().unwrap();
        assert_eq!(end.1, 0);
        assert_eq!(pair[1].points[0], end);
    }
    let drawn: usize = segments.iter().map(|s| s.points.len() - 1).sum();
    assert_eq!(drawn as u64, stats.completed_tosses);
}
