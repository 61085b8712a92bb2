#![allow(dead_code)]
//! Common test utilities for simulator integration tests

use std::sync::{Arc, Mutex};

use simulator::{Coin, TossEvent, TossSimulation, TossStatistics};

/// Observer that keeps every event it receives
pub type EventLog = Arc<Mutex<Vec<TossEvent>>>;

/// Attach an event log to a simulation
pub fn record_events<S: simulator::CoinSource>(simulation: &mut TossSimulation<S>) -> EventLog {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    simulation.subscribe_fn(move |event| sink.lock().unwrap().push(*event));
    log
}

/// Parse a compact outcome string such as "HTTH"
pub fn coins(pattern: &str) -> Vec<Coin> {
    pattern
        .chars()
        .map(|c| match c {
            'H' | 'h' => Coin::Head,
            'T' | 't' => Coin::Tail,
            other => panic!("unexpected outcome character {:?}", other),
        })
        .collect()
}

/// Check the counter invariants that must hold at any observation point
pub fn assert_invariants(stats: &TossStatistics) {
    assert!(stats.completed_tosses <= stats.target_tosses);
    assert!(stats.head_count <= stats.completed_tosses);
    assert!(stats.head_lead_time <= stats.completed_tosses);
    assert_eq!(stats.head_count + stats.tail_count(), stats.completed_tosses);
    assert_eq!(
        stats.head_lead_time + stats.tail_lead_time(),
        stats.completed_tosses
    );
}
