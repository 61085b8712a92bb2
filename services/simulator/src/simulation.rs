//! Coin toss simulation with lead-time bookkeeping
//!
//! Counts, for every toss, which side holds the running majority. A toss that
//! brings the counts level is credited to whichever side was ahead right
//! before it, so the "heads leading" flag is carried from toss to toss.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, trace};

use crate::coin_source::{CoinSource, RandomCoin, ReplayCoins};
use crate::domain::{Coin, TossEvent, TossStatistics};
use crate::errors::{Result, SimulationError};

/// Receives every toss, in order, before the next toss is drawn
pub trait TossObserver: Send {
    fn on_toss(&mut self, event: &TossEvent);
}

impl<T: TossObserver> TossObserver for Arc<Mutex<T>> {
    fn on_toss(&mut self, event: &TossEvent) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_toss(event);
    }
}

struct FnObserver<F>(F);

impl<F> TossObserver for FnObserver<F>
where
    F: FnMut(&TossEvent) + Send,
{
    fn on_toss(&mut self, event: &TossEvent) {
        (self.0)(event)
    }
}

/// Cancellation signal shared between a simulation and its controllers
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    cancelled: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

pub struct TossSimulation<S = RandomCoin> {
    statistics: TossStatistics,
    heads_leading: bool,
    source: S,
    stop: StopHandle,
    observers: Vec<Box<dyn TossObserver>>,
    has_run: bool,
}

impl TossSimulation<RandomCoin> {
    /// Create a simulation of `target_tosses` fair tosses.
    ///
    /// With a seed the outcome sequence is reproducible; without one the
    /// generator is seeded from OS entropy.
    pub fn new(target_tosses: u64, seed: Option<u64>) -> Result<Self> {
        let source = match seed {
            Some(seed) => RandomCoin::seeded(seed),
            None => RandomCoin::from_entropy(),
        };
        Self::with_source(target_tosses, source)
    }
}

impl TossSimulation<ReplayCoins> {
    /// Replay a recorded outcome sequence, one toss per outcome
    pub fn replay(outcomes: Vec<Coin>) -> Result<Self> {
        let coins = ReplayCoins::new(outcomes)?;
        Self::with_source(coins.len() as u64, coins)
    }
}

impl<S: CoinSource> TossSimulation<S> {
    pub fn with_source(target_tosses: u64, source: S) -> Result<Self> {
        if target_tosses < 1 {
            return Err(SimulationError::InvalidConfiguration(
                "number of tosses must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            statistics: TossStatistics::new(target_tosses),
            heads_leading: true,
            source,
            stop: StopHandle::default(),
            observers: Vec::new(),
            has_run: false,
        })
    }

    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: TossObserver + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn subscribe_fn<F>(&mut self, callback: F)
    where
        F: FnMut(&TossEvent) + Send + 'static,
    {
        self.subscribe(FnObserver(callback));
    }

    /// Toss until the target is reached or a stop is observed.
    ///
    /// Cancellation is checked before each toss, so a stop requested during
    /// a notification ends the run after that toss. A simulation runs once.
    pub fn run(&mut self) -> Result<TossStatistics> {
        if self.has_run {
            return Err(SimulationError::AlreadyRun);
        }
        self.has_run = true;

        debug!(
            target_tosses = self.statistics.target_tosses,
            observers = self.observers.len(),
            "Simulation starting"
        );

        while self.statistics.completed_tosses < self.statistics.target_tosses {
            if self.stop.is_stopped() {
                break;
            }

            let coin = self.source.toss();
            self.record(coin);

            let event = TossEvent {
                index: self.statistics.completed_tosses,
                coin,
                statistics: self.statistics,
            };

            trace!(
                index = event.index,
                coin = %coin,
                head_lead_time = self.statistics.head_lead_time,
                "Toss recorded"
            );

            for observer in &mut self.observers {
                observer.on_toss(&event);
            }
        }

        let stats = self.statistics;
        if stats.completed_tosses < stats.target_tosses {
            info!(
                completed_tosses = stats.completed_tosses,
                target_tosses = stats.target_tosses,
                head_count = stats.head_count,
                head_lead_time = stats.head_lead_time,
                "Simulation cancelled"
            );
        } else {
            info!(
                completed_tosses = stats.completed_tosses,
                head_count = stats.head_count,
                head_lead_time = stats.head_lead_time,
                "Simulation completed"
            );
        }

        Ok(stats)
    }

    fn record(&mut self, coin: Coin) {
        let stats = &mut self.statistics;
        stats.completed_tosses += 1;

        match coin {
            Coin::Head => {
                stats.head_count += 1;
                let tails = stats.tail_count();

                if stats.head_count > tails {
                    stats.head_lead_time += 1;
                    self.heads_leading = true;
                } else if stats.head_count == tails && self.heads_leading {
                    // Level again, but heads was ahead going into the tie
                    stats.head_lead_time += 1;
                }
            }
            Coin::Tail => {
                let tails = stats.tail_count();

                if tails > stats.head_count {
                    self.heads_leading = false;
                } else {
                    // Heads is still ahead or was ahead just before the tie
                    stats.head_lead_time += 1;
                }
            }
        }
    }
}

impl<S> TossSimulation<S> {
    /// Request cancellation; idempotent
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.stop.is_stopped()
    }

    pub fn statistics(&self) -> TossStatistics {
        self.statistics
    }

    pub fn target_tosses(&self) -> u64 {
        self.statistics.target_tosses
    }

    pub fn completed_tosses(&self) -> u64 {
        self.statistics.completed_tosses
    }

    pub fn head_count(&self) -> u64 {
        self.statistics.head_count
    }

    pub fn tail_count(&self) -> u64 {
        self.statistics.tail_count()
    }

    pub fn head_lead_time_absolute(&self) -> u64 {
        self.statistics.head_lead_time
    }

    pub fn head_lead_time_relative(&self) -> Result<f64> {
        self.statistics.head_lead_fraction()
    }

    pub fn tail_lead_time_absolute(&self) -> u64 {
        self.statistics.tail_lead_time()
    }

    pub fn tail_lead_time_relative(&self) -> Result<f64> {
        self.statistics.tail_lead_fraction()
    }
}

impl<S> std::fmt::Debug for TossSimulation<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TossSimulation")
            .field("statistics", &self.statistics)
            .field("heads_leading", &self.heads_leading)
            .field("cancelled", &self.is_cancelled())
            .field("observers", &self.observers.len())
            .field("has_run", &self.has_run)
            .finish()
    }
}
