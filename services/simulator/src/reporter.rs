//! Periodic statistics snapshots taken while a simulation runs

use tracing::info;

use crate::domain::{TossEvent, TossStatistics};
use crate::errors::{Result, SimulationError};
use crate::simulation::TossObserver;

pub const DEFAULT_REPORT_INTERVAL: u64 = 1000;

#[derive(Debug, Clone)]
pub struct ProgressReporter {
    interval: u64,
    counter: u64,
    latest: Option<TossStatistics>,
    history: Vec<TossStatistics>,
}

impl ProgressReporter {
    pub fn new(interval: u64) -> Result<Self> {
        if interval == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "report interval must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            interval,
            counter: 0,
            latest: None,
            history: Vec::new(),
        })
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn latest(&self) -> Option<TossStatistics> {
        self.latest
    }

    pub fn history(&self) -> &[TossStatistics] {
        &self.history
    }

    /// Record the statistics of a finished run, however many tosses it had
    pub fn finish(&mut self, statistics: TossStatistics) {
        self.latest = Some(statistics);
        self.counter = 0;
        log_statistics(&statistics, "Final statistics");
    }

    fn report(&mut self, statistics: TossStatistics) {
        self.latest = Some(statistics);
        self.history.push(statistics);
        log_statistics(&statistics, "Progress");
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REPORT_INTERVAL,
            counter: 0,
            latest: None,
            history: Vec::new(),
        }
    }
}

impl TossObserver for ProgressReporter {
    fn on_toss(&mut self, event: &TossEvent) {
        self.counter += 1;

        if self.counter == self.interval {
            self.counter = 0;
            self.report(event.statistics);
        }
    }
}

fn log_statistics(statistics: &TossStatistics, message: &str) {
    info!(
        completed_tosses = statistics.completed_tosses,
        head_count = statistics.head_count,
        tail_count = statistics.tail_count(),
        head_lead_time = statistics.head_lead_time,
        tail_lead_time = statistics.tail_lead_time(),
        head_lead_percent = statistics.head_lead_fraction().map(|f| f * 100.0).ok(),
        tail_lead_percent = statistics.tail_lead_fraction().map(|f| f * 100.0).ok(),
        "{}",
        message
    );
}
