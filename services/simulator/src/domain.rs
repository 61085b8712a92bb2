use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Result, SimulationError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Coin {
    Head,
    Tail,
}

impl Coin {
    pub fn from_bool(is_head: bool) -> Self {
        if is_head {
            Coin::Head
        } else {
            Coin::Tail
        }
    }

    pub fn is_head(self) -> bool {
        self == Coin::Head
    }

    /// Step of the running sum: +1 for a head, -1 for a tail
    pub fn step(self) -> i64 {
        match self {
            Coin::Head => 1,
            Coin::Tail => -1,
        }
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Coin::Head => write!(f, "HEAD"),
            Coin::Tail => write!(f, "TAIL"),
        }
    }
}

/// Counters of a simulation at one observation point.
///
/// Only the head side is stored; the tail side is always derived from
/// `completed_tosses`, so `head + tail == completed` holds by construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TossStatistics {
    pub target_tosses: u64,
    pub completed_tosses: u64,
    pub head_count: u64,
    pub head_lead_time: u64,
}

impl TossStatistics {
    pub fn new(target_tosses: u64) -> Self {
        Self {
            target_tosses,
            completed_tosses: 0,
            head_count: 0,
            head_lead_time: 0,
        }
    }

    pub fn tail_count(&self) -> u64 {
        self.completed_tosses - self.head_count
    }

    pub fn tail_lead_time(&self) -> u64 {
        self.completed_tosses - self.head_lead_time
    }

    /// Fails with [`SimulationError::DivisionUndefined`] before the first toss.
    pub fn head_lead_fraction(&self) -> Result<f64> {
        self.fraction_of_completed(self.head_lead_time)
    }

    /// Fails with [`SimulationError::DivisionUndefined`] before the first toss.
    pub fn tail_lead_fraction(&self) -> Result<f64> {
        self.fraction_of_completed(self.tail_lead_time())
    }

    /// Heads minus tails so far
    pub fn running_sum(&self) -> i64 {
        self.head_count as i64 - self.tail_count() as i64
    }

    fn fraction_of_completed(&self, value: u64) -> Result<f64> {
        if self.completed_tosses == 0 {
            return Err(SimulationError::DivisionUndefined);
        }
        Ok(value as f64 / self.completed_tosses as f64)
    }
}

/// Payload delivered to observers once per toss
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TossEvent {
    /// 1-based position of the toss in the run
    pub index: u64,
    pub coin: Coin,
    /// Counters including this toss
    pub statistics: TossStatistics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub seed: Option<u64>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub cancelled: bool,
    pub statistics: TossStatistics,
    pub head_lead_fraction: Option<f64>,
    pub tail_lead_fraction: Option<f64>,
    pub axis_crossings: usize,
    pub final_value: i64,
}

impl RunReport {
    pub fn new(
        run_id: Uuid,
        seed: Option<u64>,
        started_at: DateTime<Utc>,
        statistics: TossStatistics,
        cancelled: bool,
        axis_crossings: usize,
    ) -> Self {
        Self {
            run_id,
            seed,
            started_at,
            finished_at: Utc::now(),
            cancelled,
            statistics,
            head_lead_fraction: statistics.head_lead_fraction().ok(),
            tail_lead_fraction: statistics.tail_lead_fraction().ok(),
            axis_crossings,
            final_value: statistics.running_sum(),
        }
    }
}
