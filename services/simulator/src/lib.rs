// Library interface for the simulator - exposes modules for testing

pub mod chart;
pub mod coin_source;
pub mod config;
pub mod domain;
pub mod errors;
pub mod reporter;
pub mod simulation;
pub mod worker;

pub use chart::{LeadChart, TraceSegment};
pub use coin_source::{CoinSource, RandomCoin, ReplayCoins};
pub use domain::{Coin, RunReport, TossEvent, TossStatistics};
pub use errors::{Result, SimulationError};
pub use reporter::ProgressReporter;
pub use simulation::{StopHandle, TossObserver, TossSimulation};
pub use worker::{SimulationHandle, SimulationWorker};
