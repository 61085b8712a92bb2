//! Sources of toss outcomes
//!
//! The simulation only ever asks for one outcome at a time; everything
//! downstream of the draw is deterministic.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::Coin;
use crate::errors::{Result, SimulationError};

pub trait CoinSource: Send {
    fn toss(&mut self) -> Coin;
}

/// Fair coin backed by a pseudo-random generator
#[derive(Debug, Clone)]
pub struct RandomCoin<R = StdRng> {
    rng: R,
}

impl RandomCoin<StdRng> {
    /// Same seed, same outcome sequence
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomCoin<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> CoinSource for RandomCoin<R> {
    fn toss(&mut self) -> Coin {
        Coin::from_bool(self.rng.gen_bool(0.5))
    }
}

/// Replays a recorded, non-empty outcome sequence, starting over once exhausted
#[derive(Debug, Clone)]
pub struct ReplayCoins {
    outcomes: Vec<Coin>,
    position: usize,
}

impl ReplayCoins {
    pub fn new(outcomes: Vec<Coin>) -> Result<Self> {
        if outcomes.is_empty() {
            return Err(SimulationError::InvalidConfiguration(
                "replay needs at least one outcome".to_string(),
            ));
        }

        Ok(Self {
            outcomes,
            position: 0,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.outcomes.len()
    }
}

impl CoinSource for ReplayCoins {
    fn toss(&mut self) -> Coin {
        let coin = self.outcomes[self.position];
        self.position = (self.position + 1) % self.outcomes.len();
        coin
    }
}
