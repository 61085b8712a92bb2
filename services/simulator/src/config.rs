use anyhow::Context;
use serde::Deserialize;
use std::env;

use crate::errors::SimulationError;
use crate::reporter::DEFAULT_REPORT_INTERVAL;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    pub tosses: u64,
    pub seed: Option<u64>,
    pub report_interval: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub json: bool,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the process environment in `load`)
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tosses = lookup("SIMULATOR_TOSSES")
            .unwrap_or_else(|| "100".to_string())
            .trim()
            .parse::<i64>()
            .context("SIMULATOR_TOSSES must be an integer")?;
        if tosses < 1 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "SIMULATOR_TOSSES must be at least 1, got {}",
                tosses
            ))
            .into());
        }

        let seed = match lookup("SIMULATOR_SEED") {
            Some(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<u64>()
                    .context("SIMULATOR_SEED must be an unsigned integer")?,
            ),
            _ => None,
        };

        Ok(Config {
            simulation: SimulationConfig {
                tosses: tosses as u64,
                seed,
                report_interval: lookup("SIMULATOR_REPORT_INTERVAL")
                    .unwrap_or_else(|| DEFAULT_REPORT_INTERVAL.to_string())
                    .trim()
                    .parse::<u64>()
                    .context("SIMULATOR_REPORT_INTERVAL must be an unsigned integer")?,
            },
            logging: LoggingConfig {
                json: lookup("LOG_FORMAT")
                    .unwrap_or_else(|| "json".to_string())
                    .eq_ignore_ascii_case("json"),
            },
        })
    }
}
