use anyhow::Result;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use simulator::config::Config;
use simulator::{LeadChart, ProgressReporter, RunReport, SimulationWorker, TossSimulation};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so LOG_FORMAT from .env applies
    let config = Config::load()?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "simulator=info".into());

    if config.logging.json {
        // JSON structured logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        // Human-readable logging for development
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let run_id = Uuid::new_v4();
    tracing::info!(
        service = "simulator",
        version = env!("CARGO_PKG_VERSION"),
        %run_id,
        tosses = config.simulation.tosses,
        seed = config.simulation.seed,
        report_interval = config.simulation.report_interval,
        "Starting coin toss simulation"
    );

    let mut simulation = TossSimulation::new(config.simulation.tosses, config.simulation.seed)?;

    let reporter = Arc::new(Mutex::new(ProgressReporter::new(
        config.simulation.report_interval,
    )?));
    let chart = Arc::new(Mutex::new(LeadChart::new()));
    simulation.subscribe(reporter.clone());
    simulation.subscribe(chart.clone());

    let started_at = chrono::Utc::now();
    let handle = SimulationWorker::spawn(simulation);

    // Ctrl-C stops the run; the partial statistics are still reported
    let stop = handle.stop_handle();
    let signal_handle = tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                stop.stop();
            }
            Err(e) => warn!("Failed to listen for shutdown signal: {:?}", e),
        }
    });

    let simulation = handle.join().await?;
    signal_handle.abort();

    let statistics = simulation.statistics();
    reporter
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .finish(statistics);

    let axis_crossings = chart
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .axis_crossings();

    let report = RunReport::new(
        run_id,
        config.simulation.seed,
        started_at,
        statistics,
        simulation.is_cancelled(),
        axis_crossings,
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    tracing::info!(%run_id, cancelled = report.cancelled, "Simulation finished");

    Ok(())
}
