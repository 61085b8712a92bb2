//! Background execution of a simulation
//!
//! The toss loop is plain blocking computation, so it runs on tokio's blocking
//! pool. The caller keeps a handle to stop it and to await the finished
//! simulation.

use tokio::task::JoinHandle;
use tracing::info;

use crate::coin_source::CoinSource;
use crate::errors::Result;
use crate::simulation::{StopHandle, TossSimulation};

pub struct SimulationWorker;

impl SimulationWorker {
    /// Start the run without waiting for it; must be called inside a tokio runtime
    pub fn spawn<S>(mut simulation: TossSimulation<S>) -> SimulationHandle<S>
    where
        S: CoinSource + 'static,
    {
        let stop = simulation.stop_handle();
        let target_tosses = simulation.target_tosses();

        let join = tokio::task::spawn_blocking(move || {
            simulation.run()?;
            Ok(simulation)
        });

        info!(target_tosses, "Simulation worker started");

        SimulationHandle { stop, join }
    }
}

pub struct SimulationHandle<S> {
    stop: StopHandle,
    join: JoinHandle<Result<TossSimulation<S>>>,
}

impl<S> SimulationHandle<S> {
    /// Ask the worker to finish after its current toss; does not wait
    pub fn stop(&self) {
        self.stop.stop();
        info!("Simulation stop requested");
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the worker and hand back the simulation for reading statistics
    pub async fn join(self) -> Result<TossSimulation<S>> {
        let simulation = self.join.await??;
        info!(
            completed_tosses = simulation.completed_tosses(),
            cancelled = simulation.is_cancelled(),
            "Simulation worker stopped"
        );
        Ok(simulation)
    }
}
