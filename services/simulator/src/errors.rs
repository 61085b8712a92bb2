#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Relative lead time is undefined before the first toss")]
    DivisionUndefined,

    #[error("Simulation has already run")]
    AlreadyRun,

    #[error("Simulation worker failed: {0}")]
    Worker(String),
}

impl From<tokio::task::JoinError> for SimulationError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_panic() {
            tracing::error!("Simulation worker panicked: {:?}", err);
        }
        SimulationError::Worker(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
