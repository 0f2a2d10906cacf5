use ds_core::DsError;
use ds_engine::EngineError;
use thiserror::Error;

use crate::RunState;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation must be stopped, but it is {0}")]
    NotStopped(RunState),

    #[error("simulation is not running (it is {0})")]
    NotRunning(RunState),

    #[error("simulation is not paused (it is {0})")]
    NotPaused(RunState),

    #[error("simulation worker panicked")]
    WorkerPanicked,

    #[error("failed to spawn the {name} thread: {source}")]
    Spawn {
        name:   &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] DsError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
