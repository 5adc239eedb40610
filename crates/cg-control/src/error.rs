use cg_core::CgError;
use cg_sim::SimError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error(transparent)]
    Config(#[from] CgError),

    #[error("controller thread has shut down")]
    Disconnected,

    #[error("failed to spawn {what} thread: {source}")]
    Spawn {
        what:   &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl From<SimError> for ControlError {
    fn from(e: SimError) -> Self {
        match e {
            SimError::Config(e) => ControlError::Config(e),
        }
    }
}

pub type ControlResult<T> = Result<T, ControlError>;
