use cg_core::CgError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] CgError),
}

pub type SimResult<T> = Result<T, SimError>;
