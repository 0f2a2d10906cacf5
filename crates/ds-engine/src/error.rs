use ds_core::DsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] DsError),
}

pub type EngineResult<T> = Result<T, EngineError>;
