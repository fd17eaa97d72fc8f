use epi_core::ConfigError;
use epi_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("internal consistency error: {0}")]
    Model(#[from] ModelError),
}

pub type SimResult<T> = Result<T, SimError>;
