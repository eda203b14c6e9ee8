use communicator::CommError;
use serdes::SerdeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("the root rank must supply the run parameters")]
    MissingRootParams,

    #[error("communication error: {0}")]
    Comm(#[from] CommError),

    #[error("serde error: {0:?}")]
    Serde(#[from] SerdeError),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
