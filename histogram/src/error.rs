use communicator::CommError;
use config::{ConfigError, Value};
use thiserror::Error;

/// Every failure is fatal for the run; there is no partial result.
#[derive(Debug, Error)]
pub enum HistError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A value matched no class. Unreachable for in-domain data and a correct partition.
    #[error("value {value} does not fall into any class")]
    Classification { value: Value },

    #[error("communication error: {0}")]
    Comm(#[from] CommError),

    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

impl From<ConfigError> for HistError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid(msg) => HistError::InvalidConfiguration(msg),
            ConfigError::MissingRootParams => HistError::InvalidConfiguration(
                "the root rank must supply the run parameters".to_string(),
            ),
            ConfigError::Comm(err) => HistError::Comm(err),
            ConfigError::Serde(err) => HistError::Comm(CommError::Serde(err)),
        }
    }
}

pub type HistResult<T> = std::result::Result<T, HistError>;
