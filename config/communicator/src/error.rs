use serdes::SerdeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommError {
    #[error("rank {peer} disconnected before the collective completed")]
    Disconnected { peer: usize },

    #[error("collective payload has {actual} elements, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("payload of {bytes} bytes exceeds the per-rank message limit")]
    PayloadTooLarge { bytes: usize },

    #[error("MPI has already been initialized in this process")]
    AlreadyInitialized,

    #[error("serde error: {0:?}")]
    Serde(#[from] SerdeError),
}

pub type CommResult<T> = std::result::Result<T, CommError>;
