use thiserror::Error;

#[derive(Error, Debug)]
pub enum SerdeError {
    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("Deserialization failure")]
    DeserializeError,

    #[error("buffer of {len} bytes is not a whole number of {elem_size}-byte elements")]
    MisalignedBuffer { len: usize, elem_size: usize },
}

pub type SerdeResult<T> = std::result::Result<T, SerdeError>;
