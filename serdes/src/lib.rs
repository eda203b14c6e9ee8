mod error;
mod macros;
mod serdes;

pub use error::{SerdeError, SerdeResult};
pub use serdes::{deserialize_vec, serialize_slice, WireSerde};
