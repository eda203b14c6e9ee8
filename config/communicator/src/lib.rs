mod common;

mod error;
pub use error::{CommError, CommResult};

mod traits;
pub use traits::{CommBackend, WorkerComm, ROOT_RANK};

mod thread_communicator;
pub use thread_communicator::ThreadCommunicator;

#[cfg(feature = "mpi")]
mod mpi_communicator;
#[cfg(feature = "mpi")]
pub use mpi_communicator::MPICommunicator;

#[cfg(test)]
mod tests;
