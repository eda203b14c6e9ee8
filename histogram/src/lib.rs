pub mod error;
pub use error::{HistError, HistResult};

pub mod partition;
pub use partition::{Bin, Bins};

pub mod distribute;
pub use distribute::SliceAssignment;

pub mod binning;
pub use binning::{bin_values, classify_slice, find_bin, Histogram, LocalBinning};

pub mod dataset;
pub use dataset::{generate_dataset, seeded_dataset, DataSource, FixedSource, RandomSource};

pub mod coordinator;
pub use coordinator::{run_threaded, Coordinator, RunOutcome};

pub mod report;

pub use config::{RunParams, Value, ValueDomain};

#[cfg(test)]
mod tests;
