use std::fmt::Debug;

use mpi::{
    collective::SystemOperation,
    datatype::{Partition, PartitionMut},
    environment::Universe,
    topology::{Process, SimpleCommunicator},
    traits::*,
    Count,
};
use serdes::{deserialize_vec, serialize_slice, WireSerde};

use crate::{traits::check_layout, CommBackend, CommError, CommResult, WorkerComm};

/// One MPI rank. Dropping it finalizes MPI.
pub struct MPICommunicator {
    pub world: SimpleCommunicator,
    pub world_size: i32,
    pub world_rank: i32,
    // dropped last, after the world communicator
    _universe: Universe,
}

impl Debug for MPICommunicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MPICommunicator")
            .field("world_size", &self.world_size)
            .field("world_rank", &self.world_rank)
            .finish()
    }
}

impl MPICommunicator {
    const ROOT_RANK: i32 = 0;

    /// Initialize MPI. Fails if this process already did so.
    pub fn new() -> CommResult<Self> {
        let universe = mpi::initialize().ok_or(CommError::AlreadyInitialized)?;
        let world = universe.world();
        let world_size = world.size();
        let world_rank = world.rank();
        Ok(Self {
            world,
            world_size,
            world_rank,
            _universe: universe,
        })
    }

    /// Tear down every rank of the world. Used for fatal errors on any rank.
    pub fn abort(&self, error_code: i32) -> ! {
        self.world.abort(error_code)
    }

    #[inline(always)]
    pub fn root_process(&self) -> Process {
        self.world.process_at_rank(Self::ROOT_RANK)
    }

    /// Convert an element layout into the byte layout MPI expects.
    fn byte_layout<T: WireSerde>(elems: &[usize]) -> CommResult<Vec<Count>> {
        elems
            .iter()
            .map(|&n| {
                let bytes = n * T::SERIALIZED_SIZE;
                Count::try_from(bytes).map_err(|_| CommError::PayloadTooLarge { bytes })
            })
            .collect()
    }
}

/// MPI toolkit:
impl WorkerComm for MPICommunicator {
    const BACKEND: CommBackend = CommBackend::MPI;

    #[inline(always)]
    fn world_size(&self) -> usize {
        self.world_size as usize
    }

    #[inline(always)]
    fn world_rank(&self) -> usize {
        self.world_rank as usize
    }

    fn processor_name(&self) -> String {
        mpi::environment::processor_name().unwrap_or_else(|_| String::from("unknown"))
    }

    #[inline(always)]
    fn barrier(&self) -> CommResult<()> {
        self.world.barrier();
        Ok(())
    }

    fn root_broadcast_bytes(&self, bytes: &mut Vec<u8>) -> CommResult<()> {
        if self.world_size == 1 {
            return Ok(());
        }
        // receivers learn the length first
        let mut len = bytes.len() as u64;
        self.root_process().broadcast_into(&mut len);
        bytes.resize(len as usize, 0);
        self.root_process().broadcast_into(&mut bytes[..]);
        Ok(())
    }

    fn gather_vec<T: WireSerde + Clone>(
        &self,
        local_vec: &[T],
        global_vec: &mut Vec<T>,
    ) -> CommResult<()> {
        if self.world_size == 1 {
            *global_vec = local_vec.to_vec();
            return Ok(());
        }

        let local_bytes = serialize_slice(local_vec)?;
        if self.is_root() {
            let mut global_bytes = vec![0u8; local_bytes.len() * self.world_size()];
            self.root_process()
                .gather_into_root(&local_bytes[..], &mut global_bytes[..]);
            *global_vec = deserialize_vec(&global_bytes)?;
        } else {
            self.root_process().gather_into(&local_bytes[..]);
        }
        Ok(())
    }

    fn scatter_varlen_vec<T: WireSerde + Clone>(
        &self,
        global_vec: &[T],
        counts: &[usize],
        displs: &[usize],
    ) -> CommResult<Vec<T>> {
        let span = check_layout(self.world_size(), counts, displs)?;
        let mut local_bytes = vec![0u8; counts[self.world_rank()] * T::SERIALIZED_SIZE];

        if self.is_root() {
            if global_vec.len() < span {
                return Err(CommError::LengthMismatch {
                    expected: span,
                    actual: global_vec.len(),
                });
            }
            let global_bytes = serialize_slice(global_vec)?;
            let byte_counts = Self::byte_layout::<T>(counts)?;
            let byte_displs = Self::byte_layout::<T>(displs)?;
            let partition = Partition::new(&global_bytes[..], &byte_counts[..], &byte_displs[..]);
            self.root_process()
                .scatter_varcount_into_root(&partition, &mut local_bytes[..]);
        } else {
            self.root_process()
                .scatter_varcount_into(&mut local_bytes[..]);
        }

        Ok(deserialize_vec(&local_bytes)?)
    }

    fn gather_varlen_vec<T: WireSerde + Clone + Default>(
        &self,
        local_vec: &[T],
        counts: &[usize],
        displs: &[usize],
    ) -> CommResult<Vec<T>> {
        let span = check_layout(self.world_size(), counts, displs)?;
        if local_vec.len() != counts[self.world_rank()] {
            return Err(CommError::LengthMismatch {
                expected: counts[self.world_rank()],
                actual: local_vec.len(),
            });
        }

        let local_bytes = serialize_slice(local_vec)?;
        if self.is_root() {
            let mut global_bytes = vec![0u8; span * T::SERIALIZED_SIZE];
            let byte_counts = Self::byte_layout::<T>(counts)?;
            let byte_displs = Self::byte_layout::<T>(displs)?;
            {
                let mut partition =
                    PartitionMut::new(&mut global_bytes[..], &byte_counts[..], &byte_displs[..]);
                self.root_process()
                    .gather_varcount_into_root(&local_bytes[..], &mut partition);
            }
            Ok(deserialize_vec(&global_bytes)?)
        } else {
            self.root_process().gather_varcount_into(&local_bytes[..]);
            Ok(vec![])
        }
    }

    /// Reduce with MPI_MAX instead of gathering every rank's value.
    fn max_f64(&self, local: f64) -> CommResult<f64> {
        if self.world_size == 1 {
            return Ok(local);
        }
        if self.is_root() {
            let mut global = local;
            self.root_process()
                .reduce_into_root(&local, &mut global, SystemOperation::max());
            Ok(global)
        } else {
            self.root_process()
                .reduce_into(&local, SystemOperation::max());
            Ok(local)
        }
    }
}
