use std::{fmt::Debug, ops::AddAssign};

use serdes::WireSerde;

use crate::{CommError, CommResult};

pub const ROOT_RANK: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommBackend {
    MPI,
    Thread,
}

/// Collective operations between the ranks of one batch run.
///
/// Every rank must call the same collectives in the same order; each call blocks until the
/// participating ranks have reached it. Results that only make sense at the root (gathers,
/// reductions) are returned as empty vectors on the other ranks.
pub trait WorkerComm: Debug {
    const BACKEND: CommBackend;

    fn world_size(&self) -> usize;

    fn world_rank(&self) -> usize;

    #[inline(always)]
    fn is_root(&self) -> bool {
        self.world_rank() == ROOT_RANK
    }

    /// Host the rank runs on, reported next to the rank id
    fn processor_name(&self) -> String;

    fn barrier(&self) -> CommResult<()>;

    /// Root process broadcasts a vector of bytes into all the processes
    fn root_broadcast_bytes(&self, bytes: &mut Vec<u8>) -> CommResult<()>;

    /// Gather equally sized local vectors to the root, concatenated in rank order
    fn gather_vec<T: WireSerde + Clone>(
        &self,
        local_vec: &[T],
        global_vec: &mut Vec<T>,
    ) -> CommResult<()>;

    /// Root hands rank r the sub-slice `global_vec[displs[r]..displs[r] + counts[r]]`.
    /// `global_vec` is only read at the root; every rank needs the same counts and displs.
    fn scatter_varlen_vec<T: WireSerde + Clone>(
        &self,
        global_vec: &[T],
        counts: &[usize],
        displs: &[usize],
    ) -> CommResult<Vec<T>>;

    /// Inverse of [`WorkerComm::scatter_varlen_vec`]: rank r's local vector lands at
    /// `displs[r]` of the root's result.
    fn gather_varlen_vec<T: WireSerde + Clone + Default>(
        &self,
        local_vec: &[T],
        counts: &[usize],
        displs: &[usize],
    ) -> CommResult<Vec<T>>;

    /// sum up all local values
    fn sum_vec<T: WireSerde + Copy + Default + AddAssign>(
        &self,
        local_vec: &[T],
    ) -> CommResult<Vec<T>> {
        if self.world_size() == 1 {
            Ok(local_vec.to_vec())
        } else if self.is_root() {
            let mut global_vec = vec![];
            self.gather_vec(local_vec, &mut global_vec)?;
            let mut ret = local_vec.to_vec();
            for rank_vec in global_vec.chunks(local_vec.len().max(1)).skip(1) {
                for (acc, v) in ret.iter_mut().zip(rank_vec) {
                    *acc += *v;
                }
            }
            Ok(ret)
        } else {
            self.gather_vec(local_vec, &mut vec![])?;
            Ok(vec![])
        }
    }

    /// max of one value per rank; non-root ranks get their own value back
    fn max_f64(&self, local: f64) -> CommResult<f64> {
        let mut global_vec = vec![];
        self.gather_vec(&[local], &mut global_vec)?;
        if self.is_root() {
            Ok(global_vec.into_iter().fold(f64::NEG_INFINITY, f64::max))
        } else {
            Ok(local)
        }
    }
}

/// A borrowed communicator is a communicator; lets a caller keep ownership (e.g. to abort the
/// world on a fatal error) while a coordinator drives the collectives.
impl<W: WorkerComm> WorkerComm for &W {
    const BACKEND: CommBackend = W::BACKEND;

    #[inline(always)]
    fn world_size(&self) -> usize {
        (**self).world_size()
    }

    #[inline(always)]
    fn world_rank(&self) -> usize {
        (**self).world_rank()
    }

    #[inline(always)]
    fn is_root(&self) -> bool {
        (**self).is_root()
    }

    fn processor_name(&self) -> String {
        (**self).processor_name()
    }

    fn barrier(&self) -> CommResult<()> {
        (**self).barrier()
    }

    fn root_broadcast_bytes(&self, bytes: &mut Vec<u8>) -> CommResult<()> {
        (**self).root_broadcast_bytes(bytes)
    }

    fn gather_vec<T: WireSerde + Clone>(
        &self,
        local_vec: &[T],
        global_vec: &mut Vec<T>,
    ) -> CommResult<()> {
        (**self).gather_vec(local_vec, global_vec)
    }

    fn scatter_varlen_vec<T: WireSerde + Clone>(
        &self,
        global_vec: &[T],
        counts: &[usize],
        displs: &[usize],
    ) -> CommResult<Vec<T>> {
        (**self).scatter_varlen_vec(global_vec, counts, displs)
    }

    fn gather_varlen_vec<T: WireSerde + Clone + Default>(
        &self,
        local_vec: &[T],
        counts: &[usize],
        displs: &[usize],
    ) -> CommResult<Vec<T>> {
        (**self).gather_varlen_vec(local_vec, counts, displs)
    }

    fn sum_vec<T: WireSerde + Copy + Default + AddAssign>(
        &self,
        local_vec: &[T],
    ) -> CommResult<Vec<T>> {
        (**self).sum_vec(local_vec)
    }

    fn max_f64(&self, local: f64) -> CommResult<f64> {
        (**self).max_f64(local)
    }
}

/// Check a scatter/gather layout against the world size and return the span it covers.
pub(crate) fn check_layout(world_size: usize, counts: &[usize], displs: &[usize]) -> CommResult<usize> {
    if counts.len() != world_size {
        return Err(CommError::LengthMismatch {
            expected: world_size,
            actual: counts.len(),
        });
    }
    if displs.len() != world_size {
        return Err(CommError::LengthMismatch {
            expected: world_size,
            actual: displs.len(),
        });
    }
    Ok(counts
        .iter()
        .zip(displs)
        .map(|(c, d)| c + d)
        .max()
        .unwrap_or(0))
}
