use std::sync::mpsc::{self, Receiver, Sender};

use itertools::izip;
use serdes::{deserialize_vec, serialize_slice, WireSerde};

use crate::{traits::check_layout, CommBackend, CommError, CommResult, WorkerComm, ROOT_RANK};

/// One rank of an in-process world.
///
/// Ranks are connected by a full mesh of channels, one per ordered pair, so that a rank which
/// returns early (and drops its endpoints) shows up as [`CommError::Disconnected`] at every
/// peer still waiting on it instead of blocking them forever.
#[derive(Debug)]
pub struct ThreadCommunicator {
    world_size: usize,
    world_rank: usize,
    // indexed by destination rank
    senders: Vec<Sender<Vec<u8>>>,
    // indexed by source rank
    receivers: Vec<Receiver<Vec<u8>>>,
}

impl ThreadCommunicator {
    /// Create all ranks of a world at once; hand element r to the thread running rank r.
    pub fn world(world_size: usize) -> Vec<Self> {
        let mut senders: Vec<Vec<Sender<Vec<u8>>>> =
            (0..world_size).map(|_| Vec::with_capacity(world_size)).collect();
        let mut receivers: Vec<Vec<Receiver<Vec<u8>>>> =
            (0..world_size).map(|_| Vec::with_capacity(world_size)).collect();

        for src in 0..world_size {
            for dst in 0..world_size {
                let (tx, rx) = mpsc::channel();
                senders[src].push(tx);
                receivers[dst].push(rx);
            }
        }

        izip!(0..world_size, senders, receivers)
            .map(|(world_rank, senders, receivers)| Self {
                world_size,
                world_rank,
                senders,
                receivers,
            })
            .collect()
    }

    #[inline]
    fn send(&self, dst: usize, bytes: Vec<u8>) -> CommResult<()> {
        log::trace!("rank {} -> {}: {} bytes", self.world_rank, dst, bytes.len());
        self.senders[dst]
            .send(bytes)
            .map_err(|_| CommError::Disconnected { peer: dst })
    }

    #[inline]
    fn recv(&self, src: usize) -> CommResult<Vec<u8>> {
        let bytes = self.receivers[src]
            .recv()
            .map_err(|_| CommError::Disconnected { peer: src })?;
        log::trace!("rank {} <- {}: {} bytes", self.world_rank, src, bytes.len());
        Ok(bytes)
    }

    #[inline]
    fn peers(&self) -> impl Iterator<Item = usize> {
        (0..self.world_size).filter(|&r| r != ROOT_RANK)
    }
}

fn sub_slice<'a, T>(global_vec: &'a [T], count: usize, displ: usize) -> CommResult<&'a [T]> {
    global_vec
        .get(displ..displ + count)
        .ok_or(CommError::LengthMismatch {
            expected: displ + count,
            actual: global_vec.len(),
        })
}

fn expect_len<T>(v: Vec<T>, expected: usize) -> CommResult<Vec<T>> {
    if v.len() != expected {
        return Err(CommError::LengthMismatch {
            expected,
            actual: v.len(),
        });
    }
    Ok(v)
}

impl WorkerComm for ThreadCommunicator {
    const BACKEND: CommBackend = CommBackend::Thread;

    #[inline(always)]
    fn world_size(&self) -> usize {
        self.world_size
    }

    #[inline(always)]
    fn world_rank(&self) -> usize {
        self.world_rank
    }

    fn processor_name(&self) -> String {
        format!("thread-{}", self.world_rank)
    }

    fn barrier(&self) -> CommResult<()> {
        if self.is_root() {
            for src in self.peers() {
                self.recv(src)?;
            }
            for dst in self.peers() {
                self.send(dst, vec![])?;
            }
        } else {
            self.send(ROOT_RANK, vec![])?;
            self.recv(ROOT_RANK)?;
        }
        Ok(())
    }

    fn root_broadcast_bytes(&self, bytes: &mut Vec<u8>) -> CommResult<()> {
        if self.is_root() {
            for dst in self.peers() {
                self.send(dst, bytes.clone())?;
            }
        } else {
            *bytes = self.recv(ROOT_RANK)?;
        }
        Ok(())
    }

    fn gather_vec<T: WireSerde + Clone>(
        &self,
        local_vec: &[T],
        global_vec: &mut Vec<T>,
    ) -> CommResult<()> {
        if !self.is_root() {
            return self.send(ROOT_RANK, serialize_slice(local_vec)?);
        }

        global_vec.clear();
        global_vec.reserve(local_vec.len() * self.world_size);
        global_vec.extend_from_slice(local_vec);
        for src in self.peers() {
            let rank_vec = deserialize_vec::<T>(&self.recv(src)?)?;
            global_vec.extend(expect_len(rank_vec, local_vec.len())?);
        }
        Ok(())
    }

    fn scatter_varlen_vec<T: WireSerde + Clone>(
        &self,
        global_vec: &[T],
        counts: &[usize],
        displs: &[usize],
    ) -> CommResult<Vec<T>> {
        check_layout(self.world_size, counts, displs)?;

        if self.is_root() {
            for dst in self.peers() {
                let part = sub_slice(global_vec, counts[dst], displs[dst])?;
                self.send(dst, serialize_slice(part)?)?;
            }
            Ok(sub_slice(global_vec, counts[ROOT_RANK], displs[ROOT_RANK])?.to_vec())
        } else {
            let local_vec = deserialize_vec::<T>(&self.recv(ROOT_RANK)?)?;
            expect_len(local_vec, counts[self.world_rank])
        }
    }

    fn gather_varlen_vec<T: WireSerde + Clone + Default>(
        &self,
        local_vec: &[T],
        counts: &[usize],
        displs: &[usize],
    ) -> CommResult<Vec<T>> {
        let span = check_layout(self.world_size, counts, displs)?;
        if local_vec.len() != counts[self.world_rank] {
            return Err(CommError::LengthMismatch {
                expected: counts[self.world_rank],
                actual: local_vec.len(),
            });
        }

        if !self.is_root() {
            self.send(ROOT_RANK, serialize_slice(local_vec)?)?;
            return Ok(vec![]);
        }

        let mut global_vec = vec![T::default(); span];
        global_vec[displs[ROOT_RANK]..displs[ROOT_RANK] + counts[ROOT_RANK]]
            .clone_from_slice(local_vec);
        for src in self.peers() {
            let rank_vec = expect_len(deserialize_vec::<T>(&self.recv(src)?)?, counts[src])?;
            global_vec[displs[src]..displs[src] + counts[src]].clone_from_slice(&rank_vec);
        }
        Ok(global_vec)
    }
}
