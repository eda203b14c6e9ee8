use std::thread;

use communicator::{CommError, ThreadCommunicator, WorkerComm};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// Run `f` once per rank on its own thread and collect the results in rank order.
fn run_world<T, F>(world_size: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(ThreadCommunicator) -> T + Sync,
{
    let f = &f;
    thread::scope(|s| {
        let handles = ThreadCommunicator::world(world_size)
            .into_iter()
            .map(|comm| s.spawn(move || f(comm)))
            .collect::<Vec<_>>();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
}

#[test]
fn test_gather_vec() {
    const TEST_SIZE: usize = (1 << 10) + 1;

    let results = run_world(4, |comm| {
        let local_vec = (0..TEST_SIZE)
            .map(|i| (comm.world_rank() * TEST_SIZE + i) as u64)
            .collect::<Vec<_>>();
        let mut global_vec = vec![];
        comm.gather_vec(&local_vec, &mut global_vec).unwrap();
        (comm.is_root(), global_vec)
    });

    for (is_root, global_vec) in results {
        if is_root {
            assert_eq!(global_vec.len(), TEST_SIZE * 4);
            for (i, v) in global_vec.iter().enumerate() {
                assert_eq!(i as u64, *v);
            }
        }
    }
}

#[test]
fn test_broadcast_bytes() {
    let results = run_world(3, |comm| {
        let mut bytes = if comm.is_root() {
            b"num_values=12".to_vec()
        } else {
            vec![]
        };
        comm.root_broadcast_bytes(&mut bytes).unwrap();
        bytes
    });
    assert!(results.iter().all(|b| b == b"num_values=12"));
}

#[test]
fn test_scatter_then_gather_varlen() {
    let mut rng = ChaCha12Rng::seed_from_u64(7);
    let data: Vec<i64> = (0..12).map(|_| rng.gen_range(1..=1000)).collect();
    let counts = [4usize, 0, 8];
    let displs = [0usize, 4, 4];

    let results = run_world(3, |comm| {
        let global = if comm.is_root() { data.clone() } else { vec![] };
        let local = comm.scatter_varlen_vec(&global, &counts, &displs).unwrap();
        assert_eq!(
            local,
            data[displs[comm.world_rank()]..][..counts[comm.world_rank()]].to_vec()
        );
        let doubled = local.iter().map(|v| v * 2).collect::<Vec<_>>();
        comm.gather_varlen_vec(&doubled, &counts, &displs).unwrap()
    });

    assert_eq!(results[0], data.iter().map(|v| v * 2).collect::<Vec<_>>());
    assert!(results[1].is_empty());
    assert!(results[2].is_empty());
}

#[test]
fn test_sum_and_max_reduce_at_root() {
    let results = run_world(4, |comm| {
        let rank = comm.world_rank() as u64;
        comm.barrier().unwrap();
        let sum = comm.sum_vec(&[rank, 1, 10 * rank]).unwrap();
        let max = comm.max_f64(comm.world_rank() as f64 * 0.5).unwrap();
        (sum, max)
    });

    assert_eq!(results[0].0, vec![6, 4, 60]);
    assert_eq!(results[0].1, 1.5);
    assert!(results[1].0.is_empty());
}

#[test]
fn test_dead_rank_surfaces_as_disconnect() {
    let results = run_world(3, |comm| {
        if comm.world_rank() == 2 {
            // leaves before the gather
            return None;
        }
        let mut global = vec![];
        Some(comm.gather_vec(&[1u64], &mut global))
    });

    assert!(matches!(
        results[0],
        Some(Err(CommError::Disconnected { peer: 2 }))
    ));
    assert!(matches!(results[1], Some(Ok(()))));
}
