use crate::{traits::check_layout, CommError, ThreadCommunicator, WorkerComm};

#[test]
fn test_world_ranks() {
    let world = ThreadCommunicator::world(4);
    assert_eq!(world.len(), 4);
    for (rank, comm) in world.iter().enumerate() {
        assert_eq!(comm.world_rank(), rank);
        assert_eq!(comm.world_size(), 4);
        assert_eq!(comm.is_root(), rank == 0);
    }
}

#[test]
fn test_check_layout_span() {
    assert_eq!(check_layout(3, &[2, 0, 4], &[0, 2, 2]).unwrap(), 6);
    assert_eq!(check_layout(2, &[0, 0], &[0, 0]).unwrap(), 0);
}

#[test]
fn test_check_layout_rejects_wrong_arity() {
    assert!(matches!(
        check_layout(3, &[1, 1], &[0, 1, 2]),
        Err(CommError::LengthMismatch {
            expected: 3,
            actual: 2
        })
    ));
}

#[test]
fn test_single_rank_collectives_are_local() {
    let comm = ThreadCommunicator::world(1).pop().unwrap();
    let mut bytes = vec![1u8, 2, 3];
    comm.root_broadcast_bytes(&mut bytes).unwrap();
    assert_eq!(bytes, vec![1, 2, 3]);

    let local = comm.scatter_varlen_vec(&[5i64, 6, 7], &[3], &[0]).unwrap();
    assert_eq!(local, vec![5, 6, 7]);
    assert_eq!(comm.sum_vec(&[1u64, 2]).unwrap(), vec![1, 2]);
    assert_eq!(comm.max_f64(0.5).unwrap(), 0.5);
    comm.barrier().unwrap();
}

#[test]
fn test_borrowed_communicator_delegates() {
    let world = ThreadCommunicator::world(2);
    let borrowed = &world[1];
    assert_eq!(borrowed.world_rank(), 1);
    assert!(!borrowed.is_root());
    assert_eq!(
        <&ThreadCommunicator as WorkerComm>::BACKEND,
        crate::CommBackend::Thread
    );
}
