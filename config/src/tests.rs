use std::thread;

use communicator::{CommError, ThreadCommunicator, WorkerComm};

use crate::{Config, ConfigError, RunParams, ValueDomain};

#[test]
fn test_default_domain() {
    let domain = ValueDomain::default();
    assert_eq!((domain.min, domain.max), (1, 1000));
    assert_eq!(domain.range(), 999);
    assert!(domain.contains(1) && domain.contains(1000));
    assert!(!domain.contains(0) && !domain.contains(1001));
}

#[test]
fn test_invalid_domain() {
    assert!(matches!(ValueDomain::new(5, 4), Err(ConfigError::Invalid(_))));
    assert!(matches!(
        ValueDomain::new(0, i64::MAX),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        ValueDomain::new(i64::MIN, 0),
        Err(ConfigError::Invalid(_))
    ));
    assert!(ValueDomain::new(7, 7).is_ok());
}

#[test]
fn test_validate_params() {
    assert!(RunParams::new(12, 3).validate().is_ok());
    assert!(matches!(
        RunParams::new(12, 0).validate(),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        RunParams::new(0, 3).validate(),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_params_bytes() {
    let params = RunParams::new(12, 3)
        .with_domain(ValueDomain::new(-50, 50).unwrap())
        .with_seed(9)
        .with_list_values(true);
    let bytes = params.to_bytes().unwrap();
    assert_eq!(bytes.len(), 41);
    assert_eq!(RunParams::from_bytes(&bytes).unwrap(), params);
    assert!(RunParams::from_bytes(&bytes[1..]).is_err());
}

#[test]
fn test_from_root_broadcasts_root_params() {
    let root_params = RunParams::new(24, 4).with_seed(3);
    let configs = thread::scope(|s| {
        let handles = ThreadCommunicator::world(3)
            .into_iter()
            .map(|comm| {
                // non-root ranks start from different (ignored) parameters
                let params = if comm.world_rank() == 0 {
                    Some(root_params.clone())
                } else {
                    Some(RunParams::new(1, 1))
                };
                s.spawn(move || Config::from_root(params, comm).unwrap().params)
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    });
    assert!(configs.iter().all(|p| *p == root_params));
}

#[test]
fn test_root_without_params() {
    let comm = ThreadCommunicator::world(1).pop().unwrap();
    assert!(matches!(
        Config::from_root(None, comm),
        Err(ConfigError::MissingRootParams)
    ));
}

#[test]
fn test_missing_root_surfaces_on_peers() {
    let mut world = ThreadCommunicator::world(2);
    let peer = world.pop().unwrap();
    drop(world);
    assert!(matches!(
        Config::from_root(None, peer),
        Err(ConfigError::Comm(CommError::Disconnected { peer: 0 }))
    ));
}
