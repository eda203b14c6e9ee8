use communicator::WorkerComm;

mod error;
pub use error::{ConfigError, ConfigResult};

mod params;
pub use params::{RunParams, Value, ValueDomain};

#[derive(Debug)]
pub struct Config<C: WorkerComm> {
    // run parameters, identical on every rank
    pub params: RunParams,
    // communicator of this rank
    pub comm: C,
}

impl<C: WorkerComm> Config<C> {
    pub fn new(params: RunParams, comm: C) -> Self {
        Config { params, comm }
    }

    /// Make the root's parameters the parameters of every rank.
    ///
    /// The root must pass `Some`; whatever the other ranks pass is replaced by the broadcast
    /// value, so ranks launched with diverging arguments still agree.
    pub fn from_root(params: Option<RunParams>, comm: C) -> ConfigResult<Self> {
        let mut bytes = if comm.is_root() {
            params
                .as_ref()
                .ok_or(ConfigError::MissingRootParams)?
                .to_bytes()?
        } else {
            vec![]
        };

        comm.root_broadcast_bytes(&mut bytes)?;
        let params = RunParams::from_bytes(&bytes)?;
        log::debug!("rank {} received {:?}", comm.world_rank(), params);
        Ok(Self::new(params, comm))
    }
}

#[cfg(test)]
mod tests;
