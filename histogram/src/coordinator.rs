use std::thread;

use communicator::{CommError, ThreadCommunicator, WorkerComm, ROOT_RANK};
use config::{Config, ConfigError, RunParams, Value};
use utils::timer::Timer;

use crate::{
    Bins, DataSource, HistError, HistResult, Histogram, LocalBinning, SliceAssignment,
};

/// Everything rank 0 knows at the end of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub params: RunParams,
    pub dataset: Vec<Value>,
    pub bins: Bins,
    pub slices: SliceAssignment,
    // number of values each rank actually received
    pub received: Vec<usize>,
    pub histogram: Histogram,
    // class of every dataset element, by global index
    pub classes: Option<Vec<u64>>,
    // slowest rank's classification time
    pub elapsed_secs: f64,
}

/// State of one rank for one batch run.
///
/// Classes and slice assignment are derived from the broadcast parameters on every rank, so
/// only the parameters and the dataset slices ever travel.
#[derive(Debug)]
pub struct Coordinator<C: WorkerComm> {
    config: Config<C>,
    bins: Bins,
    slices: SliceAssignment,
}

impl<C: WorkerComm> Coordinator<C> {
    /// Agree on the run parameters and derive the classes and slices.
    ///
    /// The root rejects a bad configuration before anything is sent; the other ranks then see
    /// the root disappear.
    pub fn new(params: Option<RunParams>, comm: C) -> HistResult<Self> {
        if comm.is_root() {
            let params = params.as_ref().ok_or(ConfigError::MissingRootParams)?;
            Self::derive(params, comm.world_size())?;
        }

        let config = Config::from_root(params, comm)?;
        let (bins, slices) = Self::derive(&config.params, config.comm.world_size())?;
        Ok(Self {
            config,
            bins,
            slices,
        })
    }

    fn derive(params: &RunParams, world_size: usize) -> HistResult<(Bins, SliceAssignment)> {
        params.validate()?;
        let slices = SliceAssignment::new(params.num_values, params.num_classes, world_size)?;
        let bins = Bins::new(params.num_classes, params.domain)?;
        Ok((bins, slices))
    }

    #[inline]
    pub fn params(&self) -> &RunParams {
        &self.config.params
    }

    #[inline]
    pub fn bins(&self) -> &Bins {
        &self.bins
    }

    #[inline]
    pub fn slices(&self) -> &SliceAssignment {
        &self.slices
    }

    #[inline]
    pub fn comm(&self) -> &C {
        &self.config.comm
    }

    /// Generate the dataset at the root, then [`Coordinator::run`].
    pub fn run_with<D: DataSource>(self, source: &mut D) -> HistResult<Option<RunOutcome>> {
        let dataset = if self.comm().is_root() {
            source.generate(self.params().num_values, self.params().domain)
        } else {
            vec![]
        };
        self.run(dataset)
    }

    /// Scatter, classify, reduce. `dataset` is only read at the root.
    ///
    /// Returns `Some` at the root and `None` everywhere else.
    pub fn run(self, dataset: Vec<Value>) -> HistResult<Option<RunOutcome>> {
        let Self {
            config,
            bins,
            slices,
        } = self;
        let Config { params, comm } = config;
        let rank = comm.world_rank();

        if comm.is_root() && dataset.len() != params.num_values {
            return Err(HistError::InvalidConfiguration(format!(
                "dataset has {} values, expected {}",
                dataset.len(),
                params.num_values
            )));
        }

        let local = comm.scatter_varlen_vec(&dataset, slices.lengths(), slices.offsets())?;
        log::info!(
            "processor rank: {} on {} out of {} len: {}",
            rank,
            comm.processor_name(),
            comm.world_size(),
            local.len()
        );
        let mut received = vec![];
        comm.gather_vec(&[local.len()], &mut received)?;

        // start classifying together so the timings are comparable
        comm.barrier()?;
        let timer = Timer::new("classification", comm.is_root());
        let local_binning = LocalBinning::run(&local, &bins, params.list_values)?;
        let elapsed = timer.stop();
        log::debug!(
            "rank {} local histogram {:?} in {:?}",
            rank,
            local_binning.histogram.counts(),
            elapsed
        );

        let elapsed_secs = comm.max_f64(elapsed.as_secs_f64())?;
        let counts = comm.sum_vec(local_binning.histogram.counts())?;
        let classes = match &local_binning.classes {
            Some(classes) => {
                Some(comm.gather_varlen_vec(classes, slices.lengths(), slices.offsets())?)
            }
            None => None,
        };

        if !comm.is_root() {
            return Ok(None);
        }

        let histogram = Histogram::from_counts(counts);
        debug_assert_eq!(histogram.total(), params.num_values as u64);
        log::info!("final histogram {:?}", histogram.counts());
        Ok(Some(RunOutcome {
            params,
            dataset,
            bins,
            slices,
            received,
            histogram,
            classes,
            elapsed_secs,
        }))
    }
}

/// Run the whole batch on `num_workers` threads of this process.
///
/// Rank 0 runs on the calling thread and is the only one that touches `source`. If any rank
/// fails, the error that caused the failure is returned in preference to the disconnects it
/// triggered on the other ranks.
pub fn run_threaded<D: DataSource>(
    params: RunParams,
    num_workers: usize,
    mut source: D,
) -> HistResult<RunOutcome> {
    if num_workers == 0 {
        return Err(HistError::InvalidConfiguration(
            "number of workers must be positive".to_string(),
        ));
    }

    let mut world = ThreadCommunicator::world(num_workers).into_iter();
    let root_comm = world.next().ok_or(CommError::Disconnected { peer: ROOT_RANK })?;

    let results = thread::scope(|s| {
        let handles = world
            .map(|comm| s.spawn(move || Coordinator::new(None, comm)?.run(vec![])))
            .collect::<Vec<_>>();

        let mut results =
            vec![Coordinator::new(Some(params), root_comm).and_then(|c| c.run_with(&mut source))];
        for handle in handles {
            results.push(
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic)),
            );
        }
        results
    });

    first_failure(results)
}

/// Pick the outcome of a finished world: the root's result if every rank succeeded, else the
/// most telling error.
fn first_failure(results: Vec<HistResult<Option<RunOutcome>>>) -> HistResult<RunOutcome> {
    let mut outcome = None;
    let mut disconnect = None;
    for result in results {
        match result {
            Ok(Some(o)) => outcome = Some(o),
            Ok(None) => {}
            Err(err @ HistError::Comm(CommError::Disconnected { .. })) => {
                disconnect.get_or_insert(err);
            }
            Err(err) => return Err(err),
        }
    }
    if let Some(err) = disconnect {
        return Err(err);
    }
    outcome.ok_or(HistError::Comm(CommError::Disconnected { peer: ROOT_RANK }))
}
