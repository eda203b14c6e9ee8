use bin::cli::{print_report, RunArgs};
use clap::Parser;
use communicator::{root_println, MPICommunicator, WorkerComm};
use histogram::{Coordinator, HistResult, RandomSource};

/// Distributed histogram of random integers, one worker per MPI rank.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    run: RunArgs,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let comm = match MPICommunicator::new() {
        Ok(comm) => comm,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };
    root_println!(comm, "running on {} MPI ranks", comm.world_size());

    if let Err(err) = run(&args, &comm) {
        eprintln!("rank {} error: {err}", comm.world_rank());
        // peers may be blocked in a collective
        comm.abort(1);
    }
}

fn run(args: &Args, comm: &MPICommunicator) -> HistResult<()> {
    // only the root's parameters count; the others receive them
    let params = if comm.is_root() {
        Some(args.run.to_params()?)
    } else {
        None
    };

    let coordinator = Coordinator::new(params, comm)?;
    let mut source = RandomSource::seeded(coordinator.params().seed);
    if let Some(outcome) = coordinator.run_with(&mut source)? {
        print_report(&outcome)?;
    }
    Ok(())
}
