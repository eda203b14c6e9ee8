use std::{num::NonZeroUsize, process::ExitCode, thread};

use bin::cli::{print_report, RunArgs};
use clap::Parser;
use histogram::{run_threaded, HistResult, RandomSource};

/// Distributed histogram of random integers over a pool of worker threads.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    run: RunArgs,

    /// Number of workers; defaults to the available parallelism
    #[arg(short, long)]
    workers: Option<usize>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> HistResult<()> {
    let params = args.run.to_params()?;
    let num_workers = args.workers.unwrap_or_else(|| {
        thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
    });
    log::info!("running on {} worker threads", num_workers);

    let source = RandomSource::seeded(params.seed);
    let outcome = run_threaded(params, num_workers, source)?;
    print_report(&outcome)
}
