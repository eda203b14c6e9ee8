use std::io::Write;

use clap::Args;
use config::{RunParams, Value, ValueDomain};
use histogram::{report::write_report, HistResult, RunOutcome};

/// Arguments shared by every launcher.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Number of values to generate; must be a multiple of the number of classes
    pub num_values: usize,

    /// Number of classes the value domain is split into
    pub num_classes: usize,

    /// Seed of the dataset generator
    #[arg(short, long, default_value_t = RunParams::DEFAULT_SEED)]
    pub seed: u64,

    /// Smallest value that can be generated
    #[arg(long, default_value_t = ValueDomain::MIN_NUM, allow_hyphen_values = true)]
    pub min: Value,

    /// Largest value that can be generated
    #[arg(long, default_value_t = ValueDomain::MAX_NUM, allow_hyphen_values = true)]
    pub max: Value,

    /// Also list the values that fell into each class
    #[arg(short, long)]
    pub list_values: bool,
}

impl RunArgs {
    pub fn to_params(&self) -> HistResult<RunParams> {
        let params = RunParams::new(self.num_values, self.num_classes)
            .with_domain(ValueDomain::new(self.min, self.max)?)
            .with_seed(self.seed)
            .with_list_values(self.list_values);
        params.validate()?;
        Ok(params)
    }
}

pub fn print_report(outcome: &RunOutcome) -> HistResult<()> {
    let mut stdout = std::io::stdout().lock();
    write_report(&mut stdout, outcome)?;
    stdout.flush()?;
    Ok(())
}
