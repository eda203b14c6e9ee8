use config::{Value, ValueDomain};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// Produces the dataset at the root rank.
pub trait DataSource {
    fn generate(&mut self, num_values: usize, domain: ValueDomain) -> Vec<Value>;
}

/// Uniform draws from the whole domain.
#[derive(Debug, Clone)]
pub struct RandomSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSource<ChaCha12Rng> {
    /// Same seed, same dataset
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha12Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> DataSource for RandomSource<R> {
    fn generate(&mut self, num_values: usize, domain: ValueDomain) -> Vec<Value> {
        generate_dataset(num_values, domain, &mut self.rng)
    }
}

/// A dataset given up front. Ignores the requested size and domain, so callers can feed
/// known (or deliberately bad) values through the pipeline.
#[derive(Debug, Clone, Default)]
pub struct FixedSource(pub Vec<Value>);

impl DataSource for FixedSource {
    fn generate(&mut self, _num_values: usize, _domain: ValueDomain) -> Vec<Value> {
        self.0.clone()
    }
}

pub fn generate_dataset<R: Rng>(num_values: usize, domain: ValueDomain, rng: &mut R) -> Vec<Value> {
    (0..num_values)
        .map(|_| rng.gen_range(domain.min..=domain.max))
        .collect()
}

pub fn seeded_dataset(num_values: usize, domain: ValueDomain, seed: u64) -> Vec<Value> {
    RandomSource::seeded(seed).generate(num_values, domain)
}
