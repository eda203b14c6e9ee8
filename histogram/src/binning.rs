use config::Value;
use rayon::prelude::*;

use crate::{Bins, HistError, HistResult};

/// Slices at least this long are classified on the rayon pool.
pub const PAR_THRESHOLD: usize = 1 << 14;

/// Number of values per class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Histogram {
    counts: Vec<u64>,
}

impl Histogram {
    pub fn new(num_classes: usize) -> Self {
        Self {
            counts: vec![0; num_classes],
        }
    }

    pub fn from_counts(counts: Vec<u64>) -> Self {
        Self { counts }
    }

    #[inline(always)]
    pub fn record(&mut self, class: usize) {
        self.counts[class] += 1;
    }

    /// Element-wise sum; both histograms must have the same number of classes.
    pub fn merge(&mut self, other: &Histogram) {
        assert_eq!(self.counts.len(), other.counts.len());
        self.counts
            .iter_mut()
            .zip(&other.counts)
            .for_each(|(a, b)| *a += *b);
    }

    #[inline]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Linear scan for the class containing `value`.
///
/// Classes are disjoint, so at most one can match; the first match is returned.
#[inline]
pub fn find_bin(value: Value, bins: &Bins) -> Option<usize> {
    bins.iter().position(|bin| bin.contains(value))
}

#[inline]
fn classify(value: Value, bins: &Bins) -> HistResult<usize> {
    find_bin(value, bins).ok_or(HistError::Classification { value })
}

/// Class index of every value in `values`, in order.
pub fn classify_slice(values: &[Value], bins: &Bins) -> HistResult<Vec<u64>> {
    let to_class = |&v: &Value| classify(v, bins).map(|class| class as u64);
    if values.len() >= PAR_THRESHOLD {
        values.par_iter().map(to_class).collect()
    } else {
        values.iter().map(to_class).collect()
    }
}

/// Local histogram of `values`.
pub fn bin_values(values: &[Value], bins: &Bins) -> HistResult<Histogram> {
    if values.len() < PAR_THRESHOLD {
        let mut histogram = Histogram::new(bins.len());
        for &v in values {
            histogram.record(classify(v, bins)?);
        }
        return Ok(histogram);
    }

    values
        .par_iter()
        .try_fold(
            || Histogram::new(bins.len()),
            |mut histogram, &v| -> HistResult<Histogram> {
                histogram.record(classify(v, bins)?);
                Ok(histogram)
            },
        )
        .try_reduce(
            || Histogram::new(bins.len()),
            |mut a, b| {
                a.merge(&b);
                Ok(a)
            },
        )
}

/// What one worker computes over its slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalBinning {
    pub histogram: Histogram,
    // class index of every value of the slice, when requested
    pub classes: Option<Vec<u64>>,
}

impl LocalBinning {
    pub fn run(values: &[Value], bins: &Bins, keep_classes: bool) -> HistResult<Self> {
        if !keep_classes {
            return Ok(Self {
                histogram: bin_values(values, bins)?,
                classes: None,
            });
        }

        let classes = classify_slice(values, bins)?;
        let mut histogram = Histogram::new(bins.len());
        classes
            .iter()
            .for_each(|&class| histogram.record(class as usize));
        Ok(Self {
            histogram,
            classes: Some(classes),
        })
    }
}
