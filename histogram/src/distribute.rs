use std::ops::Range;

use crate::{HistError, HistResult};

/// How many dataset elements each worker receives, and where its slice starts.
///
/// Every class contributes `num_values / num_classes` elements, dealt out round-robin by
/// class index: classes r, r + W, r + 2W, ... are accounted to worker r. Offsets are the
/// exclusive prefix sum of the lengths, so slices are contiguous and in rank order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceAssignment {
    lengths: Vec<usize>,
    offsets: Vec<usize>,
}

impl SliceAssignment {
    pub fn new(num_values: usize, num_classes: usize, num_workers: usize) -> HistResult<Self> {
        if num_classes == 0 {
            return Err(HistError::InvalidConfiguration(
                "number of classes must be positive".to_string(),
            ));
        }
        if num_workers == 0 {
            return Err(HistError::InvalidConfiguration(
                "number of workers must be positive".to_string(),
            ));
        }
        if num_values % num_classes != 0 {
            return Err(HistError::InvalidConfiguration(format!(
                "number of values {num_values} should be evenly divisible by number of classes {num_classes}"
            )));
        }

        let class_len = num_values / num_classes;
        let lengths = (0..num_workers)
            .map(|rank| {
                let classes = num_classes / num_workers + usize::from(rank < num_classes % num_workers);
                classes * class_len
            })
            .collect::<Vec<_>>();
        let offsets = lengths
            .iter()
            .scan(0, |acc, &len| {
                let offset = *acc;
                *acc += len;
                Some(offset)
            })
            .collect::<Vec<_>>();

        log::debug!("slice lengths {:?} offsets {:?}", lengths, offsets);
        Ok(Self { lengths, offsets })
    }

    #[inline]
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    #[inline]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    #[inline]
    pub fn num_workers(&self) -> usize {
        self.lengths.len()
    }

    /// Index range of the dataset owned by `rank`
    #[inline]
    pub fn range(&self, rank: usize) -> Range<usize> {
        self.offsets[rank]..self.offsets[rank] + self.lengths[rank]
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.lengths.iter().sum()
    }
}
