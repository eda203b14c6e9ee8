use config::{Value, ValueDomain};

use crate::{HistError, HistResult};

/// Half-open class interval `[lo, hi)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bin {
    pub lo: Value,
    pub hi: Value,
}

impl Bin {
    #[inline(always)]
    pub fn contains(&self, v: Value) -> bool {
        self.lo <= v && v < self.hi
    }

    #[inline]
    pub fn width(&self) -> Value {
        self.hi - self.lo
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lo >= self.hi
    }
}

/// The classes a value domain is split into.
///
/// All classes but the last are `width = ceil((max - min) / num_classes)` wide, starting at
/// `min`; the last one ends at `max + 1` so that `max` itself is covered. Bounds are clamped
/// to `max + 1`: when the rounded-up width overshoots the domain, the trailing classes are
/// empty rather than inverted. The classes are therefore always contiguous, disjoint and
/// cover exactly `[min, max + 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bins {
    domain: ValueDomain,
    width: Value,
    bins: Vec<Bin>,
}

impl Bins {
    pub fn new(num_classes: usize, domain: ValueDomain) -> HistResult<Self> {
        if num_classes == 0 {
            return Err(HistError::InvalidConfiguration(
                "number of classes must be positive".to_string(),
            ));
        }
        domain.validate()?;
        let n = Value::try_from(num_classes).map_err(|_| {
            HistError::InvalidConfiguration(format!("{num_classes} classes is too many"))
        })?;

        let range = domain.range();
        let width = range / n + Value::from(range % n != 0);
        let top = domain.max + 1;
        let bound = |i: Value| domain.min.saturating_add(i.saturating_mul(width)).min(top);

        let bins = (0..n)
            .map(|i| Bin {
                lo: bound(i),
                hi: if i == n - 1 { top } else { bound(i + 1) },
            })
            .collect::<Vec<_>>();

        log::debug!(
            "{} classes of width {} over [{}, {}]",
            num_classes,
            width,
            domain.min,
            domain.max
        );
        Ok(Self {
            domain,
            width,
            bins,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    #[inline]
    pub fn get(&self, class: usize) -> Option<&Bin> {
        self.bins.get(class)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Bin> {
        self.bins.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Bin] {
        &self.bins
    }

    #[inline]
    pub fn domain(&self) -> ValueDomain {
        self.domain
    }

    /// Width of every class but (possibly) the last
    #[inline]
    pub fn width(&self) -> Value {
        self.width
    }
}

impl<'a> IntoIterator for &'a Bins {
    type Item = &'a Bin;
    type IntoIter = std::slice::Iter<'a, Bin>;

    fn into_iter(self) -> Self::IntoIter {
        self.bins.iter()
    }
}
