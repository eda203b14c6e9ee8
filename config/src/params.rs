use std::io::{Read, Write};

use serdes::{SerdeResult, WireSerde};

use crate::{ConfigError, ConfigResult};

pub type Value = i64;

/// Closed range `[min, max]` every generated value is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueDomain {
    pub min: Value,
    pub max: Value,
}

impl Default for ValueDomain {
    fn default() -> Self {
        Self {
            min: Self::MIN_NUM,
            max: Self::MAX_NUM,
        }
    }
}

impl ValueDomain {
    pub const MIN_NUM: Value = 1;
    pub const MAX_NUM: Value = 1000;

    pub fn new(min: Value, max: Value) -> ConfigResult<Self> {
        let domain = Self { min, max };
        domain.validate()?;
        Ok(domain)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.min > self.max {
            return Err(ConfigError::Invalid(format!(
                "domain minimum {} is greater than maximum {}",
                self.min, self.max
            )));
        }
        // the top bin is [.., max + 1)
        if self.max == Value::MAX {
            return Err(ConfigError::Invalid(format!(
                "domain maximum must be below {}",
                Value::MAX
            )));
        }
        // the span must fit in a Value as well
        if self.max.checked_sub(self.min).is_none() {
            return Err(ConfigError::Invalid(format!(
                "domain [{}, {}] is too wide",
                self.min, self.max
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn contains(&self, v: Value) -> bool {
        self.min <= v && v <= self.max
    }

    /// `max - min`, the quantity the class width is derived from
    #[inline]
    pub fn range(&self) -> Value {
        self.max - self.min
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParams {
    // number of values in the dataset
    pub num_values: usize,
    // number of classes (bins) the domain is split into
    pub num_classes: usize,
    pub domain: ValueDomain,
    // seed of the dataset generator
    pub seed: u64,
    // also gather which class every value fell into
    pub list_values: bool,
}

impl RunParams {
    pub const DEFAULT_SEED: u64 = 114514;

    pub fn new(num_values: usize, num_classes: usize) -> Self {
        Self {
            num_values,
            num_classes,
            domain: ValueDomain::default(),
            seed: Self::DEFAULT_SEED,
            list_values: false,
        }
    }

    pub fn with_domain(mut self, domain: ValueDomain) -> Self {
        self.domain = domain;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_list_values(mut self, list_values: bool) -> Self {
        self.list_values = list_values;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.num_values == 0 {
            return Err(ConfigError::Invalid(
                "number of values must be positive".to_string(),
            ));
        }
        if self.num_classes == 0 {
            return Err(ConfigError::Invalid(
                "number of classes must be positive".to_string(),
            ));
        }
        self.domain.validate()
    }

    pub fn to_bytes(&self) -> ConfigResult<Vec<u8>> {
        let mut bytes = Vec::with_capacity(Self::SERIALIZED_SIZE);
        self.serialize_into(&mut bytes)?;
        Ok(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> ConfigResult<Self> {
        if bytes.len() != Self::SERIALIZED_SIZE {
            return Err(ConfigError::Invalid(format!(
                "run parameters occupy {} bytes, got {}",
                Self::SERIALIZED_SIZE,
                bytes.len()
            )));
        }
        Ok(Self::deserialize_from(bytes)?)
    }
}

impl WireSerde for RunParams {
    const SERIALIZED_SIZE: usize = usize::SERIALIZED_SIZE * 2
        + Value::SERIALIZED_SIZE * 2
        + u64::SERIALIZED_SIZE
        + bool::SERIALIZED_SIZE;

    fn serialize_into<W: Write>(&self, mut writer: W) -> SerdeResult<()> {
        self.num_values.serialize_into(&mut writer)?;
        self.num_classes.serialize_into(&mut writer)?;
        self.domain.min.serialize_into(&mut writer)?;
        self.domain.max.serialize_into(&mut writer)?;
        self.seed.serialize_into(&mut writer)?;
        self.list_values.serialize_into(&mut writer)
    }

    fn deserialize_from<R: Read>(mut reader: R) -> SerdeResult<Self> {
        let num_values = usize::deserialize_from(&mut reader)?;
        let num_classes = usize::deserialize_from(&mut reader)?;
        let min = Value::deserialize_from(&mut reader)?;
        let max = Value::deserialize_from(&mut reader)?;
        let seed = u64::deserialize_from(&mut reader)?;
        let list_values = bool::deserialize_from(&mut reader)?;
        Ok(Self {
            num_values,
            num_classes,
            domain: ValueDomain { min, max },
            seed,
            list_values,
        })
    }
}
