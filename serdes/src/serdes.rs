use std::io::{Read, Write};

use crate::{wire_serde_for_number, SerdeError, SerdeResult};

/// Fixed-size encoding for everything that crosses a worker boundary.
///
/// Every value of a type occupies exactly `SERIALIZED_SIZE` bytes, so a receiver that knows
/// the element count also knows the byte count of a slice. Collectives rely on this to size
/// receive buffers without a length prefix.
pub trait WireSerde: Sized {
    const SERIALIZED_SIZE: usize;

    /// serialize self into bytes
    fn serialize_into<W: Write>(&self, writer: W) -> SerdeResult<()>;

    /// deserialize bytes into self
    fn deserialize_from<R: Read>(reader: R) -> SerdeResult<Self>;
}

wire_serde_for_number!(u8, 1);
wire_serde_for_number!(u32, 4);
wire_serde_for_number!(u64, 8);
wire_serde_for_number!(i64, 8);
wire_serde_for_number!(f64, 8);

// usize is always 8 bytes on the wire so that ranks with different pointer widths agree
impl WireSerde for usize {
    const SERIALIZED_SIZE: usize = 8;

    fn serialize_into<W: Write>(&self, writer: W) -> SerdeResult<()> {
        (*self as u64).serialize_into(writer)
    }

    fn deserialize_from<R: Read>(reader: R) -> SerdeResult<Self> {
        let v = u64::deserialize_from(reader)?;
        usize::try_from(v).map_err(|_| SerdeError::DeserializeError)
    }
}

impl WireSerde for bool {
    const SERIALIZED_SIZE: usize = 1;

    fn serialize_into<W: Write>(&self, writer: W) -> SerdeResult<()> {
        (*self as u8).serialize_into(writer)
    }

    fn deserialize_from<R: Read>(mut reader: R) -> SerdeResult<Self> {
        match u8::deserialize_from(&mut reader)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(SerdeError::DeserializeError),
        }
    }
}

impl<T1: WireSerde, T2: WireSerde> WireSerde for (T1, T2) {
    const SERIALIZED_SIZE: usize = T1::SERIALIZED_SIZE + T2::SERIALIZED_SIZE;

    fn serialize_into<W: Write>(&self, mut writer: W) -> SerdeResult<()> {
        self.0.serialize_into(&mut writer)?;
        self.1.serialize_into(&mut writer)?;
        Ok(())
    }

    fn deserialize_from<R: Read>(mut reader: R) -> SerdeResult<Self> {
        let t1 = T1::deserialize_from(&mut reader)?;
        let t2 = T2::deserialize_from(&mut reader)?;
        Ok((t1, t2))
    }
}

/// Encode a slice back to back, no length prefix.
pub fn serialize_slice<T: WireSerde>(values: &[T]) -> SerdeResult<Vec<u8>> {
    let mut bytes = Vec::with_capacity(values.len() * T::SERIALIZED_SIZE);
    for v in values {
        v.serialize_into(&mut bytes)?;
    }
    Ok(bytes)
}

/// Inverse of [`serialize_slice`]; the element count is implied by the buffer length.
pub fn deserialize_vec<T: WireSerde>(bytes: &[u8]) -> SerdeResult<Vec<T>> {
    if T::SERIALIZED_SIZE == 0 || bytes.len() % T::SERIALIZED_SIZE != 0 {
        return Err(SerdeError::MisalignedBuffer {
            len: bytes.len(),
            elem_size: T::SERIALIZED_SIZE,
        });
    }

    let mut reader = bytes;
    (0..bytes.len() / T::SERIALIZED_SIZE)
        .map(|_| T::deserialize_from(&mut reader))
        .collect()
}
