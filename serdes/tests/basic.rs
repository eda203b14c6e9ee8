use std::fmt::Debug;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serdes::{deserialize_vec, serialize_slice, SerdeError, WireSerde};

fn test_serialize_deserialize_helper<T: WireSerde + Debug + PartialEq>(obj: T) {
    let mut buf = Vec::new();
    obj.serialize_into(&mut buf).unwrap();
    assert_eq!(buf.len(), T::SERIALIZED_SIZE);
    let deserialized_obj = T::deserialize_from(&buf[..]).unwrap();
    assert_eq!(obj, deserialized_obj);
}

#[test]
fn test_numbers_have_fixed_width() {
    test_serialize_deserialize_helper(-42i64);
    test_serialize_deserialize_helper(usize::MAX >> 1);
    test_serialize_deserialize_helper((7u64, 0.25f64));
    test_serialize_deserialize_helper(true);
}

#[test]
fn test_slice_encoding_is_little_endian_and_unprefixed() {
    let bytes = serialize_slice(&[1u32, 256u32]).unwrap();
    assert_eq!(bytes, vec![1, 0, 0, 0, 0, 1, 0, 0]);
}

#[test]
fn test_random_slice() {
    let mut rng = ChaCha12Rng::seed_from_u64(1);
    let values: Vec<i64> = (0..1000).map(|_| rng.gen_range(-1000..=1000)).collect();
    let bytes = serialize_slice(&values).unwrap();
    assert_eq!(deserialize_vec::<i64>(&bytes).unwrap(), values);
}

#[test]
fn test_misaligned_buffer_rejected() {
    let err = deserialize_vec::<u64>(&[0u8; 12]).unwrap_err();
    assert!(matches!(
        err,
        SerdeError::MisalignedBuffer {
            len: 12,
            elem_size: 8
        }
    ));
}

#[test]
fn test_invalid_bool_rejected() {
    assert!(matches!(
        bool::deserialize_from(&[2u8][..]),
        Err(SerdeError::DeserializeError)
    ));
}

#[test]
fn test_empty_slice() {
    let bytes = serialize_slice::<f64>(&[]).unwrap();
    assert!(bytes.is_empty());
    assert!(deserialize_vec::<f64>(&bytes).unwrap().is_empty());
}
