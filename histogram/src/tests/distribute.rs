use crate::{HistError, SliceAssignment};

fn assert_prefix_sums(slices: &SliceAssignment, num_values: usize) {
    assert_eq!(slices.total(), num_values);
    let mut expected = 0;
    for (len, offset) in slices.lengths().iter().zip(slices.offsets()) {
        assert_eq!(*offset, expected);
        expected += len;
    }
}

#[test]
fn test_round_robin_by_class() {
    // 5 classes of 4 values over 2 workers: classes 0, 2, 4 -> worker 0; 1, 3 -> worker 1
    let slices = SliceAssignment::new(20, 5, 2).unwrap();
    assert_eq!(slices.lengths(), &[12, 8]);
    assert_eq!(slices.offsets(), &[0, 12]);
    assert_eq!(slices.range(1), 12..20);
}

#[test]
fn test_more_workers_than_classes() {
    let slices = SliceAssignment::new(12, 3, 5).unwrap();
    assert_eq!(slices.lengths(), &[4, 4, 4, 0, 0]);
    assert_eq!(slices.offsets(), &[0, 4, 8, 12, 12]);
}

#[test]
fn test_single_worker_gets_everything() {
    let slices = SliceAssignment::new(12, 3, 1).unwrap();
    assert_eq!(slices.lengths(), &[12]);
    assert_eq!(slices.offsets(), &[0]);
}

#[test]
fn test_lengths_sum_to_total() {
    for num_classes in 1..=12 {
        for num_workers in 1..=9 {
            let num_values = num_classes * 7;
            let slices = SliceAssignment::new(num_values, num_classes, num_workers).unwrap();
            assert_eq!(slices.num_workers(), num_workers);
            assert_prefix_sums(&slices, num_values);
        }
    }
}

#[test]
fn test_not_divisible_rejected() {
    assert!(matches!(
        SliceAssignment::new(10, 3, 2),
        Err(HistError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_zero_workers_or_classes_rejected() {
    assert!(SliceAssignment::new(12, 3, 0).is_err());
    assert!(SliceAssignment::new(12, 0, 2).is_err());
}
