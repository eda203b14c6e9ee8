use config::ValueDomain;

use crate::{Bin, Bins, HistError};

fn assert_partitions_domain(bins: &Bins) {
    let domain = bins.domain();
    assert_eq!(bins.as_slice().first().unwrap().lo, domain.min);
    assert_eq!(bins.as_slice().last().unwrap().hi, domain.max + 1);
    for pair in bins.as_slice().windows(2) {
        assert_eq!(pair[0].hi, pair[1].lo, "classes must be contiguous");
        assert!(pair[0].lo <= pair[0].hi, "classes must not be inverted");
    }
}

#[test]
fn test_three_classes_over_default_domain() {
    let bins = Bins::new(3, ValueDomain::default()).unwrap();
    assert_eq!(bins.width(), 333);
    assert_eq!(
        bins.as_slice(),
        &[
            Bin { lo: 1, hi: 334 },
            Bin { lo: 334, hi: 667 },
            Bin { lo: 667, hi: 1001 },
        ]
    );
}

#[test]
fn test_last_class_includes_max() {
    let bins = Bins::new(4, ValueDomain::default()).unwrap();
    // ceil(999 / 4) = 250
    assert_eq!(bins.width(), 250);
    assert_eq!(*bins.get(3).unwrap(), Bin { lo: 751, hi: 1001 });
    assert!(bins.get(3).unwrap().contains(1000));
    assert!(!bins.get(2).unwrap().contains(751));
}

#[test]
fn test_every_class_count_partitions_domain() {
    for num_classes in 1..=1200 {
        let bins = Bins::new(num_classes, ValueDomain::default()).unwrap();
        assert_eq!(bins.len(), num_classes);
        assert_partitions_domain(&bins);
    }
}

#[test]
fn test_overshooting_width_leaves_empty_tail() {
    // ceil(999 / 600) = 2, so classes 500.. start past the domain
    let bins = Bins::new(600, ValueDomain::default()).unwrap();
    assert_partitions_domain(&bins);
    assert_eq!(*bins.get(499).unwrap(), Bin { lo: 999, hi: 1001 });
    assert!(bins.iter().skip(500).all(Bin::is_empty));
}

#[test]
fn test_single_point_and_negative_domains() {
    let point = Bins::new(3, ValueDomain::new(7, 7).unwrap()).unwrap();
    assert_partitions_domain(&point);
    assert_eq!(point.iter().filter(|b| !b.is_empty()).count(), 1);

    let negative = Bins::new(5, ValueDomain::new(-100, -1).unwrap()).unwrap();
    assert_partitions_domain(&negative);
    assert_eq!(negative.width(), 20);
}

#[test]
fn test_zero_classes_rejected() {
    assert!(matches!(
        Bins::new(0, ValueDomain::default()),
        Err(HistError::InvalidConfiguration(_))
    ));
}
