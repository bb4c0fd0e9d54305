//! Range and distribution tests for derived draws
//!
//! Every bounded draw must stay in range and be free of modulo bias.

use legacy_random_core::{create, BitSource, RandomError};
use proptest::prelude::*;

const DRAWS: usize = 100_000;

fn chi_square(counts: &[u64], draws: usize) -> f64 {
    let expected = draws as f64 / counts.len() as f64;
    counts
        .iter()
        .map(|&observed| {
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

#[test]
fn test_bounded_matches_reference_values() {
    let rng = create(42);
    let values: Vec<i32> = (0..8).map(|_| rng.next_int_bounded(10).unwrap()).collect();
    assert_eq!(values, vec![0, 3, 8, 4, 0, 5, 5, 8]);
}

#[test]
fn test_power_of_two_bound_matches_reference_values() {
    let rng = create(42);
    let values: Vec<i32> = (0..8).map(|_| rng.next_int_bounded(16).unwrap()).collect();
    assert_eq!(values, vec![11, 0, 10, 0, 4, 15, 4, 11]);
}

#[test]
fn test_bounded_range_invariant() {
    let rng = create(2024);
    for bound in [1, 2, 3, 7, 10, 16, 100, 1000, 1 << 30, i32::MAX] {
        for _ in 0..DRAWS / 10 {
            let v = rng.next_int_bounded(bound).unwrap();
            assert!(v >= 0 && v < bound, "Value {} out of range [0, {})", v, bound);
        }
    }
}

#[test]
fn test_bounded_chi_square() {
    // Thresholds sit far above the 99.999th percentile of each distribution
    for (bound, threshold) in [(7, 45.0), (10, 50.0), (16, 65.0), (100, 200.0)] {
        let rng = create(bound as i64 * 7919);
        let mut counts = vec![0u64; bound as usize];
        for _ in 0..DRAWS {
            counts[rng.next_int_bounded(bound).unwrap() as usize] += 1;
        }
        let statistic = chi_square(&counts, DRAWS);
        assert!(
            statistic < threshold,
            "chi-square {} for bound {} exceeds {}",
            statistic,
            bound,
            threshold
        );
    }
}

#[test]
fn test_next_double_in_unit_interval() {
    let rng = create(12345);
    for _ in 0..DRAWS {
        let val = rng.next_double();
        assert!(
            (0.0..1.0).contains(&val),
            "next_double() produced value {} outside [0.0, 1.0)",
            val
        );
    }
}

#[test]
fn test_next_float_in_unit_interval() {
    let rng = create(54321);
    for _ in 0..DRAWS {
        let val = rng.next_float();
        assert!(
            (0.0..1.0).contains(&val),
            "next_float() produced value {} outside [0.0, 1.0)",
            val
        );
    }
}

#[test]
fn test_between_inclusive_covers_both_ends() {
    let rng = create(6);
    let mut seen = [false; 6];
    for _ in 0..1000 {
        let die = rng.next_int_between_inclusive(1, 6).unwrap();
        assert!((1..=6).contains(&die));
        seen[(die - 1) as usize] = true;
    }
    assert!(seen.iter().all(|&s| s), "Some faces never rolled: {:?}", seen);
}

#[test]
fn test_between_exclusive_negative_range() {
    let rng = create(8);
    for _ in 0..1000 {
        let v = rng.next_int_between(-10, -5).unwrap();
        assert!((-10..-5).contains(&v));
    }
}

#[test]
fn test_invalid_arguments_rejected() {
    let rng = create(1);
    assert_eq!(
        rng.next_int_bounded(0),
        Err(RandomError::NonPositiveBound { bound: 0 })
    );
    assert_eq!(
        rng.next_int_between(3, 3),
        Err(RandomError::EmptyRange { lower: 3, upper: 3 })
    );
    assert_eq!(
        rng.next_int_between(4, 3),
        Err(RandomError::EmptyRange { lower: 4, upper: 3 })
    );
    assert!(rng.next_int_between_inclusive(4, 3).is_err());
    // Span overflows i32: rejected rather than clamped
    assert!(rng.next_int_between(i32::MIN, i32::MAX).is_err());
}

#[test]
fn test_invalid_arguments_do_not_advance_state() {
    let rng = create(1);
    let before = rng.state();
    let _ = rng.next_int_bounded(-3);
    let _ = rng.next_int_between(9, 2);
    assert_eq!(rng.state(), before);
}

#[test]
fn test_triangle_stays_within_spread() {
    let rng = create(10);
    for _ in 0..10_000 {
        let v = rng.triangle(5.0, 2.0);
        assert!(v > 3.0 && v < 7.0, "triangle produced {}", v);
    }
}

#[test]
fn test_boolean_is_balanced() {
    let rng = create(99);
    let trues = (0..DRAWS).filter(|_| rng.next_boolean()).count();
    let fraction = trues as f64 / DRAWS as f64;
    assert!((fraction - 0.5).abs() < 0.01, "true fraction {}", fraction);
}

proptest! {
    #[test]
    fn prop_bounded_in_range(seed in any::<i64>(), bound in 1i32..=i32::MAX) {
        let rng = create(seed);
        for _ in 0..16 {
            let v = rng.next_int_bounded(bound).unwrap();
            prop_assert!(v >= 0 && v < bound);
        }
    }

    #[test]
    fn prop_between_in_range(seed in any::<i64>(), lower in -1_000_000i32..1_000_000, span in 1i32..1_000_000) {
        let rng = create(seed);
        let upper = lower + span;
        let v = rng.next_int_between(lower, upper).unwrap();
        prop_assert!(v >= lower && v < upper);
        let w = rng.next_int_between_inclusive(lower, upper).unwrap();
        prop_assert!(w >= lower && w <= upper);
    }
}
