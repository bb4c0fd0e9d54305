//! Checkpoint Tests - Save/Load Engine State
//!
//! Critical invariants tested:
//! - Determinism: a restored engine continues the exact stream
//! - Gaussian pairing survives a save/load between the two halves
//! - Malformed registers are rejected
//! - Snapshots only restore into the update strategy that produced them

use legacy_random_core::rng::SnapshotError;
use legacy_random_core::{
    create, BitSource, RandomSnapshot, RandomSource, SingleThreadedRandom, ThreadSafeRandom,
};

#[test]
fn test_restore_continues_stream() {
    let original = create(12345);
    original.consume_count(10);

    let snapshot = original.snapshot();
    let restored = SingleThreadedRandom::restore(&snapshot).unwrap();

    for _ in 0..100 {
        assert_eq!(original.next_int(), restored.next_int());
    }
}

#[test]
fn test_json_round_trip_per_variant() {
    let single = create(8);
    single.consume_count(3);
    let snapshot = RandomSnapshot::from_json(&single.snapshot().to_json().unwrap()).unwrap();
    assert_eq!(snapshot.variant, "single_threaded");
    let restored = SingleThreadedRandom::restore(&snapshot).unwrap();
    assert_eq!(restored.state(), single.state());
    assert_eq!(restored.next_long(), single.next_long());

    let shared = ThreadSafeRandom::new(8);
    shared.consume_count(3);
    let snapshot = RandomSnapshot::from_json(&shared.snapshot().to_json().unwrap()).unwrap();
    assert_eq!(snapshot.variant, "thread_safe");
    let restored = ThreadSafeRandom::restore(&snapshot).unwrap();
    assert_eq!(restored.state(), shared.state());
    assert_eq!(restored.next_long(), shared.next_long());
}

#[test]
fn test_restore_into_other_variant_rejected() {
    let snapshot = ThreadSafeRandom::new(5).snapshot();
    match SingleThreadedRandom::restore(&snapshot) {
        Err(SnapshotError::VariantMismatch { expected, found }) => {
            assert_eq!(expected, "single_threaded");
            assert_eq!(found, "thread_safe");
        }
        other => panic!("expected variant mismatch, got {other:?}"),
    }

    let snapshot = create(5).snapshot();
    assert!(matches!(
        ThreadSafeRandom::restore(&snapshot),
        Err(SnapshotError::VariantMismatch { .. })
    ));
}

#[test]
fn test_unknown_variant_rejected() {
    let snapshot =
        RandomSnapshot::from_json(r#"{"variant": "xorshift", "state": 1}"#).unwrap();
    assert!(matches!(
        SingleThreadedRandom::restore(&snapshot),
        Err(SnapshotError::VariantMismatch { .. })
    ));
}

#[test]
fn test_pending_gaussian_survives_restore() {
    let mut original = create(4);
    original.next_gaussian();
    let snapshot = original.snapshot();
    assert!(snapshot.cached_gaussian.is_some());

    let mut restored = SingleThreadedRandom::restore(&snapshot).unwrap();
    assert_eq!(original.next_gaussian(), restored.next_gaussian());
    assert_eq!(original.next_gaussian(), restored.next_gaussian());
}

#[test]
fn test_missing_gaussian_field_defaults_to_empty() {
    let snapshot =
        RandomSnapshot::from_json(r#"{"variant": "thread_safe", "state": 25214903917}"#).unwrap();
    assert_eq!(snapshot.cached_gaussian, None);
    let restored = ThreadSafeRandom::restore(&snapshot).unwrap();
    assert_eq!(restored.next_int(), create(0).next_int());
}

#[test]
fn test_wide_register_rejected() {
    let snapshot = RandomSnapshot {
        variant: "single_threaded".to_string(),
        state: u64::MAX,
        cached_gaussian: None,
    };
    assert!(matches!(
        SingleThreadedRandom::restore(&snapshot),
        Err(SnapshotError::StateOutOfRange { state: u64::MAX })
    ));
}

#[test]
fn test_malformed_json_rejected() {
    assert!(matches!(
        RandomSnapshot::from_json("{\"state\": "),
        Err(SnapshotError::Json(_))
    ));
}
