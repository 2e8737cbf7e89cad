//! Tests for row keys

use core_kernel::{CoverageId, PersonId, PolicyId};
use uuid::Uuid;

#[test]
fn test_keys_are_v7() {
    let key = PolicyId::new_v7();
    assert_eq!(key.as_uuid().get_version_num(), 7);
}

#[test]
fn test_later_keys_sort_after_earlier_ones() {
    let first = CoverageId::new_v7();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let second = CoverageId::new_v7();

    assert!(first.as_uuid() < second.as_uuid());
}

#[test]
fn test_uuid_round_trip() {
    let uuid = Uuid::now_v7();
    let key = PolicyId::from(uuid);
    let back: Uuid = key.into();

    assert_eq!(back, uuid);
}

#[test]
fn test_serializes_as_bare_uuid() {
    let key = PersonId::new_v7();
    let json = serde_json::to_string(&key).unwrap();

    assert_eq!(json, format!("\"{}\"", key.as_uuid()));
    assert_eq!(serde_json::from_str::<PersonId>(&json).unwrap(), key);
}
