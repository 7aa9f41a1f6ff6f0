#![cfg(feature = "serde")]

//! Integration tests for serde support in likely-dense.
//!
//! A set serializes as a plain sequence of its members and deserializes by
//! inserting them one at a time, so the restored representation follows the
//! same cost model as incremental construction.

use likely_dense::{AdaptiveUnsignedSet, Representation};
use rstest::rstest;

// =============================================================================
// Serialization
// =============================================================================

#[rstest]
fn test_dense_set_serializes_in_ascending_order() {
    let set: AdaptiveUnsignedSet<u32> = [3, 1, 2].into_iter().collect();
    let json = serde_json::to_string(&set).unwrap();
    assert_eq!(json, "[1,2,3]");
}

#[rstest]
fn test_empty_set_serializes_as_empty_sequence() {
    let set: AdaptiveUnsignedSet<u64> = AdaptiveUnsignedSet::new();
    assert_eq!(serde_json::to_string(&set).unwrap(), "[]");
}

// =============================================================================
// Round Trips
// =============================================================================

#[rstest]
#[case::dense((4_000..4_100).collect::<Vec<u32>>(), Representation::Dense)]
#[case::sparse(vec![0, 1, 2, 1_000_000, 3_000_000], Representation::Sparse)]
fn test_json_roundtrip(#[case] values: Vec<u32>, #[case] representation: Representation) {
    let set: AdaptiveUnsignedSet<u32> = values.iter().copied().collect();
    assert_eq!(set.representation(), representation);

    let json = serde_json::to_string(&set).unwrap();
    let restored: AdaptiveUnsignedSet<u32> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, set);
    assert_eq!(restored.representation(), representation);
    assert_eq!(restored.check(), Ok(()));
}

#[rstest]
fn test_deserialize_collapses_duplicates() {
    let restored: AdaptiveUnsignedSet<u16> = serde_json::from_str("[5, 5, 6, 5]").unwrap();
    assert_eq!(restored.len(), 2);
    assert_eq!(restored.iter().collect::<Vec<_>>(), vec![5, 6]);
}

// =============================================================================
// Rejected Input
// =============================================================================

#[rstest]
#[case::empty_marker("[1, 255]")]
#[case::deleted_marker("[254]")]
fn test_deserialize_rejects_reserved_values(#[case] json: &str) {
    let result = serde_json::from_str::<AdaptiveUnsignedSet<u8>>(json);
    let error = result.unwrap_err();
    assert!(error.to_string().contains("reserved value"));
}

#[rstest]
fn test_deserialize_rejects_non_sequence() {
    let result = serde_json::from_str::<AdaptiveUnsignedSet<u32>>("{\"a\": 1}");
    assert!(result.is_err());
}

#[rstest]
fn test_deserialize_rejects_negative_values() {
    let result = serde_json::from_str::<AdaptiveUnsignedSet<u32>>("[1, -2]");
    assert!(result.is_err());
}
