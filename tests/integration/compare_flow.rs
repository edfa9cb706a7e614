//! Compare-flow tests: diff computation against a seeded store and the
//! canonical on-disk form of the result.

use tempfile::TempDir;

use serde_json::{Value, json};

use netsnap::diff::DiffDocument;
use netsnap::error::NetsnapError;
use netsnap::snapshot::{Category, SnapshotIdentity, SnapshotStore};

use crate::common::fixtures::{ntp_payload, seed_snapshot};
use crate::common::init_test_logging;

fn compare(store: &SnapshotStore, node: &str, before_id: u64, after_id: u64) -> DiffDocument {
    let before_payload = store.load(Category::Before, "ntp", node, before_id).unwrap();
    let after_payload = store.load(Category::After, "ntp", node, after_id).unwrap();
    DiffDocument::compute(
        SnapshotIdentity::new("ntp", node, before_id),
        SnapshotIdentity::new("ntp", node, after_id),
        &before_payload,
        &after_payload,
    )
    .unwrap()
}

#[test]
fn compare_writes_canonical_diff_document() {
    init_test_logging();
    let temp = TempDir::new().unwrap();
    seed_snapshot(temp.path(), Category::Before, "ntp", "spine1", 1000, ntp_payload(2));
    seed_snapshot(temp.path(), Category::After, "ntp", "spine1", 1060, ntp_payload(3));

    let store = SnapshotStore::new(temp.path());
    let document = compare(&store, "spine1", 1000, 1060);
    let path = store.save_diff(&document).unwrap();
    assert!(path.ends_with("diff/ntp/60_spine1.json"));

    // The stored file is strict JSON with tagged operations.
    let text = std::fs::read_to_string(&path).unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();

    let replace = &value["operations"][0]["replace"];
    assert_eq!(
        replace["path"],
        json!(["peers", "ntp1.example.net", "stratumLevel"])
    );
    assert_eq!(replace["old"], json!(2));
    assert_eq!(replace["new"], json!(3));

    // And it round-trips through the store into the same document.
    let loaded = store.load_diff("ntp", "spine1", 60).unwrap();
    assert_eq!(loaded, document);
}

#[test]
fn identical_captures_produce_empty_document() {
    init_test_logging();
    let temp = TempDir::new().unwrap();
    seed_snapshot(temp.path(), Category::Before, "ntp", "spine1", 1000, ntp_payload(2));
    seed_snapshot(temp.path(), Category::After, "ntp", "spine1", 1060, ntp_payload(2));

    let store = SnapshotStore::new(temp.path());
    let document = compare(&store, "spine1", 1000, 1060);
    assert!(document.is_empty());

    let path = store.save_diff(&document).unwrap();
    let value: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(value["operations"], json!([]));
}

#[test]
fn missing_snapshot_is_reported_not_crashed() {
    init_test_logging();
    let temp = TempDir::new().unwrap();
    let store = SnapshotStore::new(temp.path());

    let err = store
        .load(Category::Before, "ntp", "spine1", 1000)
        .unwrap_err();
    assert!(matches!(
        err,
        NetsnapError::SnapshotNotFound {
            capture_id: 1000,
            ..
        }
    ));
    assert!(err.is_user_recoverable());
}

#[test]
fn ordering_violation_rejected_before_any_diffing() {
    init_test_logging();
    let err = DiffDocument::compute(
        SnapshotIdentity::new("ntp", "spine1", 1060),
        SnapshotIdentity::new("ntp", "spine1", 1000),
        &ntp_payload(2),
        &ntp_payload(3),
    )
    .unwrap_err();
    assert!(matches!(err, NetsnapError::IdentityOrdering { .. }));
}
