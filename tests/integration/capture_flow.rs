//! Capture-flow tests: checks run over a mock channel and land in the store.

use tempfile::TempDir;

use netsnap::checks;
use netsnap::device::MockChannel;
use netsnap::snapshot::{Category, Snapshot, SnapshotStore};

use crate::common::fixtures::{ntp_payload, vlan_payload};
use crate::common::init_test_logging;

#[test]
fn capture_persists_selected_checks() {
    init_test_logging();
    let temp = TempDir::new().unwrap();
    let store = SnapshotStore::new(temp.path());

    let mock = MockChannel::new("spine1")
        .with_response("show ntp associations", ntp_payload(2))
        .with_response("show vlan", vlan_payload(&[("100", "servers")]));

    let selected = checks::select(&["ntp".to_string(), "vlan".to_string()], None).unwrap();
    for check in selected {
        let payload = checks::run(check, &mock).unwrap();
        let snapshot = Snapshot::capture(check.name, "spine1", Category::Before, payload);
        store.save(&snapshot).unwrap();
    }

    mock.assert_executed(&["show ntp associations", "show vlan"]);

    let stored = store.list(Some(Category::Before)).unwrap();
    let checks_stored: Vec<&str> = stored.iter().map(|s| s.check.as_str()).collect();
    assert_eq!(checks_stored, vec!["ntp", "vlan"]);
}

#[test]
fn ntp_capture_stores_reshaped_lines() {
    init_test_logging();
    let temp = TempDir::new().unwrap();
    let store = SnapshotStore::new(temp.path());

    let mock = MockChannel::new("spine1").with_response("show ntp associations", ntp_payload(2));

    let check = checks::lookup("ntp").unwrap();
    let payload = checks::run(check, &mock).unwrap();
    let snapshot = Snapshot::capture("ntp", "spine1", Category::Before, payload);
    store.save(&snapshot).unwrap();

    let loaded = store
        .load(
            Category::Before,
            "ntp",
            "spine1",
            snapshot.identity.capture_id,
        )
        .unwrap();

    // The plugin flattens the association table into text lines.
    let lines = loaded.as_array().unwrap();
    assert_eq!(lines[0], "peers: ntp1.example.net\n");
    assert!(lines.iter().any(|l| l == "stratumLevel: 2\n"));
}

#[test]
fn unsupported_command_still_produces_a_snapshot() {
    init_test_logging();
    let temp = TempDir::new().unwrap();
    let store = SnapshotStore::new(temp.path());

    let mock = MockChannel::new("leaf1").with_unsupported("show interfaces vxlan 1");

    let check = checks::lookup("vxlan").unwrap();
    let payload = checks::run(check, &mock).unwrap();
    assert!(payload.is_null());

    let snapshot = Snapshot::capture("vxlan", "leaf1", Category::After, payload);
    store.save(&snapshot).unwrap();

    let loaded = store
        .load(
            Category::After,
            "vxlan",
            "leaf1",
            snapshot.identity.capture_id,
        )
        .unwrap();
    assert!(loaded.is_null());
}
