//! Canned eAPI payloads and store seeding helpers.

use std::path::Path;

use serde_json::{Value, json};

use netsnap::snapshot::{Category, Snapshot, SnapshotIdentity, SnapshotStore};

/// `show ntp associations` body as a healthy device returns it.
#[must_use]
pub fn ntp_payload(stratum: u64) -> Value {
    json!({
        "peers": {
            "ntp1.example.net": {
                "peerIpAddr": "198.51.100.10",
                "stratumLevel": stratum,
                "reachabilityHistory": [true, true, true]
            }
        }
    })
}

/// `show vlan` body with a configurable vlan set.
#[must_use]
pub fn vlan_payload(names: &[(&str, &str)]) -> Value {
    let vlans: serde_json::Map<String, Value> = names
        .iter()
        .map(|(id, name)| ((*id).to_string(), json!({"name": name, "status": "active"})))
        .collect();
    json!({ "vlans": vlans })
}

/// Persist a payload as a snapshot with an explicit capture id.
pub fn seed_snapshot(
    root: &Path,
    category: Category,
    check: &str,
    node: &str,
    capture_id: u64,
    payload: Value,
) {
    let store = SnapshotStore::new(root);
    let snapshot = Snapshot::new(
        SnapshotIdentity::new(check, node, capture_id),
        category,
        payload,
    );
    store.save(&snapshot).expect("seed snapshot");
}
