//! Human-mode end-to-end tests.

use predicates::prelude::*;

use netsnap::snapshot::Category;

use crate::common::cli::CliRunner;
use crate::common::fixtures::{ntp_payload, seed_snapshot};

#[test]
fn checks_lists_registry_entries() {
    let cli = CliRunner::new();
    cli.cmd()
        .arg("checks")
        .assert()
        .success()
        .stdout(predicate::str::contains("ntp"))
        .stdout(predicate::str::contains("show ntp associations"));
}

#[test]
fn checks_group_filter() {
    let cli = CliRunner::new();
    cli.cmd()
        .args(["checks", "--group", "mgmt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ntp"))
        .stdout(predicate::str::contains("snmp"))
        .stdout(predicate::str::contains("vlan").not());
}

#[test]
fn snapshots_empty_store() {
    let cli = CliRunner::new();
    cli.cmd()
        .arg("snapshots")
        .assert()
        .success()
        .stdout(predicate::str::contains("No snapshots stored"));
}

#[test]
fn unknown_check_fails_with_hint() {
    let cli = CliRunner::new();
    cli.cmd()
        .args(["before", "--node", "spine1", "--check", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown check: bogus"))
        .stderr(predicate::str::contains("netsnap checks"));
}

#[test]
fn capture_without_selection_fails() {
    let cli = CliRunner::new();
    cli.cmd()
        .args(["before", "--node", "spine1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no checks selected"));
}

#[test]
fn compare_seeded_store_end_to_end() {
    let cli = CliRunner::new();
    seed_snapshot(
        cli.storage_root(),
        Category::Before,
        "ntp",
        "spine1",
        1000,
        ntp_payload(2),
    );
    seed_snapshot(
        cli.storage_root(),
        Category::After,
        "ntp",
        "spine1",
        1060,
        ntp_payload(3),
    );

    cli.cmd()
        .args([
            "compare", "--node", "spine1", "--check", "ntp", "--before-id", "1000", "--after-id",
            "1060",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("changed"))
        .stdout(predicate::str::contains("stratumLevel"));

    assert!(
        cli.storage_root()
            .join("diff/ntp/60_spine1.json")
            .is_file()
    );

    // The stored snapshots are now discoverable by id.
    cli.cmd()
        .arg("snapshots")
        .assert()
        .success()
        .stdout(predicate::str::contains("1000"))
        .stdout(predicate::str::contains("1060"));
}

#[test]
fn identical_captures_compare_as_unchanged() {
    let cli = CliRunner::new();
    seed_snapshot(
        cli.storage_root(),
        Category::Before,
        "ntp",
        "spine1",
        1000,
        ntp_payload(2),
    );
    seed_snapshot(
        cli.storage_root(),
        Category::After,
        "ntp",
        "spine1",
        1060,
        ntp_payload(2),
    );

    cli.cmd()
        .args([
            "compare", "--node", "spine1", "--check", "ntp", "--before-id", "1000", "--after-id",
            "1060",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("unchanged"));
}
