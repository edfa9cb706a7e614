//! Integration tests for the netsnap CLI.
//!
//! These tests verify component interactions without a reachable device,
//! using the mock command channel and a temporary storage root.
//!
//! # Modules
//!
//! - `capture_flow`: capture runs over the mock channel into the store
//! - `compare_flow`: diff computation and canonical persistence

#[path = "common/mod.rs"]
mod common;

#[path = "integration/capture_flow.rs"]
mod capture_flow;

#[path = "integration/compare_flow.rs"]
mod compare_flow;
