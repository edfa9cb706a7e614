//! Snapshot identity and persistence.
//!
//! A snapshot is one check's structured result for one device at one point
//! in time. Snapshots live in a hierarchical namespace on disk:
//!
//! ```text
//! <storage root>/
//! ├── before/
//! │   └── ntp/
//! │       └── 1584950400_spine1.json
//! ├── after/
//! │   └── ntp/
//! │       └── 1584950460_spine1.json
//! └── diff/
//!     └── ntp/
//!         └── 60_spine1.json        # after id minus before id
//! ```
//!
//! File content is the canonical JSON serialization of the captured payload
//! (`before`/`after`) or of the diff document (`diff`).

mod schema;
mod store;

pub use schema::{Category, Snapshot, SnapshotIdentity, SnapshotSummary};
pub use store::SnapshotStore;
