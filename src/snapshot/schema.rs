//! Snapshot data types: categories, identities and captured payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{NetsnapError, Result};

/// Storage category a snapshot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Captured before the configuration change.
    Before,
    /// Captured after the configuration change.
    After,
    /// A computed diff between a before and an after capture.
    Diff,
}

impl Category {
    /// Directory name under the storage root.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
            Self::Diff => "diff",
        }
    }

    /// All categories, in storage-layout order.
    pub const fn all() -> [Self; 3] {
        [Self::Before, Self::After, Self::Diff]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = NetsnapError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            "diff" => Ok(Self::Diff),
            other => Err(NetsnapError::Other(format!("unknown category: {other}"))),
        }
    }
}

/// Identity of one capture: which check, which device, which point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotIdentity {
    /// Name of the operational check (e.g. "ntp", "bgp_ipv4").
    pub check: String,
    /// Inventory name of the target device.
    pub node: String,
    /// Monotonically increasing capture id; wall-clock seconds at capture
    /// time. Two captures within the same second collide and overwrite.
    pub capture_id: u64,
}

impl SnapshotIdentity {
    pub fn new(check: impl Into<String>, node: impl Into<String>, capture_id: u64) -> Self {
        Self {
            check: check.into(),
            node: node.into(),
            capture_id,
        }
    }

    /// File stem for this identity inside its check directory.
    pub fn file_stem(&self) -> String {
        format!("{}_{}", self.capture_id, self.node)
    }

    /// Validate that `before` was captured strictly earlier than `after`.
    ///
    /// A violation is a usage error and is never silently corrected.
    pub fn ensure_ordered(before: &Self, after: &Self) -> Result<()> {
        if before.capture_id < after.capture_id {
            Ok(())
        } else {
            Err(NetsnapError::IdentityOrdering {
                before: before.capture_id,
                after: after.capture_id,
            })
        }
    }
}

impl std::fmt::Display for SnapshotIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}@{}", self.check, self.node, self.capture_id)
    }
}

/// A captured payload together with its identity and category.
///
/// Immutable once persisted; retention is caller-managed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub identity: SnapshotIdentity,
    pub category: Category,
    /// Capture wall-clock time; the capture id is this instant in seconds.
    pub captured_at: DateTime<Utc>,
    /// The structured result returned by the device.
    pub payload: Value,
}

impl Snapshot {
    /// Create a snapshot with an explicit identity.
    pub fn new(identity: SnapshotIdentity, category: Category, payload: Value) -> Self {
        let captured_at = DateTime::from_timestamp(i64::try_from(identity.capture_id).unwrap_or(0), 0)
            .unwrap_or_else(Utc::now);
        Self {
            identity,
            category,
            captured_at,
            payload,
        }
    }

    /// Create a snapshot captured now, deriving the capture id from the
    /// current wall clock.
    pub fn capture(
        check: impl Into<String>,
        node: impl Into<String>,
        category: Category,
        payload: Value,
    ) -> Self {
        let captured_at = Utc::now();
        let capture_id = u64::try_from(captured_at.timestamp()).unwrap_or(0);
        Self {
            identity: SnapshotIdentity::new(check, node, capture_id),
            category,
            captured_at,
            payload,
        }
    }
}

/// Summary of one stored snapshot, for listings.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotSummary {
    pub category: Category,
    pub check: String,
    pub node: String,
    pub capture_id: u64,
    pub size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_round_trip() {
        for category in Category::all() {
            let parsed: Category = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
        assert!("bogus".parse::<Category>().is_err());
    }

    #[test]
    fn test_file_stem() {
        let identity = SnapshotIdentity::new("ntp", "spine1", 1_584_950_400);
        assert_eq!(identity.file_stem(), "1584950400_spine1");
    }

    #[test]
    fn test_ensure_ordered() {
        let before = SnapshotIdentity::new("ntp", "spine1", 10);
        let after = SnapshotIdentity::new("ntp", "spine1", 20);
        assert!(SnapshotIdentity::ensure_ordered(&before, &after).is_ok());

        let err = SnapshotIdentity::ensure_ordered(&after, &before).unwrap_err();
        assert!(matches!(
            err,
            NetsnapError::IdentityOrdering {
                before: 20,
                after: 10
            }
        ));

        // Equal ids are a usage error too.
        assert!(SnapshotIdentity::ensure_ordered(&before, &before).is_err());
    }

    #[test]
    fn test_capture_derives_id_from_clock() {
        let snapshot = Snapshot::capture("ntp", "spine1", Category::Before, json!({}));
        assert_eq!(
            snapshot.identity.capture_id,
            u64::try_from(snapshot.captured_at.timestamp()).unwrap()
        );
        assert_eq!(snapshot.category, Category::Before);
    }

    #[test]
    fn test_category_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Category::Before).unwrap(), "\"before\"");
        assert_eq!(serde_json::to_string(&Category::Diff).unwrap(), "\"diff\"");
    }
}
