//! Canonical serialization of diff documents.
//!
//! The edit script is a typed structure and is serialized directly with
//! serde, so the stored document is strict JSON by construction: tagged
//! operation objects, path arrays mixing strings and numbers, native boolean
//! and null literals. There is no text-level repair step anywhere.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::{EditOp, diff};
use crate::error::{NetsnapError, Result};
use crate::snapshot::SnapshotIdentity;

/// SHA-256 digests of the two input payloads, recorded so a stored diff can
/// be traced back to the exact captures it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprints {
    pub before: String,
    pub after: String,
}

/// A computed diff between two snapshots, ready for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffDocument {
    /// Identity of the `before` capture.
    pub before: SnapshotIdentity,
    /// Identity of the `after` capture.
    pub after: SnapshotIdentity,
    /// Payload digests of both inputs.
    pub fingerprints: Fingerprints,
    /// The edit script; empty when the captures are identical.
    pub operations: Vec<EditOp>,
}

impl DiffDocument {
    /// Compute the diff between two captured payloads.
    ///
    /// # Errors
    ///
    /// Returns [`NetsnapError::IdentityOrdering`] when the `before` capture
    /// id is not strictly lower than the `after` capture id.
    pub fn compute(
        before: SnapshotIdentity,
        after: SnapshotIdentity,
        before_payload: &Value,
        after_payload: &Value,
    ) -> Result<Self> {
        SnapshotIdentity::ensure_ordered(&before, &after)?;

        Ok(Self {
            fingerprints: Fingerprints {
                before: fingerprint(before_payload),
                after: fingerprint(after_payload),
            },
            operations: diff(before_payload, after_payload),
            before,
            after,
        })
    }

    /// Derived identity for the stored diff.
    ///
    /// The capture id is the duration `after - before`, which gives the diff
    /// a deterministic, sortable name distinct from either input.
    pub fn result_id(&self) -> SnapshotIdentity {
        SnapshotIdentity {
            check: self.after.check.clone(),
            node: self.after.node.clone(),
            capture_id: self.after.capture_id - self.before.capture_id,
        }
    }

    /// True when the two captures were structurally identical.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// SHA-256 digest of a payload's canonical JSON encoding, hex-encoded.
pub fn fingerprint(payload: &Value) -> String {
    let mut hasher = Sha256::new();
    // Canonical bytes: serde_json sorts object keys, so equal trees always
    // hash equally regardless of capture-time key order.
    hasher.update(serde_json::to_vec(payload).unwrap_or_default());
    hex::encode(hasher.finalize())
}

/// Serialize a diff document to its canonical pretty-printed JSON form.
pub fn to_json(document: &DiffDocument) -> Result<String> {
    serde_json::to_string_pretty(document)
        .map_err(|e| NetsnapError::Other(format!("diff document serialization failed: {e}")))
}

/// Parse a canonical diff document back from JSON.
pub fn from_json(text: &str) -> Result<DiffDocument> {
    serde_json::from_str(text).map_err(|e| NetsnapError::MalformedSnapshot {
        path: "<diff document>".to_string(),
        reason: e.to_string(),
    })
}
