//! Symmetric tree diff between two captured state payloads.
//!
//! The engine walks two JSON values and emits a path-addressed edit script:
//! one [`EditOp`] per location whose value differs, carrying both the old and
//! the new value so the script reads the same in either direction.
//!
//! Mappings are compared by key, sequences positionally by index. Recursion
//! only descends into same-kind composites (object into object, array into
//! array); a scalar mismatch or a kind mismatch terminates with a single
//! `Replace` for the whole subtree. Sequence elements are never matched by
//! content, so an element moved to a different index reports as a delete at
//! the old index plus an insert at the new one.

mod canon;

pub use canon::{DiffDocument, Fingerprints, fingerprint, from_json, to_json};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One step of a path into a nested payload.
///
/// Serializes untagged so a path renders as a plain JSON array mixing object
/// keys and numeric indices, e.g. `["vlans", "100", "interfaces", 2]`.
/// Index segments stay numbers on the wire; they are never coerced into
/// object-key strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Mapping key.
    Key(String),
    /// Sequence index (0-based).
    Index(u64),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<u64> for PathSegment {
    fn from(index: u64) -> Self {
        Self::Index(index)
    }
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{key}"),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// A single edit in the script transforming `before` into `after`.
///
/// Externally tagged, so each operation serializes as
/// `{"insert": {"path": [...], "value": ...}}`,
/// `{"delete": {"path": [...], "value": ...}}` or
/// `{"replace": {"path": [...], "old": ..., "new": ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOp {
    /// Value present only in `after`; path addresses its location there.
    Insert {
        path: Vec<PathSegment>,
        value: Value,
    },
    /// Value present only in `before`; path addresses its location there.
    Delete {
        path: Vec<PathSegment>,
        value: Value,
    },
    /// Value differs between the two sides at the same path.
    Replace {
        path: Vec<PathSegment>,
        old: Value,
        new: Value,
    },
}

impl EditOp {
    /// The path this operation applies at.
    pub fn path(&self) -> &[PathSegment] {
        match self {
            Self::Insert { path, .. } | Self::Delete { path, .. } | Self::Replace { path, .. } => {
                path
            }
        }
    }

    /// Dotted rendering of the path for human output.
    pub fn path_display(&self) -> String {
        let segments: Vec<String> = self.path().iter().map(ToString::to_string).collect();
        segments.join(".")
    }
}

/// Compute the symmetric edit script between two payloads.
///
/// Identical inputs yield an empty script. Operation order is deterministic:
/// per container, deletions and replacements in sorted `before`-key order
/// first, then `after`-only insertions in sorted key order, depth-first.
pub fn diff(before: &Value, after: &Value) -> Vec<EditOp> {
    let mut ops = Vec::new();
    if before != after {
        let mut path = Vec::new();
        walk(&mut ops, &mut path, before, after);
    }
    ops
}

/// Recurse into a location where the two sides are known to differ.
fn walk(ops: &mut Vec<EditOp>, path: &mut Vec<PathSegment>, before: &Value, after: &Value) {
    match (before, after) {
        (Value::Object(b), Value::Object(a)) => {
            // Key iteration is sorted explicitly so the script does not
            // depend on map implementation order.
            let mut before_keys: Vec<&String> = b.keys().collect();
            before_keys.sort();

            for key in before_keys {
                let bv = &b[key];
                path.push(PathSegment::Key(key.clone()));
                match a.get(key) {
                    None => ops.push(EditOp::Delete {
                        path: path.clone(),
                        value: bv.clone(),
                    }),
                    Some(av) if bv != av => walk(ops, path, bv, av),
                    Some(_) => {}
                }
                path.pop();
            }

            let mut after_keys: Vec<&String> = a.keys().filter(|k| !b.contains_key(*k)).collect();
            after_keys.sort();

            for key in after_keys {
                path.push(PathSegment::Key(key.clone()));
                ops.push(EditOp::Insert {
                    path: path.clone(),
                    value: a[key].clone(),
                });
                path.pop();
            }
        }
        (Value::Array(b), Value::Array(a)) => {
            let shared = b.len().min(a.len());

            for index in 0..shared {
                if b[index] != a[index] {
                    path.push(PathSegment::Index(index as u64));
                    walk(ops, path, &b[index], &a[index]);
                    path.pop();
                }
            }
            for (index, value) in b.iter().enumerate().skip(shared) {
                path.push(PathSegment::Index(index as u64));
                ops.push(EditOp::Delete {
                    path: path.clone(),
                    value: value.clone(),
                });
                path.pop();
            }
            for (index, value) in a.iter().enumerate().skip(shared) {
                path.push(PathSegment::Index(index as u64));
                ops.push(EditOp::Insert {
                    path: path.clone(),
                    value: value.clone(),
                });
                path.pop();
            }
        }
        // Scalar difference or kind mismatch: one replace, no descent.
        _ => ops.push(EditOp::Replace {
            path: path.clone(),
            old: before.clone(),
            new: after.clone(),
        }),
    }
}
