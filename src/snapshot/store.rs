//! Filesystem-backed snapshot store.
//!
//! The store owns no process-wide state: its root is injected at
//! construction and every path is derived from a snapshot's identity.
//! Directory creation is idempotent, and saving an identity that already
//! exists overwrites it (there is no versioning beyond capture-id
//! uniqueness).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, trace};

use super::{Category, Snapshot, SnapshotIdentity, SnapshotSummary};
use crate::diff::{self, DiffDocument};
use crate::error::{NetsnapError, Result};

/// Default bound on a single storage operation.
const DEFAULT_DEADLINE: Duration = Duration::from_secs(10);

/// Durable mapping from snapshot identity (plus category) to payload.
pub struct SnapshotStore {
    root: PathBuf,
    deadline: Duration,
}

impl SnapshotStore {
    /// Create a store rooted at `root`. Nothing is touched on disk until the
    /// first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            deadline: DEFAULT_DEADLINE,
        }
    }

    /// Override the per-operation deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// The storage root this store was constructed with.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, category: Category, identity: &SnapshotIdentity) -> PathBuf {
        self.root
            .join(category.as_str())
            .join(&identity.check)
            .join(format!("{}.json", identity.file_stem()))
    }

    /// Persist a captured snapshot, overwriting any entry with the same
    /// identity. Returns the path written.
    pub fn save(&self, snapshot: &Snapshot) -> Result<PathBuf> {
        let path = self.entry_path(snapshot.category, &snapshot.identity);
        let content = serde_json::to_string_pretty(&snapshot.payload)
            .map_err(|e| NetsnapError::Other(format!("payload serialization failed: {e}")))?;
        self.write_entry(path, content)
    }

    /// Persist a diff document under the `diff` category, named by its
    /// derived result identity.
    pub fn save_diff(&self, document: &DiffDocument) -> Result<PathBuf> {
        let path = self.entry_path(Category::Diff, &document.result_id());
        let content = diff::to_json(document)?;
        self.write_entry(path, content)
    }

    fn write_entry(&self, path: PathBuf, content: String) -> Result<PathBuf> {
        debug!(path = %path.display(), bytes = content.len(), "Writing snapshot entry");
        let written = path.clone();
        run_with_deadline(self.deadline, move || {
            if let Some(parent) = path.parent() {
                // create_dir_all is the atomic create-if-missing the layout
                // needs; racing creators both succeed.
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, content)
        })?;
        Ok(written)
    }

    /// Load the payload stored for an identity.
    ///
    /// # Errors
    ///
    /// [`NetsnapError::SnapshotNotFound`] when no entry exists,
    /// [`NetsnapError::MalformedSnapshot`] when the stored content does not
    /// parse as JSON.
    pub fn load(
        &self,
        category: Category,
        check: &str,
        node: &str,
        capture_id: u64,
    ) -> Result<Value> {
        let identity = SnapshotIdentity::new(check, node, capture_id);
        let text = self.read_entry(category, &identity)?;
        serde_json::from_str(&text).map_err(|e| NetsnapError::MalformedSnapshot {
            path: self.entry_path(category, &identity).display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Load a stored diff document.
    pub fn load_diff(&self, check: &str, node: &str, result_id: u64) -> Result<DiffDocument> {
        let identity = SnapshotIdentity::new(check, node, result_id);
        let text = self.read_entry(Category::Diff, &identity)?;
        diff::from_json(&text).map_err(|e| match e {
            NetsnapError::MalformedSnapshot { reason, .. } => NetsnapError::MalformedSnapshot {
                path: self
                    .entry_path(Category::Diff, &identity)
                    .display()
                    .to_string(),
                reason,
            },
            other => other,
        })
    }

    fn read_entry(&self, category: Category, identity: &SnapshotIdentity) -> Result<String> {
        let path = self.entry_path(category, identity);
        trace!(path = %path.display(), "Reading snapshot entry");
        let read_path = path.clone();
        let result = run_with_deadline(self.deadline, move || fs::read_to_string(&read_path));
        match result {
            Ok(text) => Ok(text),
            Err(NetsnapError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                Err(NetsnapError::SnapshotNotFound {
                    category,
                    check: identity.check.clone(),
                    node: identity.node.clone(),
                    capture_id: identity.capture_id,
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Most recent capture id stored for a check and node, if any.
    ///
    /// Listing convenience only: `compare` always takes explicit ids.
    pub fn latest(
        &self,
        category: Category,
        check: &str,
        node: &str,
    ) -> Result<Option<SnapshotIdentity>> {
        let newest = self
            .list(Some(category))?
            .into_iter()
            .filter(|s| s.check == check && s.node == node)
            .max_by_key(|s| s.capture_id);
        Ok(newest.map(|s| SnapshotIdentity::new(check, node, s.capture_id)))
    }

    /// Enumerate stored snapshots, optionally restricted to one category.
    /// Results are sorted by category, check, node and capture id.
    pub fn list(&self, category: Option<Category>) -> Result<Vec<SnapshotSummary>> {
        let categories = match category {
            Some(c) => vec![c],
            None => Category::all().to_vec(),
        };

        let mut summaries = Vec::new();
        for category in categories {
            let category_dir = self.root.join(category.as_str());
            if !category_dir.is_dir() {
                continue;
            }
            for check_entry in fs::read_dir(&category_dir)? {
                let check_entry = check_entry?;
                if !check_entry.file_type()?.is_dir() {
                    continue;
                }
                let check = check_entry.file_name().to_string_lossy().into_owned();
                for file_entry in fs::read_dir(check_entry.path())? {
                    let file_entry = file_entry?;
                    let name = file_entry.file_name().to_string_lossy().into_owned();
                    let Some(stem) = name.strip_suffix(".json") else {
                        continue;
                    };
                    // Stem layout is "<capture_id>_<node>".
                    let Some((id, node)) = stem.split_once('_') else {
                        continue;
                    };
                    let Ok(capture_id) = id.parse::<u64>() else {
                        continue;
                    };
                    summaries.push(SnapshotSummary {
                        category,
                        check: check.clone(),
                        node: node.to_string(),
                        capture_id,
                        size_bytes: file_entry.metadata()?.len(),
                    });
                }
            }
        }

        summaries.sort_by(|a, b| {
            (a.category.as_str(), &a.check, &a.node, a.capture_id)
                .cmp(&(b.category.as_str(), &b.check, &b.node, b.capture_id))
        });
        Ok(summaries)
    }
}

/// Run a blocking filesystem job under a deadline.
///
/// std::fs offers no native timeouts, so the job runs on a helper thread and
/// is abandoned once the deadline passes; the caller gets
/// [`NetsnapError::StorageUnavailable`] instead of hanging on dead storage.
fn run_with_deadline<T: Send + 'static>(
    deadline: Duration,
    job: impl FnOnce() -> io::Result<T> + Send + 'static,
) -> Result<T> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(job());
    });
    match rx.recv_timeout(deadline) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(NetsnapError::Io(e)),
        Err(_) => Err(NetsnapError::StorageUnavailable {
            reason: format!("operation exceeded {}s deadline", deadline.as_secs()),
        }),
    }
}
