//! Output mode abstraction for robot and human output.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::checks::CheckDef;
use crate::cli::Cli;
use crate::diff::DiffDocument;
use crate::error::NetsnapError;
use crate::snapshot::{Category, Snapshot, SnapshotSummary};

pub mod human;
pub mod robot;

pub use human::HumanOutput;
pub use robot::RobotOutput;

// === Command Result Types ===

/// Result of capturing one check during a `before`/`after` run.
#[derive(Debug, Clone, Serialize)]
pub struct CaptureEntry {
    pub check: String,
    pub capture_id: u64,
    pub path: String,
    /// True when the platform rejected the command and a null payload was
    /// recorded instead.
    pub skipped: bool,
}

/// Result of a whole capture run.
#[derive(Debug, Clone, Serialize)]
pub struct CaptureReport {
    pub node: String,
    pub category: Category,
    pub entries: Vec<CaptureEntry>,
}

impl CaptureReport {
    pub fn new(node: impl Into<String>, category: Category) -> Self {
        Self {
            node: node.into(),
            category,
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, snapshot: &Snapshot, path: &Path) {
        self.entries.push(CaptureEntry {
            check: snapshot.identity.check.clone(),
            capture_id: snapshot.identity.capture_id,
            path: path.display().to_string(),
            skipped: snapshot.payload.is_null(),
        });
    }
}

/// One computed and persisted diff during a `compare` run.
#[derive(Debug, Clone)]
pub struct DiffOutcome {
    pub document: DiffDocument,
    pub path: PathBuf,
}

/// JSON formatting options for robot mode.
#[derive(Debug, Clone, Copy)]
pub enum RobotFormat {
    /// Pretty-printed JSON (default for --robot).
    Json,
    /// Single-line JSON (--format=json-compact).
    JsonCompact,
}

/// Determines how command output is rendered.
#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    /// JSON output for scripts and automation.
    Robot(RobotFormat),
    /// Styled terminal output for human users.
    Human,
}

impl OutputMode {
    /// Create OutputMode from CLI arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.use_json() {
            let format = if cli.use_compact_json() {
                RobotFormat::JsonCompact
            } else {
                RobotFormat::Json
            };
            Self::Robot(format)
        } else {
            Self::Human
        }
    }

    /// Returns true if output should be JSON.
    #[must_use]
    pub const fn is_robot(&self) -> bool {
        matches!(self, Self::Robot(_))
    }

    /// Convert into the appropriate Output implementation.
    #[must_use]
    pub fn into_output(self) -> Box<dyn Output> {
        match self {
            Self::Robot(format) => Box::new(RobotOutput::new(format)),
            Self::Human => Box::new(HumanOutput::new()),
        }
    }
}

/// Trait for all output operations.
///
/// Commands call these methods without knowing the output mode.
pub trait Output {
    // Basic messages
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, error: &NetsnapError);

    // Command results
    fn check_list(&self, checks: &[CheckDef]);
    fn capture_report(&self, report: &CaptureReport);
    fn compare_report(&self, outcomes: &[DiffOutcome]);
    fn snapshot_list(&self, summaries: &[SnapshotSummary]);

    // Metadata
    fn version_info(&self, version: &str, git_sha: Option<&str>, build_time: Option<&str>);
}
