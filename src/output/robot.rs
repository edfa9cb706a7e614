//! JSON output for scripts and automation.

use serde::Serialize;
use serde_json::json;

use super::{CaptureReport, DiffOutcome, Output, RobotFormat};
use crate::checks::CheckDef;
use crate::error::NetsnapError;
use crate::snapshot::SnapshotSummary;

/// Machine-readable output; one JSON document per command.
pub struct RobotOutput {
    format: RobotFormat,
}

impl RobotOutput {
    #[must_use]
    pub const fn new(format: RobotFormat) -> Self {
        Self { format }
    }

    fn print<T: Serialize>(&self, data: &T) {
        let rendered = match self.format {
            RobotFormat::Json => serde_json::to_string_pretty(data),
            RobotFormat::JsonCompact => serde_json::to_string(data),
        };
        println!("{}", rendered.unwrap_or_default());
    }
}

impl Output for RobotOutput {
    fn info(&self, message: &str) {
        self.print(&json!({ "info": message }));
    }

    fn warning(&self, message: &str) {
        self.print(&json!({ "warning": message }));
    }

    fn error(&self, error: &NetsnapError) {
        let document = json!({
            "error": true,
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        });
        eprintln!("{}", serde_json::to_string_pretty(&document).unwrap_or_default());
    }

    fn check_list(&self, checks: &[CheckDef]) {
        let entries: Vec<_> = checks
            .iter()
            .map(|check| {
                json!({
                    "name": check.name,
                    "group": check.group.as_str(),
                    "command": check.command,
                })
            })
            .collect();
        self.print(&json!({ "checks": entries }));
    }

    fn capture_report(&self, report: &CaptureReport) {
        self.print(report);
    }

    fn compare_report(&self, outcomes: &[DiffOutcome]) {
        let entries: Vec<_> = outcomes
            .iter()
            .map(|outcome| {
                json!({
                    "document": outcome.document,
                    "path": outcome.path.display().to_string(),
                    "changed": !outcome.document.is_empty(),
                })
            })
            .collect();
        self.print(&json!({ "diffs": entries }));
    }

    fn snapshot_list(&self, summaries: &[SnapshotSummary]) {
        self.print(&json!({ "snapshots": summaries }));
    }

    fn version_info(&self, version: &str, git_sha: Option<&str>, build_time: Option<&str>) {
        self.print(&json!({
            "version": version,
            "git_sha": git_sha,
            "build_timestamp": build_time,
        }));
    }
}
