//! Styled terminal output for human users.

use console::style;

use super::{CaptureReport, DiffOutcome, Output};
use crate::checks::CheckDef;
use crate::diff::EditOp;
use crate::error::NetsnapError;
use crate::snapshot::SnapshotSummary;

/// Human-readable output with console styling.
pub struct HumanOutput;

impl HumanOutput {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for HumanOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for HumanOutput {
    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn warning(&self, message: &str) {
        eprintln!("{}: {message}", style("Warning").yellow().bold());
    }

    fn error(&self, error: &NetsnapError) {
        eprintln!("{}: {error}", style("Error").red().bold());
        if let Some(suggestion) = error.suggestion() {
            eprintln!("{}: {suggestion}", style("Hint").yellow());
        }
    }

    fn check_list(&self, checks: &[CheckDef]) {
        for check in checks {
            println!(
                "{:<14} {:<8} {}",
                style(check.name).green(),
                check.group,
                style(check.command).dim()
            );
        }
    }

    fn capture_report(&self, report: &CaptureReport) {
        for entry in &report.entries {
            if entry.skipped {
                println!(
                    "{:<14} {} (command unsupported, null payload)",
                    entry.check,
                    style("skipped").yellow()
                );
            } else {
                println!("{:<14} id {} -> {}", entry.check, entry.capture_id, entry.path);
            }
        }
        println!(
            "Captured {} {} snapshot(s) for {}",
            report.entries.len(),
            report.category,
            style(&report.node).bold()
        );
    }

    fn compare_report(&self, outcomes: &[DiffOutcome]) {
        for outcome in outcomes {
            let document = &outcome.document;
            println!(
                "{} {} ({} -> {})",
                style(&document.before.check).bold(),
                if document.is_empty() {
                    style("unchanged").green()
                } else {
                    style("changed").red()
                },
                document.before.capture_id,
                document.after.capture_id
            );

            for op in &document.operations {
                match op {
                    EditOp::Insert { value, .. } => {
                        println!("  {} {}: {value}", style("+").green(), op.path_display());
                    }
                    EditOp::Delete { value, .. } => {
                        println!("  {} {}: {value}", style("-").red(), op.path_display());
                    }
                    EditOp::Replace { old, new, .. } => {
                        println!(
                            "  {} {}: {old} -> {new}",
                            style("~").yellow(),
                            op.path_display()
                        );
                    }
                }
            }
            println!("  diff written to {}", outcome.path.display());
        }
    }

    fn snapshot_list(&self, summaries: &[SnapshotSummary]) {
        if summaries.is_empty() {
            println!("No snapshots stored");
            return;
        }
        for summary in summaries {
            println!(
                "{:<7} {:<14} {:<12} id {:<12} {} bytes",
                summary.category,
                style(&summary.check).green(),
                summary.node,
                summary.capture_id,
                summary.size_bytes
            );
        }
    }

    fn version_info(&self, version: &str, git_sha: Option<&str>, build_time: Option<&str>) {
        println!("netsnap {version}");
        if let Some(sha) = git_sha {
            println!("git: {sha}");
        }
        if let Some(time) = build_time {
            println!("built: {time}");
        }
    }
}
