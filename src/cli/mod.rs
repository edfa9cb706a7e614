//! CLI argument definitions.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// netsnap - Operational-state snapshot and diff for Arista EOS devices.
///
/// Capture a check before a change, capture it again after, then compare the
/// two captures to see exactly what moved. Use --robot or --format=json for
/// machine-parseable output.
#[derive(Parser, Debug)]
#[command(name = "netsnap", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (text for humans, json for scripts)
    #[arg(
        long,
        short = 'f',
        default_value = "text",
        global = true,
        env = "NETSNAP_FORMAT"
    )]
    pub format: OutputFormat,

    /// Robot mode: equivalent to --format=json
    #[arg(long, global = true)]
    pub robot: bool,

    /// Verbose output (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        value_parser = clap::builder::BoolishValueParser::new(),
    )]
    pub no_color: bool,

    /// Inventory file (defaults to the documented search path)
    #[arg(long, short = 'i', global = true)]
    pub inventory: Option<PathBuf>,

    /// Snapshot storage root (overrides settings)
    #[arg(long, global = true, env = "NETSNAP_STORAGE_ROOT")]
    pub storage_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// JSON output for scripts
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON (robot mode or explicit --format=json).
    pub const fn use_json(&self) -> bool {
        self.robot || matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Capture ===
    /// Capture selected checks before a configuration change
    Before(CaptureArgs),

    /// Capture selected checks after a configuration change
    After(CaptureArgs),

    // === Diff ===
    /// Compare a before capture against an after capture by id
    Compare(CompareArgs),

    // === Introspection ===
    /// List available checks
    Checks(ChecksArgs),

    /// List stored snapshots
    Snapshots(SnapshotsArgs),

    // === Utilities ===
    /// Show version and build information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// === Argument Structs ===

#[derive(Parser, Debug)]
pub struct CaptureArgs {
    /// Inventory name of the target device
    #[arg(long, short = 'n')]
    pub node: String,

    /// Check to capture (repeatable)
    #[arg(long = "check", short = 'c', value_name = "NAME")]
    pub checks: Vec<String>,

    /// Capture a whole group instead (mgmt, routing, layer2, filter, all)
    #[arg(long, short = 'g', conflicts_with = "checks")]
    pub group: Option<String>,
}

#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// Inventory name of the target device
    #[arg(long, short = 'n')]
    pub node: String,

    /// Check to compare (repeatable)
    #[arg(long = "check", short = 'c', value_name = "NAME")]
    pub checks: Vec<String>,

    /// Compare a whole group instead (mgmt, routing, layer2, filter, all)
    #[arg(long, short = 'g', conflicts_with = "checks")]
    pub group: Option<String>,

    /// Capture id of the before snapshot
    #[arg(long)]
    pub before_id: u64,

    /// Capture id of the after snapshot
    #[arg(long)]
    pub after_id: u64,
}

#[derive(Parser, Debug)]
pub struct ChecksArgs {
    /// Only list checks in this group
    #[arg(long, short = 'g')]
    pub group: Option<String>,
}

#[derive(Parser, Debug)]
pub struct SnapshotsArgs {
    /// Only list this category (before, after, diff)
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
