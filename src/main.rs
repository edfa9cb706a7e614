//! netsnap CLI - operational-state snapshot and diff for Arista EOS devices.
//!
//! Capture before, capture after, compare: the diff shows exactly what a
//! configuration change moved.
#![forbid(unsafe_code)]

use std::io::{self, IsTerminal};

use clap::Parser;
use indicatif::ProgressBar;
use serde::Serialize;
use tracing::info;

use netsnap::checks::{self, CheckDef};
use netsnap::cli::{
    CaptureArgs, ChecksArgs, Cli, Commands, CompareArgs, CompletionsArgs, SnapshotsArgs,
};
use netsnap::config::{Inventory, Settings};
use netsnap::device::EapiChannel;
use netsnap::diff::DiffDocument;
use netsnap::error::{NetsnapError, Result};
use netsnap::output::{CaptureReport, DiffOutcome, Output, OutputMode};
use netsnap::snapshot::{Category, Snapshot, SnapshotIdentity, SnapshotStore};

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    // Set by CI at build time; absent in local builds.
    pub fn git_sha() -> Option<&'static str> {
        option_env!("NETSNAP_GIT_SHA")
    }

    pub fn build_timestamp() -> Option<&'static str> {
        option_env!("NETSNAP_BUILD_TIMESTAMP")
    }
}

fn main() {
    let cli = Cli::parse();

    netsnap::logging::init_logging(cli.use_json(), cli.verbose, cli.quiet);

    // Handle no-color flag or non-TTY
    if cli.no_color || !io::stdout().is_terminal() {
        console::set_colors_enabled(false);
    }

    let output = OutputMode::from_cli(&cli).into_output();

    if let Err(e) = run(&cli, output.as_ref()) {
        output.error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, output: &dyn Output) -> Result<()> {
    match &cli.command {
        None => print_quick_start(cli),
        Some(Commands::Before(args)) => cmd_capture(cli, args, Category::Before, output),
        Some(Commands::After(args)) => cmd_capture(cli, args, Category::After, output),
        Some(Commands::Compare(args)) => cmd_compare(cli, args, output),
        Some(Commands::Checks(args)) => cmd_checks(args, output),
        Some(Commands::Snapshots(args)) => cmd_snapshots(cli, args, output),
        Some(Commands::Version) => cmd_version(output),
        Some(Commands::Completions(args)) => cmd_completions(args),
    }
}

// === Quick Start ===

/// Prints quick-start help for both humans and scripts.
#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn print_quick_start(cli: &Cli) -> Result<()> {
    if cli.use_json() {
        print_robot_quick_start();
    } else {
        print_human_quick_start();
    }
    Ok(())
}

fn print_robot_quick_start() {
    let help = RobotQuickStart {
        tool: "netsnap",
        version: build_info::VERSION,
        description: "Snapshot and diff of Arista EOS operational state over eAPI",
        workflow: RobotWorkflow {
            capture_before: "netsnap before --node <NODE> --check ntp",
            change: "<apply the configuration change>",
            capture_after: "netsnap after --node <NODE> --check ntp",
            compare: "netsnap compare --node <NODE> --check ntp --before-id <ID> --after-id <ID>",
        },
        discovery: RobotDiscovery {
            list_checks: "netsnap checks --robot",
            list_snapshots: "netsnap snapshots --robot",
        },
        output_modes: RobotOutputModes {
            human: "--format=text (default)",
            robot: "--robot or --format=json",
            compact: "--format=json-compact",
        },
        inventory: "YAML at .eos_inventory.yaml, or --inventory / NETSNAP_INVENTORY",
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&help).unwrap_or_default()
    );
}

fn print_human_quick_start() {
    use console::style;

    println!(
        "{} {} - EOS state snapshot & diff\n",
        style("netsnap").bold().cyan(),
        build_info::VERSION
    );

    println!("{}", style("WORKFLOW").bold().underlined());
    println!();
    println!(
        "  {}  Capture state before the change",
        style("netsnap before --node spine1 --check ntp").green()
    );
    println!(
        "  {}  Capture state after the change",
        style("netsnap after --node spine1 --check ntp").green()
    );
    println!(
        "  {}  Diff the two captures",
        style("netsnap compare --node spine1 --check ntp --before-id <ID> --after-id <ID>").green()
    );
    println!();

    println!("{}", style("DISCOVERY").bold().underlined());
    println!();
    println!("  {}  List available checks", style("netsnap checks").cyan());
    println!(
        "  {}  List stored snapshots and their ids",
        style("netsnap snapshots").cyan()
    );
    println!();

    println!("Run {} for full help", style("netsnap --help").yellow());
}

// === Robot Quick-Start JSON Structures ===

#[derive(Serialize)]
struct RobotQuickStart {
    tool: &'static str,
    version: &'static str,
    description: &'static str,
    workflow: RobotWorkflow,
    discovery: RobotDiscovery,
    output_modes: RobotOutputModes,
    inventory: &'static str,
}

#[derive(Serialize)]
struct RobotWorkflow {
    capture_before: &'static str,
    change: &'static str,
    capture_after: &'static str,
    compare: &'static str,
}

#[derive(Serialize)]
struct RobotDiscovery {
    list_checks: &'static str,
    list_snapshots: &'static str,
}

#[derive(Serialize)]
struct RobotOutputModes {
    human: &'static str,
    robot: &'static str,
    compact: &'static str,
}

// === Command Implementations ===

fn cmd_capture(
    cli: &Cli,
    args: &CaptureArgs,
    category: Category,
    output: &dyn Output,
) -> Result<()> {
    let selected = select_checks(&args.checks, args.group.as_deref())?;
    let settings = Settings::load()?;
    let store = open_store(cli, &settings);

    let inventory = Inventory::load(cli.inventory.as_deref())?;
    let node_config = inventory.node(&args.node)?;
    let channel = EapiChannel::connect(&args.node, node_config, settings.eapi_timeout())?;

    let progress = (!cli.use_json() && !cli.quiet && selected.len() > 1)
        .then(|| ProgressBar::new(selected.len() as u64));

    let mut report = CaptureReport::new(args.node.as_str(), category);
    for check in &selected {
        if let Some(bar) = &progress {
            bar.set_message(check.name);
        }

        let payload = checks::run(check, &channel)?;
        let snapshot = Snapshot::capture(check.name, args.node.as_str(), category, payload);
        let path = store.save(&snapshot)?;
        info!(
            check = check.name,
            node = %args.node,
            capture_id = snapshot.identity.capture_id,
            "Snapshot saved"
        );
        report.record(&snapshot, &path);

        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    output.capture_report(&report);
    Ok(())
}

fn cmd_compare(cli: &Cli, args: &CompareArgs, output: &dyn Output) -> Result<()> {
    let selected = select_checks(&args.checks, args.group.as_deref())?;

    // Ordering is a usage error and is rejected before storage is touched.
    if args.before_id >= args.after_id {
        return Err(NetsnapError::IdentityOrdering {
            before: args.before_id,
            after: args.after_id,
        });
    }

    let settings = Settings::load()?;
    let store = open_store(cli, &settings);

    let mut outcomes = Vec::new();
    for check in &selected {
        let before_payload =
            store.load(Category::Before, check.name, &args.node, args.before_id)?;
        let after_payload = store.load(Category::After, check.name, &args.node, args.after_id)?;

        let document = DiffDocument::compute(
            SnapshotIdentity::new(check.name, args.node.as_str(), args.before_id),
            SnapshotIdentity::new(check.name, args.node.as_str(), args.after_id),
            &before_payload,
            &after_payload,
        )?;
        info!(
            check = check.name,
            node = %args.node,
            operations = document.operations.len(),
            "Diff computed"
        );

        let path = store.save_diff(&document)?;
        outcomes.push(DiffOutcome { document, path });
    }

    output.compare_report(&outcomes);
    Ok(())
}

fn cmd_checks(args: &ChecksArgs, output: &dyn Output) -> Result<()> {
    let listed: Vec<CheckDef> = match args.group.as_deref() {
        Some(group) => checks::select(&[], Some(group))?
            .into_iter()
            .copied()
            .collect(),
        None => checks::REGISTRY.to_vec(),
    };
    output.check_list(&listed);
    Ok(())
}

fn cmd_snapshots(cli: &Cli, args: &SnapshotsArgs, output: &dyn Output) -> Result<()> {
    let category = args
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()?;

    let settings = Settings::load()?;
    let store = open_store(cli, &settings);

    let summaries = store.list(category)?;
    output.snapshot_list(&summaries);
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_version(output: &dyn Output) -> Result<()> {
    output.version_info(
        build_info::VERSION,
        build_info::git_sha(),
        build_info::build_timestamp(),
    );
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_completions(args: &CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    clap_complete::generate(args.shell, &mut Cli::command(), "netsnap", &mut io::stdout());
    Ok(())
}

// === Utility Functions ===

/// Resolve the check selection, requiring at least one check or a group.
fn select_checks(names: &[String], group: Option<&str>) -> Result<Vec<CheckDef>> {
    if names.is_empty() && group.is_none() {
        return Err(NetsnapError::Other(
            "no checks selected: use --check or --group".to_string(),
        ));
    }
    Ok(checks::select(names, group)?.into_iter().copied().collect())
}

/// Build the snapshot store from settings plus CLI overrides.
fn open_store(cli: &Cli, settings: &Settings) -> SnapshotStore {
    let root = cli
        .storage_root
        .clone()
        .unwrap_or_else(|| settings.storage_root.clone());
    SnapshotStore::new(root).with_deadline(settings.storage_timeout())
}
