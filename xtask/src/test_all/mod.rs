//! Run all tests with snapshot cleanup.
//!
//! Layout and config tests compare against inline insta snapshots. A failing snapshot leaves a
//! pending file next to the test source (`.<file>.pending-snap`, or `.snap.new` for file
//! snapshots). Stale pending files make `cargo insta review` show outdated diffs, so the runner
//! removes them before each run.
//!
//! ## Commands
//!
//! - `run` - Run all workspace tests
//! - `golden` - Run only the golden table renders
//! - `clean` - Remove pending snapshot files
//! - `status` - Show pending snapshot files

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Subcommand;

/// Directories whose tests use insta snapshots.
const SNAPSHOT_DIRS: &[&str] = &[
    "src/layout",
    "src/layout/tests",
    "src/layout/snapshot",
    "tablegrid-config/src",
];

#[derive(Subcommand)]
pub enum Action {
    /// Run all workspace tests
    Run {
        /// Only run tests matching this filter
        #[arg(long, short)]
        filter: Option<String>,

        /// Keep pending snapshot files from earlier runs
        #[arg(long)]
        no_pre_clean: bool,

        /// Run tests in release mode
        #[arg(long)]
        release: bool,
    },
    /// Run only the golden table renders
    Golden,
    /// Remove pending snapshot files
    Clean {
        /// Show what would be removed without removing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Show pending snapshot files
    Status,
}

pub fn run(action: Action) -> Result<()> {
    match action {
        Action::Run {
            filter,
            no_pre_clean,
            release,
        } => run_tests(filter, no_pre_clean, release),
        Action::Golden => run_golden(),
        Action::Clean { dry_run } => clean(dry_run),
        Action::Status => status(),
    }
}

fn run_tests(filter: Option<String>, no_pre_clean: bool, release: bool) -> Result<()> {
    if !no_pre_clean {
        let removed = remove_pending()?;
        if removed > 0 {
            println!("Removed {removed} stale pending snapshots\n");
        }
    }

    let mut args = vec!["test", "--workspace"];
    if release {
        args.push("--release");
    }
    if let Some(filter) = &filter {
        args.push("--");
        args.push(filter);
    }

    cargo(&args)
}

fn run_golden() -> Result<()> {
    remove_pending()?;
    cargo(&["test", "--package", "tablegrid", "--lib", "--", "golden"])
}

fn cargo(args: &[&str]) -> Result<()> {
    println!("Running: cargo {}\n", args.join(" "));

    let start = Instant::now();
    let status = Command::new("cargo")
        .args(args)
        .status()
        .context("error running cargo")?;
    let elapsed = start.elapsed().as_secs_f64();

    println!();
    if status.success() {
        println!("All tests passed in {elapsed:.2}s");
        return Ok(());
    }

    let pending = find_pending();
    if !pending.is_empty() {
        println!("{} snapshots changed, see `cargo insta review`", pending.len());
    }
    bail!("tests failed after {elapsed:.2}s");
}

fn clean(dry_run: bool) -> Result<()> {
    let pending = find_pending();
    if pending.is_empty() {
        println!("No pending snapshots");
        return Ok(());
    }

    for path in &pending {
        if dry_run {
            println!("Would remove {}", path.display());
        } else {
            std::fs::remove_file(path)
                .with_context(|| format!("error removing {}", path.display()))?;
            println!("Removed {}", path.display());
        }
    }

    Ok(())
}

fn status() -> Result<()> {
    let pending = find_pending();
    println!("Pending snapshots: {}", pending.len());
    for path in &pending {
        println!("  {}", path.display());
    }
    Ok(())
}

fn is_pending(path: &Path) -> bool {
    let name = path.file_name().map(|name| name.to_string_lossy());
    name.is_some_and(|name| name.ends_with(".pending-snap") || name.ends_with(".snap.new"))
}

fn find_pending() -> Vec<PathBuf> {
    let mut files: Vec<_> = SNAPSHOT_DIRS
        .iter()
        .flat_map(|dir| std::fs::read_dir(dir).into_iter().flatten())
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_pending(path))
        .collect();

    files.sort();
    files
}

fn remove_pending() -> Result<usize> {
    let files = find_pending();
    for path in &files {
        std::fs::remove_file(path)
            .with_context(|| format!("error removing {}", path.display()))?;
    }
    Ok(files.len())
}
