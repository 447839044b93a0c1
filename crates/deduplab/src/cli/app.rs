use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "deduplab",
    version = env!("CARGO_PKG_VERSION"),
    about = "Context-aware file deduplication and organization system",
    propagate_version = true
)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Commands,

    /// Path to the configuration file (auto-created with defaults if absent).
    #[arg(long, global = true, default_value = "deduplab.toml")]
    pub config: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Discover files, compute hashes, detect context
    Scan(Scan),
    /// Compute duplicate moves (context-aware)
    Plan(Plan),
    /// Apply plan with three-phase commit
    #[command(name = "rename-apply")]
    RenameApply(RenameApply),
    /// Restore files from checkpoint
    Rollback(Rollback),
    /// Verify checkpoint integrity
    Verify(Verify),
    /// Display last run metrics
    Metrics(Metrics),
}

#[derive(Debug, clap::Args)]
pub struct Scan {
    /// Root directory to scan (repeatable)
    #[arg(long = "root", required = true)]
    pub roots: Vec<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub struct Plan {
    /// CSV plan output path
    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Debug, clap::Args)]
pub struct RenameApply {
    /// Path to plan CSV
    #[arg(long)]
    pub plan: PathBuf,
    /// Checkpoint manifest output path
    #[arg(long)]
    pub checkpoint: PathBuf,
    /// Override dry-run and execute filesystem changes
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, clap::Args)]
pub struct Rollback {
    /// Checkpoint file path
    #[arg(long)]
    pub checkpoint: PathBuf,
}

#[derive(Debug, clap::Args)]
pub struct Verify {
    /// Checkpoint to verify
    #[arg(long)]
    pub checkpoint: PathBuf,
}

#[derive(Debug, clap::Args)]
pub struct Metrics {}
