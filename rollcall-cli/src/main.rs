//! Roll Call — roster reconciliation CLI.
//!
//! Operates on exported fixture files (member-list JSON, role-list JSON,
//! sheet CSV) so reconciliations can be rehearsed and audited offline; a bot
//! front end embeds the same library calls against the live platform.
//!
//! # Usage
//!
//! ```text
//! rollcall backup  --members <json> --roles <json> [-o <file>]
//! rollcall plan    --members <json> --roles <json> --sheet <csv|url> [--diff] [--json]
//! rollcall apply   --members <json> --roles <json> --sheet <csv|url> [--dry-run] [--out-dir <dir>] [--json]
//! rollcall restore --members <json> --roles <json> --backup <file> [--apply] [--json]
//! ```
//!
//! The role catalog configuration is read from `--config` or
//! `~/.rollcall/config.yaml`.

mod commands;
mod input;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{apply::ApplyArgs, backup::BackupArgs, plan::PlanArgs, restore::RestoreArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "rollcall",
    version,
    about = "Reconcile chat-server roles and display names against a team roster",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Snapshot members' display names and roles to a backup artifact.
    Backup(BackupArgs),

    /// Show the mutation plan for reconciling against the spreadsheet.
    Plan(PlanArgs),

    /// Reconcile the member export against the spreadsheet, with
    /// before/after backup artifacts.
    Apply(ApplyArgs),

    /// Diff against a backup artifact, optionally reconciling to it.
    Restore(RestoreArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Backup(args) => args.run(),
        Commands::Plan(args) => args.run(),
        Commands::Apply(args) => args.run(),
        Commands::Restore(args) => args.run(),
    }
}
