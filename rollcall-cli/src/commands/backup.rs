//! `rollcall backup` — snapshot members' display names and roles.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;

use super::SourceArgs;

/// Arguments for `rollcall backup`.
#[derive(Args, Debug)]
pub struct BackupArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output path (defaults to rollcall-backup-<UTC timestamp>.csv.gz).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl BackupArgs {
    pub fn run(self) -> Result<()> {
        let (roster, catalog) = self.source.load()?;

        let bytes = rollcall_codec::encode(&roster, &catalog).context("backup encoding failed")?;
        let path = self.output.unwrap_or_else(default_backup_path);
        std::fs::write(&path, &bytes)
            .with_context(|| format!("cannot write backup '{}'", path.display()))?;

        println!(
            "✓ backed up {} member(s) × {} role column(s) to {}",
            roster.len(),
            catalog.roles().len(),
            path.display()
        );
        Ok(())
    }
}

fn default_backup_path() -> PathBuf {
    PathBuf::from(format!(
        "rollcall-backup-{}.csv.gz",
        Utc::now().format("%Y%m%d-%H%M%S")
    ))
}
