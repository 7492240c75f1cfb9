//! `rollcall restore` — diff against a backup artifact, optionally
//! reconciling the member export to it.
//!
//! Decode failures abort before any mutation; the apply stage is best-effort
//! like every other reconciliation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use rollcall_engine::{pipeline, reconcile};

use super::SourceArgs;
use crate::input::FileSink;

/// Arguments for `rollcall restore`.
#[derive(Args, Debug)]
pub struct RestoreArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Backup artifact produced by `rollcall backup`.
    #[arg(long, value_name = "FILE")]
    pub backup: PathBuf,

    /// Reconcile the member export to the backup (default: plan only).
    #[arg(long)]
    pub apply: bool,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl RestoreArgs {
    pub fn run(self) -> Result<()> {
        let (roster, catalog) = self.source.load()?;
        let bytes = std::fs::read(&self.backup)
            .with_context(|| format!("cannot read backup '{}'", self.backup.display()))?;

        let plan = pipeline::plan_from_backup(&roster, &bytes, &catalog)
            .context("nothing was restored")?;

        if !self.apply {
            if self.json {
                return super::print_json(&super::plan_json(&plan, &catalog));
            }
            super::print_plan(&plan, &catalog, "");
            if !plan.is_empty() {
                println!("Run again with --apply to reconcile.");
            }
            return Ok(());
        }

        let mut sink = FileSink::open(&self.source.members)?;
        let report = reconcile(&roster, &plan, &catalog, &mut sink)
            .context("reconciliation failed before any mutation was attempted")?;
        sink.save()?;

        if self.json {
            return super::print_json(&super::report_json(&report, &catalog));
        }
        super::print_report(&report, &catalog);
        Ok(())
    }
}
