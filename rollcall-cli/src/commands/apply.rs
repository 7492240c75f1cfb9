//! `rollcall apply` — reconcile the member export against the spreadsheet.
//!
//! Writes a pre-apply backup, applies the plan through the file-backed sink,
//! then writes a post-apply backup — partial failures included, so the
//! operator can always see exactly what landed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;

use rollcall_engine::{pipeline, reconcile, summary};

use super::SourceArgs;
use crate::input::{self, FileSink};

/// Arguments for `rollcall apply`.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Sheet source: CSV file path or published-CSV URL.
    #[arg(long, value_name = "CSV|URL")]
    pub sheet: String,

    /// Show the plan and audit diff without mutating anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Directory for the before/after backup artifacts.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl ApplyArgs {
    pub fn run(self) -> Result<()> {
        let (roster, catalog) = self.source.load()?;
        let rows = input::load_sheet(&self.sheet)?;

        let plan = pipeline::plan_from_sheet(&roster, &rows, &catalog)
            .with_context(|| format!("planning against '{}' failed", self.sheet))?;

        if self.dry_run {
            if self.json {
                return super::print_json(&super::plan_json(&plan, &catalog));
            }
            super::print_plan(&plan, &catalog, "[dry-run] ");
            if !plan.is_empty() {
                let audit = summary::audit(&roster, &plan, &catalog)?;
                print!("{}", audit.unified_diff);
                if !audit.unified_diff.ends_with('\n') {
                    println!();
                }
            }
            return Ok(());
        }

        let mut sink = FileSink::open(&self.source.members)?;
        let report = reconcile(&roster, &plan, &catalog, &mut sink)
            .context("reconciliation failed before any mutation was attempted")?;

        // Persist whatever landed, even under partial failure.
        sink.save()?;

        let stamp = Utc::now().format("%Y%m%d-%H%M%S");
        let before_path = write_artifact(&self.out_dir, &format!("rollcall-pre-{stamp}.csv.gz"), &report.before)?;
        let after_path = write_artifact(&self.out_dir, &format!("rollcall-post-{stamp}.csv.gz"), &report.after)?;

        if self.json {
            return super::print_json(&super::report_json(&report, &catalog));
        }

        super::print_report(&report, &catalog);
        println!("  before: {}", before_path.display());
        println!("  after:  {}", after_path.display());
        Ok(())
    }
}

fn write_artifact(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create output directory '{}'", dir.display()))?;
    let path = dir.join(name);
    std::fs::write(&path, bytes)
        .with_context(|| format!("cannot write backup '{}'", path.display()))?;
    Ok(path)
}
