//! `rollcall plan` — show what `apply` would do, without touching anything.

use anyhow::{Context, Result};
use clap::Args;

use rollcall_engine::{pipeline, summary};

use super::SourceArgs;
use crate::input;

/// Arguments for `rollcall plan`.
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Sheet source: CSV file path or published-CSV URL.
    #[arg(long, value_name = "CSV|URL")]
    pub sheet: String,

    /// Also print a unified diff of the before/after snapshot tables.
    #[arg(long)]
    pub diff: bool,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl PlanArgs {
    pub fn run(self) -> Result<()> {
        let (roster, catalog) = self.source.load()?;
        let rows = input::load_sheet(&self.sheet)?;

        let plan = pipeline::plan_from_sheet(&roster, &rows, &catalog)
            .with_context(|| format!("planning against '{}' failed", self.sheet))?;

        if self.json {
            return super::print_json(&super::plan_json(&plan, &catalog));
        }

        super::print_plan(&plan, &catalog, "");

        if self.diff && !plan.is_empty() {
            let audit = summary::audit(&roster, &plan, &catalog)?;
            print!("{}", audit.unified_diff);
            if !audit.unified_diff.ends_with('\n') {
                println!();
            }
        }

        Ok(())
    }
}
