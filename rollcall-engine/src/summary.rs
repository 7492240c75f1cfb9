//! Human-auditable plan summary: the before table, the projected after
//! table, and a unified diff between them.
//!
//! No files are written and no sink is touched — this is what `plan` and
//! `--dry-run` show an operator before anything happens.

use similar::TextDiff;

use rollcall_core::catalog::RoleCatalog;
use rollcall_core::types::Roster;

use crate::diff::ReconcilePlan;
use crate::error::EngineError;

/// Snapshot tables around a plan, plus their unified diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditSummary {
    pub before_table: String,
    pub after_table: String,
    pub unified_diff: String,
}

impl AuditSummary {
    pub fn has_changes(&self) -> bool {
        self.before_table != self.after_table
    }
}

/// Build the audit summary for a plan against the current roster.
pub fn audit(
    current: &Roster,
    plan: &ReconcilePlan,
    catalog: &RoleCatalog,
) -> Result<AuditSummary, EngineError> {
    let before_table = rollcall_codec::encode_table(current, catalog)?;
    let projected = current.apply(&plan.all_mutations());
    let after_table = rollcall_codec::encode_table(&projected, catalog)?;

    let unified_diff = TextDiff::from_lines(&before_table, &after_table)
        .unified_diff()
        .header("a/roster", "b/roster")
        .context_radius(3)
        .to_string();

    Ok(AuditSummary {
        before_table,
        after_table,
        unified_diff,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
