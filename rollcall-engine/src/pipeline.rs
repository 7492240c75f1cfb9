//! One-call plan entrypoints shared by every front end.
//!
//! These are the canonical paths for the `plan`/`apply` (spreadsheet) and
//! `restore` (backup artifact) operations; front ends only add I/O around
//! them.

use rollcall_core::catalog::RoleCatalog;
use rollcall_core::provider::SheetRow;
use rollcall_core::types::Roster;

use crate::diff::{self, ReconcilePlan};
use crate::error::EngineError;
use crate::roster;

/// Plan reconciliation of `current` toward the spreadsheet's desired state.
pub fn plan_from_sheet(
    current: &Roster,
    rows: &[SheetRow],
    catalog: &RoleCatalog,
) -> Result<ReconcilePlan, EngineError> {
    let desired = roster::desired_from_sheet(rows, current);
    tracing::debug!(
        "sheet produced {} desired entries from {} rows",
        desired.len(),
        rows.len()
    );
    diff::plan(current, &desired, catalog)
}

/// Plan reconciliation of `current` toward a backup artifact's state.
///
/// Decode errors abort here, before any mutation is attempted.
pub fn plan_from_backup(
    current: &Roster,
    bytes: &[u8],
    catalog: &RoleCatalog,
) -> Result<ReconcilePlan, EngineError> {
    let rows = rollcall_codec::decode(bytes, catalog)?;
    let desired = roster::desired_from_backup(&rows, catalog);
    diff::plan(current, &desired, catalog)
}
