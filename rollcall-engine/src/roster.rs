//! Desired-roster builders.
//!
//! The current roster is just [`Roster::new`] over the live member listing;
//! desired rosters come from two places with different shapes:
//!
//! - spreadsheet rows — semantic targets (team-or-none, tri-state display
//!   name), administrators excluded;
//! - a decoded backup — fully explicit targets (every managed flag and the
//!   display name spelled out), nothing excluded.

use std::collections::BTreeSet;

use rollcall_codec::SnapshotRow;
use rollcall_core::catalog::RoleCatalog;
use rollcall_core::provider::SheetRow;
use rollcall_core::types::{
    DesiredMember, DesiredRoster, NameTarget, RoleId, RoleTarget, Roster, TeamId,
};

/// Build the desired roster from spreadsheet rows.
///
/// Row handling:
/// - empty username cell → the row contributes nothing;
/// - username flagged administrator in the current roster → the row is
///   excluded entirely (administrators are never mutation targets on this
///   path);
/// - empty first-name cell → display name left as-is; otherwise the target
///   is `"First L."` built from the first-name and last-initial cells;
/// - empty team cell → "no active team", a meaningful target distinct from
///   a skipped row;
/// - duplicate usernames → the last row wins.
///
/// Usernames unknown to the current roster are kept; they simply match no
/// member at plan time.
pub fn desired_from_sheet(rows: &[SheetRow], current: &Roster) -> DesiredRoster {
    let mut desired = DesiredRoster::new();
    for row in rows {
        let username = row.username.trim();
        if username.is_empty() {
            tracing::debug!("skipping sheet row with empty username");
            continue;
        }
        if current
            .by_username(username)
            .is_some_and(|m| m.is_administrator)
        {
            tracing::debug!("excluding administrator '{}' from desired state", username);
            continue;
        }

        let first = row.first_name.trim();
        let name = if first.is_empty() {
            NameTarget::Unspecified
        } else {
            NameTarget::Set(format_display_name(first, row.last_initial.trim()))
        };

        let team_cell = row.team.trim();
        let team = if team_cell.is_empty() {
            None
        } else {
            Some(TeamId::from(team_cell))
        };

        desired.insert(DesiredMember {
            username: username.to_string(),
            name,
            roles: RoleTarget::Membership { team },
        });
    }
    desired
}

/// Build the desired roster from decoded backup rows.
///
/// Every entry is fully specified: the display name and each managed-role
/// flag come straight from the table. No administrator exclusion — restore
/// restores exactly what the backup contains.
pub fn desired_from_backup(rows: &[SnapshotRow], catalog: &RoleCatalog) -> DesiredRoster {
    let mut desired = DesiredRoster::new();
    for row in rows {
        let roles: BTreeSet<RoleId> = catalog
            .roles()
            .iter()
            .zip(&row.flags)
            .filter_map(|(role, &flag)| flag.then_some(role.id))
            .collect();
        desired.insert(DesiredMember {
            username: row.username.clone(),
            name: NameTarget::Set(row.display_name.clone()),
            roles: RoleTarget::Explicit(roles),
        });
    }
    desired
}

/// `"First L."` — first name, uppercased last initial, trailing period;
/// just the first name when the initial cell is empty.
fn format_display_name(first: &str, initial: &str) -> String {
    match initial.chars().next() {
        Some(c) => format!("{first} {}.", c.to_uppercase()),
        None => first.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
