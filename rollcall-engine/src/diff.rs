//! Mutation planning — compares a current roster against a desired roster
//! and produces ordered per-user mutation bundles.
//!
//! Rule evaluation per user, in precedence order:
//!
//! 1. display name — only when the target is specified and differs;
//! 2. team transition — grant/revoke team roles; vacating every team grants
//!    the vacated teams' alumni badges and the global Alumni singleton;
//! 3. Active/Alumni singletons from the post-transition team state.
//!
//! Bundles contain only effective changes: granting a held role, revoking an
//! absent one, or renaming to the current name is never emitted. Users are
//! independent; bundle order within a user is display name first, then
//! revokes before their paired grants.

use rollcall_core::catalog::RoleCatalog;
use rollcall_core::types::{
    DesiredMember, DesiredRoster, Member, Mutation, NameTarget, RoleId, RoleKind, RoleTarget,
    Roster, TeamId, UserId,
};

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Plan types
// ---------------------------------------------------------------------------

/// One user's ordered mutation bundle. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberPlan {
    pub user: UserId,
    pub username: String,
    pub mutations: Vec<Mutation>,
}

/// The full mutation plan, members in platform-listing order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReconcilePlan {
    members: Vec<MemberPlan>,
}

impl ReconcilePlan {
    pub fn members(&self) -> &[MemberPlan] {
        &self.members
    }

    pub fn mutations(&self) -> impl Iterator<Item = &Mutation> {
        self.members.iter().flat_map(|m| m.mutations.iter())
    }

    /// Every mutation in application order, cloned — feed to
    /// [`Roster::apply`] for a projection.
    pub fn all_mutations(&self) -> Vec<Mutation> {
        self.mutations().cloned().collect()
    }

    pub fn mutation_count(&self) -> usize {
        self.members.iter().map(|m| m.mutations.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Compute the mutation plan moving `current` toward `desired`.
///
/// Members absent from `desired` are untouched; desired entries matching no
/// current username are ignored (stale sheet rows and departed members are
/// not errors). Fails only on a sheet row naming an unconfigured team.
pub fn plan(
    current: &Roster,
    desired: &DesiredRoster,
    catalog: &RoleCatalog,
) -> Result<ReconcilePlan, EngineError> {
    let mut members = Vec::new();
    for member in current.members() {
        let Some(want) = desired.get(&member.username) else {
            continue;
        };
        let mutations = plan_member(member, want, catalog)?;
        if mutations.is_empty() {
            tracing::debug!("no changes for '{}'", member.username);
            continue;
        }
        members.push(MemberPlan {
            user: member.id,
            username: member.username.clone(),
            mutations,
        });
    }
    Ok(ReconcilePlan { members })
}

fn plan_member(
    member: &Member,
    want: &DesiredMember,
    catalog: &RoleCatalog,
) -> Result<Vec<Mutation>, EngineError> {
    let mut mutations = Vec::new();

    // Rule 1: display name. Unspecified targets never mutate, whatever the
    // current value.
    if let NameTarget::Set(name) = &want.name {
        if name != &member.display_name {
            mutations.push(Mutation::SetDisplayName {
                user: member.id,
                name: name.clone(),
            });
        }
    }

    match &want.roles {
        RoleTarget::Membership { team } => {
            plan_membership(member, team.as_ref(), catalog, &mut mutations)?;
        }
        RoleTarget::Explicit(roles) => {
            plan_explicit(member, roles, catalog, &mut mutations);
        }
    }

    Ok(mutations)
}

/// Rules 2 and 3 for the spreadsheet path.
fn plan_membership(
    member: &Member,
    desired_team: Option<&TeamId>,
    catalog: &RoleCatalog,
    out: &mut Vec<Mutation>,
) -> Result<(), EngineError> {
    let active = catalog.active_role();
    let alumni = catalog.alumni_role();
    let has_active = member.role_ids.contains(&active);
    let has_alumni = member.role_ids.contains(&alumni);

    // Any held team role counts as "has a team" — normally at most one, but
    // the platform can hold several after manual edits.
    let held_teams: Vec<(TeamId, RoleId)> = member
        .role_ids
        .iter()
        .filter_map(|&id| match catalog.kind(id) {
            RoleKind::Team(team) => Some((team, id)),
            _ => None,
        })
        .collect();

    // Rule 2: team transition. Revokes come before grants so no observer
    // sees a member on two teams.
    let mut became_teamless = false;
    match desired_team {
        Some(team) => {
            let target = catalog
                .team_role(team)
                .ok_or_else(|| EngineError::UnknownTeam {
                    username: member.username.clone(),
                    team: team.clone(),
                })?;
            for (_, role) in held_teams.iter().filter(|(held, _)| held != team) {
                out.push(Mutation::RevokeRole {
                    user: member.id,
                    role: *role,
                });
            }
            if !member.role_ids.contains(&target) {
                out.push(Mutation::GrantRole {
                    user: member.id,
                    role: target,
                });
            }
        }
        None => {
            // The "became alumni" transition fires only on an actual
            // team→no-team edge; an already-teamless member is a no-op.
            if !held_teams.is_empty() {
                became_teamless = true;
                for (team, role) in &held_teams {
                    out.push(Mutation::RevokeRole {
                        user: member.id,
                        role: *role,
                    });
                    if let Some(badge) = catalog.team_alumni_role(team) {
                        if !member.role_ids.contains(&badge) {
                            out.push(Mutation::GrantRole {
                                user: member.id,
                                role: badge,
                            });
                        }
                    }
                }
            }
        }
    }

    // Rule 3: singletons from the post-transition team state. The Alumni
    // singleton is granted only on the transition above, exactly once, and
    // never stripped from a member who stays teamless.
    if desired_team.is_some() {
        if !has_active {
            out.push(Mutation::GrantRole {
                user: member.id,
                role: active,
            });
        }
        if has_alumni {
            out.push(Mutation::RevokeRole {
                user: member.id,
                role: alumni,
            });
        }
    } else {
        if has_active {
            out.push(Mutation::RevokeRole {
                user: member.id,
                role: active,
            });
        }
        if became_teamless && !has_alumni {
            out.push(Mutation::GrantRole {
                user: member.id,
                role: alumni,
            });
        }
    }

    Ok(())
}

/// Explicit path (restore): per managed role, flag-vs-held set difference.
/// Unmanaged (`Other`) roles are never touched.
fn plan_explicit(
    member: &Member,
    want: &std::collections::BTreeSet<RoleId>,
    catalog: &RoleCatalog,
    out: &mut Vec<Mutation>,
) {
    for role in catalog.roles() {
        if member.role_ids.contains(&role.id) && !want.contains(&role.id) {
            out.push(Mutation::RevokeRole {
                user: member.id,
                role: role.id,
            });
        }
    }
    for role in catalog.roles() {
        if want.contains(&role.id) && !member.role_ids.contains(&role.id) {
            out.push(Mutation::GrantRole {
                user: member.id,
                role: role.id,
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
