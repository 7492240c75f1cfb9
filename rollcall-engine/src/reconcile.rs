//! Best-effort mutation application with per-mutation outcome tracking.
//!
//! One failed platform call never aborts the batch: the failure is recorded
//! against that mutation and reconciliation continues with the remaining
//! mutations and members. Mutations for one member stay in bundle order;
//! members are independent.

use rollcall_core::catalog::RoleCatalog;
use rollcall_core::provider::{MutationSink, PlatformError};
use rollcall_core::types::{Mutation, Roster};

use crate::diff::ReconcilePlan;
use crate::error::EngineError;

/// One mutation's fate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub username: String,
    pub mutation: Mutation,
    pub result: Result<(), PlatformError>,
}

/// Everything a reconciliation run yields: per-mutation outcomes plus the
/// before/after backup artifacts, produced regardless of partial failure.
#[derive(Debug, Clone)]
pub struct ReconcileReport {
    pub outcomes: Vec<MutationOutcome>,
    /// Snapshot of the roster as read, taken before the first platform call.
    pub before: Vec<u8>,
    /// Snapshot of the roster projected under the successfully applied
    /// mutations. A live re-read is the front end's call.
    pub after: Vec<u8>,
}

impl ReconcileReport {
    pub fn applied(&self) -> impl Iterator<Item = &MutationOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &MutationOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn applied_count(&self) -> usize {
        self.applied().count()
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }

    pub fn is_clean(&self) -> bool {
        self.failed_count() == 0
    }
}

/// Apply a plan through the sink, one attempt per mutation.
///
/// The before snapshot is encoded before anything is sent, so even a run cut
/// short by a panic or abort leaves a restorable image in the caller's hands.
pub fn reconcile(
    current: &Roster,
    plan: &ReconcilePlan,
    catalog: &RoleCatalog,
    sink: &mut dyn MutationSink,
) -> Result<ReconcileReport, EngineError> {
    let before = rollcall_codec::encode(current, catalog)?;

    let mut outcomes = Vec::with_capacity(plan.mutation_count());
    for member_plan in plan.members() {
        for mutation in &member_plan.mutations {
            let result = dispatch(sink, mutation);
            match &result {
                Ok(()) => tracing::info!("applied: {}", mutation),
                Err(err) => {
                    tracing::warn!("failed for '{}': {}: {}", member_plan.username, mutation, err);
                }
            }
            outcomes.push(MutationOutcome {
                username: member_plan.username.clone(),
                mutation: mutation.clone(),
                result,
            });
        }
    }

    let applied: Vec<Mutation> = outcomes
        .iter()
        .filter(|o| o.result.is_ok())
        .map(|o| o.mutation.clone())
        .collect();
    let after = rollcall_codec::encode(&current.apply(&applied), catalog)?;

    Ok(ReconcileReport {
        outcomes,
        before,
        after,
    })
}

fn dispatch(sink: &mut dyn MutationSink, mutation: &Mutation) -> Result<(), PlatformError> {
    match mutation {
        Mutation::SetDisplayName { user, name } => sink.set_display_name(*user, name),
        Mutation::GrantRole { user, role } => sink.grant_role(*user, *role),
        Mutation::RevokeRole { user, role } => sink.revoke_role(*user, *role),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rollcall_core::catalog::{CatalogConfig, TeamConfig};
    use rollcall_core::provider::PlatformRole;
    use rollcall_core::types::{
        DesiredMember, DesiredRoster, Member, NameTarget, RoleId, RoleTarget, TeamId, UserId,
    };

    use crate::diff;

    use super::*;

    /// Records every call; fails those matching `poison`.
    struct ScriptedSink {
        calls: Vec<Mutation>,
        poison: Option<RoleId>,
    }

    impl ScriptedSink {
        fn new(poison: Option<RoleId>) -> Self {
            Self {
                calls: Vec::new(),
                poison,
            }
        }

        fn check(&mut self, mutation: Mutation, role: Option<RoleId>) -> Result<(), PlatformError> {
            self.calls.push(mutation);
            if role.is_some() && role == self.poison {
                return Err(PlatformError::new("missing permission"));
            }
            Ok(())
        }
    }

    impl MutationSink for ScriptedSink {
        fn set_display_name(&mut self, user: UserId, name: &str) -> Result<(), PlatformError> {
            self.check(
                Mutation::SetDisplayName {
                    user,
                    name: name.to_string(),
                },
                None,
            )
        }

        fn grant_role(&mut self, user: UserId, role: RoleId) -> Result<(), PlatformError> {
            self.check(Mutation::GrantRole { user, role }, Some(role))
        }

        fn revoke_role(&mut self, user: UserId, role: RoleId) -> Result<(), PlatformError> {
            self.check(Mutation::RevokeRole { user, role }, Some(role))
        }
    }

    fn catalog() -> RoleCatalog {
        let config = CatalogConfig {
            teams: vec![TeamConfig {
                team: TeamId::from("8097"),
                role: "Team 8097".to_string(),
                alumni_role: "Team 8097 Alumni".to_string(),
            }],
            active_role: "Active".to_string(),
            alumni_role: "Alumni".to_string(),
        };
        let platform = vec![
            PlatformRole { id: RoleId(1), name: "Team 8097".to_string() },
            PlatformRole { id: RoleId(2), name: "Team 8097 Alumni".to_string() },
            PlatformRole { id: RoleId(3), name: "Active".to_string() },
            PlatformRole { id: RoleId(4), name: "Alumni".to_string() },
        ];
        RoleCatalog::resolve(&config, &platform).expect("catalog")
    }

    fn roster() -> Roster {
        Roster::new(vec![Member {
            id: UserId(10),
            username: "ada#1".to_string(),
            display_name: "ada#1".to_string(),
            role_ids: [RoleId(1), RoleId(3)].into_iter().collect(),
            is_administrator: false,
        }])
        .expect("roster")
    }

    fn leave_team_plan(catalog: &RoleCatalog, current: &Roster) -> ReconcilePlan {
        let mut desired = DesiredRoster::new();
        desired.insert(DesiredMember {
            username: "ada#1".to_string(),
            name: NameTarget::Set("Ada L.".to_string()),
            roles: RoleTarget::Membership { team: None },
        });
        diff::plan(current, &desired, catalog).expect("plan")
    }

    #[test]
    fn clean_run_applies_everything_in_order() {
        let catalog = catalog();
        let current = roster();
        let plan = leave_team_plan(&catalog, &current);

        let mut sink = ScriptedSink::new(None);
        let report = reconcile(&current, &plan, &catalog, &mut sink).expect("reconcile");

        assert!(report.is_clean());
        assert_eq!(report.applied_count(), 5);
        assert_eq!(sink.calls, plan.all_mutations());
    }

    #[test]
    fn one_failure_is_isolated_and_later_mutations_still_run() {
        let catalog = catalog();
        let current = roster();
        let plan = leave_team_plan(&catalog, &current);

        // Poison the team-alumni badge grant; everything else succeeds.
        let mut sink = ScriptedSink::new(Some(RoleId(2)));
        let report = reconcile(&current, &plan, &catalog, &mut sink).expect("reconcile");

        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.applied_count(), 4);
        assert_eq!(
            sink.calls.len(),
            plan.mutation_count(),
            "a failure must not stop the batch"
        );

        let failure = report.failed().next().expect("failure");
        assert_eq!(failure.username, "ada#1");
        assert!(matches!(
            failure.mutation,
            Mutation::GrantRole { role, .. } if role == RoleId(2)
        ));
        assert_eq!(
            failure.result.as_ref().unwrap_err().message,
            "missing permission"
        );
    }

    #[test]
    fn after_snapshot_reflects_only_applied_mutations() {
        let catalog = catalog();
        let current = roster();
        let plan = leave_team_plan(&catalog, &current);

        let mut sink = ScriptedSink::new(Some(RoleId(2)));
        let report = reconcile(&current, &plan, &catalog, &mut sink).expect("reconcile");

        let after_rows = rollcall_codec::decode(&report.after, &catalog).expect("decode");
        // Team role revoked, Active revoked, Alumni granted, rename applied;
        // the poisoned badge grant is absent.
        assert_eq!(after_rows[0].display_name, "Ada L.");
        assert_eq!(after_rows[0].flags, vec![false, false, false, true]);

        let before_rows = rollcall_codec::decode(&report.before, &catalog).expect("decode");
        assert_eq!(before_rows[0].display_name, "ada#1");
        assert_eq!(before_rows[0].flags, vec![true, false, true, false]);
    }

    #[test]
    fn empty_plan_yields_identical_snapshots() {
        let catalog = catalog();
        let current = roster();
        let plan = ReconcilePlan::default();

        let mut sink = ScriptedSink::new(None);
        let report = reconcile(&current, &plan, &catalog, &mut sink).expect("reconcile");

        assert!(report.outcomes.is_empty());
        assert!(sink.calls.is_empty());
        assert_eq!(report.before, report.after);
    }

    #[test]
    fn report_does_not_mutate_source_roster() {
        let catalog = catalog();
        let current = roster();
        let snapshot = current.clone();
        let plan = leave_team_plan(&catalog, &current);

        let mut sink = ScriptedSink::new(None);
        reconcile(&current, &plan, &catalog, &mut sink).expect("reconcile");
        assert_eq!(current, snapshot);
    }

    #[test]
    fn explicit_restore_plan_applies_roles_verbatim() {
        let catalog = catalog();
        let current = roster();

        let mut desired = DesiredRoster::new();
        desired.insert(DesiredMember {
            username: "ada#1".to_string(),
            name: NameTarget::Set("ada#1".to_string()),
            roles: RoleTarget::Explicit(
                [RoleId(2), RoleId(4)].into_iter().collect::<BTreeSet<_>>(),
            ),
        });
        let plan = diff::plan(&current, &desired, &catalog).expect("plan");

        let mut sink = ScriptedSink::new(None);
        let report = reconcile(&current, &plan, &catalog, &mut sink).expect("reconcile");
        assert!(report.is_clean());

        let after_rows = rollcall_codec::decode(&report.after, &catalog).expect("decode");
        assert_eq!(after_rows[0].flags, vec![false, true, false, true]);
    }
}
