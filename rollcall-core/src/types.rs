//! Domain types for the Roll Call roster model.
//!
//! Rosters are immutable once constructed: [`Roster::apply`] projects a
//! mutation list onto a copy, never edits in place. All types that appear in
//! fixture files are serializable via serde.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Stable platform user id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Platform role id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RoleId(pub u64);

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for RoleId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A team identifier as it appears in configuration and spreadsheet cells
/// (e.g. `"8097"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub String);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TeamId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TeamId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Role classification
// ---------------------------------------------------------------------------

/// Category of a platform role, assigned by configuration.
///
/// Resolved once at catalog load; the engine never matches on role names at
/// mutation time. `Other` covers every platform role the configuration does
/// not claim — those are never mutated and never snapshotted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleKind {
    /// Membership marker for one team.
    Team(TeamId),
    /// Former-membership marker for one team.
    TeamAlumni(TeamId),
    /// Server-wide "currently on a team" singleton.
    Active,
    /// Server-wide "formerly on a team" singleton.
    Alumni,
    /// Unmanaged role; reconciliation ignores it.
    Other,
}

// ---------------------------------------------------------------------------
// Members and rosters
// ---------------------------------------------------------------------------

/// One guild member as the platform lists it.
///
/// `username` is the platform-qualified unique handle; `display_name` is the
/// per-guild nickname the reconciler manages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub role_ids: BTreeSet<RoleId>,
    #[serde(default)]
    pub is_administrator: bool,
}

/// A point-in-time mapping of members to display names and role sets.
///
/// Members keep platform-listing order, which is also snapshot row order.
/// Invariant: user ids are unique within a roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    members: Vec<Member>,
}

impl Roster {
    /// Build a roster from a live member listing.
    ///
    /// Fails with [`crate::RosterError::DuplicateUser`] if the listing repeats
    /// a user id.
    pub fn new(members: Vec<Member>) -> Result<Self, crate::RosterError> {
        let mut seen = BTreeSet::new();
        for member in &members {
            if !seen.insert(member.id) {
                return Err(crate::RosterError::DuplicateUser {
                    id: member.id,
                    username: member.username.clone(),
                });
            }
        }
        Ok(Self { members })
    }

    /// Members in platform-listing order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn by_id(&self, id: UserId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn by_username(&self, username: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.username == username)
    }

    /// Project a mutation list onto a copy of this roster.
    ///
    /// Mutations addressing ids not present in the roster are ignored; the
    /// source roster is never touched.
    pub fn apply(&self, mutations: &[Mutation]) -> Roster {
        let mut members = self.members.clone();
        for mutation in mutations {
            if let Some(member) = members.iter_mut().find(|m| m.id == mutation.user()) {
                mutation.apply_to(member);
            }
        }
        Roster { members }
    }
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// One atomic per-user state change.
///
/// A user's full change is an ordered bundle of these; see the diff engine
/// for bundle ordering rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    SetDisplayName { user: UserId, name: String },
    GrantRole { user: UserId, role: RoleId },
    RevokeRole { user: UserId, role: RoleId },
}

impl Mutation {
    /// The user this mutation targets.
    pub fn user(&self) -> UserId {
        match self {
            Mutation::SetDisplayName { user, .. }
            | Mutation::GrantRole { user, .. }
            | Mutation::RevokeRole { user, .. } => *user,
        }
    }

    /// Apply this mutation to a member record in place.
    ///
    /// The caller has already matched `member.id` to [`Mutation::user`].
    pub fn apply_to(&self, member: &mut Member) {
        match self {
            Mutation::SetDisplayName { name, .. } => {
                member.display_name = name.clone();
            }
            Mutation::GrantRole { role, .. } => {
                member.role_ids.insert(*role);
            }
            Mutation::RevokeRole { role, .. } => {
                member.role_ids.remove(role);
            }
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::SetDisplayName { user, name } => {
                write!(f, "rename user {user} to \"{name}\"")
            }
            Mutation::GrantRole { user, role } => write!(f, "grant role {role} to user {user}"),
            Mutation::RevokeRole { user, role } => {
                write!(f, "revoke role {role} from user {user}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Desired state
// ---------------------------------------------------------------------------

/// Tri-state display-name target.
///
/// A spreadsheet row with an empty first-name cell means "leave the display
/// name as-is", which is distinct from targeting any particular name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameTarget {
    Unspecified,
    Set(String),
}

/// Role target for one desired member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleTarget {
    /// Spreadsheet path: a team assignment, or none. `team: None` is a
    /// meaningful desired state (drives the alumni transition), not a skip.
    Membership { team: Option<TeamId> },
    /// Restored-backup path: every managed role flag explicit.
    Explicit(BTreeSet<RoleId>),
}

/// Target state for one member, keyed by username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredMember {
    pub username: String,
    pub name: NameTarget,
    pub roles: RoleTarget,
}

/// Target roster: desired members in insertion order, unique by username.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DesiredRoster {
    entries: Vec<DesiredMember>,
}

impl DesiredRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a desired member. A later entry for the same username replaces
    /// the earlier one (spreadsheet rows are ordered; later rows win).
    pub fn insert(&mut self, member: DesiredMember) {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|e| e.username == member.username)
        {
            *existing = member;
        } else {
            self.entries.push(member);
        }
    }

    pub fn get(&self, username: &str) -> Option<&DesiredMember> {
        self.entries.iter().find(|e| e.username == username)
    }

    pub fn entries(&self) -> &[DesiredMember] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
