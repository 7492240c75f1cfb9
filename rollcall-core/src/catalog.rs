//! Role catalog — configuration-declared role categories resolved once
//! against the platform's role listing.
//!
//! # Configuration format
//!
//! ```yaml
//! teams:
//!   - team: "8097"
//!     role: "Team 8097"
//!     alumni_role: "Team 8097 Alumni"
//! active_role: "Active"
//! alumni_role: "Alumni"
//! ```
//!
//! Resolution maps every configured role name to a platform role id and a
//! [`RoleKind`]. Column order is fixed here and nowhere else: per team the
//! team role then its alumni role (configuration order), then `Active`, then
//! `Alumni`. Snapshots and plan tables inherit this order, so backups stay
//! diffable across runs.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::provider::PlatformRole;
use crate::types::{RoleId, RoleKind, TeamId};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// One team's role pair in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamConfig {
    pub team: TeamId,
    /// Platform name of the team-membership role.
    pub role: String,
    /// Platform name of the team-alumni role.
    pub alumni_role: String,
}

/// The role catalog configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub teams: Vec<TeamConfig>,
    pub active_role: String,
    pub alumni_role: String,
}

impl CatalogConfig {
    /// Load configuration from a YAML file.
    ///
    /// Returns `CatalogError::ConfigNotFound` if absent, `CatalogError::Parse`
    /// (with path and line context) if malformed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&contents).map_err(|e| CatalogError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

// ---------------------------------------------------------------------------
// Resolved catalog
// ---------------------------------------------------------------------------

/// One managed role with its resolved platform id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRole {
    pub id: RoleId,
    pub name: String,
    pub kind: RoleKind,
}

/// The resolved role catalog: managed roles in snapshot column order plus
/// category lookup by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCatalog {
    roles: Vec<CatalogRole>,
    active: RoleId,
    alumni: RoleId,
}

impl RoleCatalog {
    /// Resolve configuration against the platform role listing.
    ///
    /// Every configured name must match exactly one platform role; this is
    /// fatal at start of operation so a half-resolved catalog can never reach
    /// the diff engine.
    pub fn resolve(
        config: &CatalogConfig,
        platform: &[PlatformRole],
    ) -> Result<Self, CatalogError> {
        let mut roles = Vec::new();
        let mut claimed = BTreeSet::new();
        let mut teams = BTreeSet::new();

        for team in &config.teams {
            if !teams.insert(team.team.clone()) {
                return Err(CatalogError::DuplicateTeam {
                    team: team.team.clone(),
                });
            }
            let role_id = find_role(platform, &team.role)?;
            claim(&mut claimed, role_id, &team.role)?;
            roles.push(CatalogRole {
                id: role_id,
                name: team.role.clone(),
                kind: RoleKind::Team(team.team.clone()),
            });

            let alumni_id = find_role(platform, &team.alumni_role)?;
            claim(&mut claimed, alumni_id, &team.alumni_role)?;
            roles.push(CatalogRole {
                id: alumni_id,
                name: team.alumni_role.clone(),
                kind: RoleKind::TeamAlumni(team.team.clone()),
            });
        }

        let active = find_role(platform, &config.active_role)?;
        claim(&mut claimed, active, &config.active_role)?;
        roles.push(CatalogRole {
            id: active,
            name: config.active_role.clone(),
            kind: RoleKind::Active,
        });

        let alumni = find_role(platform, &config.alumni_role)?;
        claim(&mut claimed, alumni, &config.alumni_role)?;
        roles.push(CatalogRole {
            id: alumni,
            name: config.alumni_role.clone(),
            kind: RoleKind::Alumni,
        });

        Ok(Self {
            roles,
            active,
            alumni,
        })
    }

    /// Managed roles in snapshot column order.
    pub fn roles(&self) -> &[CatalogRole] {
        &self.roles
    }

    /// Category of a role id; `Other` for anything unconfigured.
    pub fn kind(&self, id: RoleId) -> RoleKind {
        self.roles
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.kind.clone())
            .unwrap_or(RoleKind::Other)
    }

    pub fn is_managed(&self, id: RoleId) -> bool {
        self.roles.iter().any(|r| r.id == id)
    }

    pub fn role_named(&self, name: &str) -> Option<&CatalogRole> {
        self.roles.iter().find(|r| r.name == name)
    }

    /// The membership role for a team, if that team is configured.
    pub fn team_role(&self, team: &TeamId) -> Option<RoleId> {
        self.roles
            .iter()
            .find(|r| matches!(&r.kind, RoleKind::Team(t) if t == team))
            .map(|r| r.id)
    }

    /// The alumni role for a team, if that team is configured.
    pub fn team_alumni_role(&self, team: &TeamId) -> Option<RoleId> {
        self.roles
            .iter()
            .find(|r| matches!(&r.kind, RoleKind::TeamAlumni(t) if t == team))
            .map(|r| r.id)
    }

    pub fn active_role(&self) -> RoleId {
        self.active
    }

    pub fn alumni_role(&self) -> RoleId {
        self.alumni
    }
}

fn find_role(platform: &[PlatformRole], name: &str) -> Result<RoleId, CatalogError> {
    let mut matches = platform.iter().filter(|r| r.name == name);
    let first = matches.next().ok_or_else(|| CatalogError::UnknownRole {
        name: name.to_string(),
    })?;
    if matches.next().is_some() {
        return Err(CatalogError::DuplicateRole {
            name: name.to_string(),
        });
    }
    Ok(first.id)
}

fn claim(claimed: &mut BTreeSet<RoleId>, id: RoleId, name: &str) -> Result<(), CatalogError> {
    if !claimed.insert(id) {
        return Err(CatalogError::DuplicateRole {
            name: name.to_string(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
