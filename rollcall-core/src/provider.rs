//! Collaborator interfaces — the records external systems supply and the
//! mutation sink the reconciler drives.
//!
//! The engine never talks to the platform directly: it receives member and
//! role listings as plain data and pushes changes through [`MutationSink`].
//! Front ends (a bot session, the CLI's file-backed rehearsal sink, test
//! doubles) implement the sink.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{RoleId, UserId};

// ---------------------------------------------------------------------------
// Input records
// ---------------------------------------------------------------------------

/// One platform role as the role listing reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformRole {
    pub id: RoleId,
    pub name: String,
}

/// One spreadsheet row.
///
/// Cells arrive as raw strings; empty cells carry meaning (see the roster
/// builders) so no cell is optional at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SheetRow {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_initial: String,
    #[serde(default)]
    pub team: String,
}

// ---------------------------------------------------------------------------
// Mutation sink
// ---------------------------------------------------------------------------

/// A single platform call failed (rate limit, missing member, permissions).
///
/// Isolated per mutation by the reconciler; never aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PlatformError {
    pub message: String,
}

impl PlatformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Where mutations land: the live platform, or a stand-in for it.
///
/// Implementations make one attempt per call; retry policy, if any, belongs
/// to the implementation, not the reconciler.
pub trait MutationSink {
    fn set_display_name(&mut self, user: UserId, name: &str) -> Result<(), PlatformError>;
    fn grant_role(&mut self, user: UserId, role: RoleId) -> Result<(), PlatformError>;
    fn revoke_role(&mut self, user: UserId, role: RoleId) -> Result<(), PlatformError>;
}
