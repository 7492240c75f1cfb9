//! Error types for rollcall-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{TeamId, UserId};

/// All errors that can arise from loading and resolving the role catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file did not exist at the expected path.
    #[error("catalog configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// YAML parse error on load — includes file path and line context.
    #[error("failed to parse catalog configuration at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A role named by configuration is not present on the platform.
    /// Fatal at start of operation, never per-mutation.
    #[error("configured role '{name}' not found on the platform")]
    UnknownRole { name: String },

    /// Configuration and the platform listing disagree on uniqueness: a
    /// configured name matches several platform roles, or one platform role
    /// is claimed by two configured entries.
    #[error("role '{name}' is ambiguous between configuration and the platform listing")]
    DuplicateRole { name: String },

    /// Two configuration entries declare the same team.
    #[error("team '{team}' is configured more than once")]
    DuplicateTeam { team: TeamId },
}

/// Errors from roster construction.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The member listing repeated a user id.
    #[error("duplicate user id {id} ('{username}') in member listing")]
    DuplicateUser { id: UserId, username: String },
}
