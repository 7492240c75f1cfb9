//! Error types for rollcall-engine.

use thiserror::Error;

use rollcall_codec::CodecError;
use rollcall_core::types::TeamId;

/// All errors that can arise from planning and reconciling.
///
/// Single-mutation platform failures are NOT here: those are isolated as
/// [`crate::MutationOutcome`] entries, never errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A backup artifact failed to decode — the operation aborts before any
    /// mutation is attempted.
    #[error("malformed backup: {0}")]
    Codec(#[from] CodecError),

    /// A spreadsheet row assigns a team the catalog does not configure.
    /// Fatal for the whole plan; a silently skipped team would report
    /// success while leaving state unreconciled.
    #[error("sheet row for '{username}' names unconfigured team '{team}'")]
    UnknownTeam { username: String, team: TeamId },
}
