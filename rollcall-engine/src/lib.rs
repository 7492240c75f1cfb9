//! # rollcall-engine
//!
//! The reconciliation engine: builds current and desired rosters, computes
//! the minimal per-user mutation plan, and applies it best-effort through a
//! [`rollcall_core::MutationSink`].
//!
//! Call [`pipeline::plan_from_sheet`] or [`pipeline::plan_from_backup`] for
//! the one-shot entrypoints, [`reconcile`] to apply a plan, and
//! [`summary::audit`] for the human-auditable before/after tables.

pub mod diff;
pub mod error;
pub mod pipeline;
pub mod reconcile;
pub mod roster;
pub mod summary;

pub use diff::{plan, MemberPlan, ReconcilePlan};
pub use error::EngineError;
pub use reconcile::{reconcile, MutationOutcome, ReconcileReport};
pub use roster::{desired_from_backup, desired_from_sheet};
pub use summary::{audit, AuditSummary};
