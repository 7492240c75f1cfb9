//! Roll Call core library — roster domain types, role catalog, collaborator
//! interfaces, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes, the roster model, mutations, desired state
//! - [`catalog`] — [`catalog::CatalogConfig`] / [`catalog::RoleCatalog`]
//! - [`provider`] — platform records and the [`provider::MutationSink`] seam
//! - [`error`] — [`CatalogError`], [`RosterError`]

pub mod catalog;
pub mod error;
pub mod provider;
pub mod types;

pub use catalog::{CatalogConfig, RoleCatalog};
pub use error::{CatalogError, RosterError};
pub use provider::{MutationSink, PlatformError, PlatformRole, SheetRow};
pub use types::{
    DesiredMember, DesiredRoster, Member, Mutation, NameTarget, RoleId, RoleKind, RoleTarget,
    Roster, TeamId, UserId,
};
