//! Subcommand implementations and shared rendering helpers.

pub mod apply;
pub mod backup;
pub mod plan;
pub mod restore;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use rollcall_core::catalog::RoleCatalog;
use rollcall_core::types::{Mutation, RoleId, Roster};
use rollcall_engine::{MutationOutcome, ReconcilePlan, ReconcileReport};

use crate::input;

// ---------------------------------------------------------------------------
// Shared source arguments
// ---------------------------------------------------------------------------

/// Inputs every subcommand needs: the platform exports and the catalog.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Member-list export (JSON array of members).
    #[arg(long, value_name = "FILE")]
    pub members: PathBuf,

    /// Role-list export (JSON array of {id, name} records).
    #[arg(long, value_name = "FILE")]
    pub roles: PathBuf,

    /// Role catalog configuration (defaults to ~/.rollcall/config.yaml).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl SourceArgs {
    /// Load the current roster and resolve the role catalog.
    pub fn load(&self) -> Result<(Roster, RoleCatalog)> {
        let members = input::load_members(&self.members)?;
        let roster = Roster::new(members).context("invalid member export")?;
        let platform = input::load_roles(&self.roles)?;
        let config = input::resolve_config(self.config.as_deref())?;
        let catalog =
            RoleCatalog::resolve(&config, &platform).context("failed to resolve role catalog")?;
        Ok((roster, catalog))
    }
}

// ---------------------------------------------------------------------------
// Plan rendering
// ---------------------------------------------------------------------------

#[derive(Tabled)]
struct PlanTableRow {
    #[tabled(rename = "member")]
    member: String,
    #[tabled(rename = "action")]
    action: String,
    #[tabled(rename = "detail")]
    detail: String,
}

#[derive(Serialize)]
pub(crate) struct PlanJson {
    summary: PlanSummaryJson,
    mutations: Vec<MutationJson>,
}

#[derive(Serialize)]
struct PlanSummaryJson {
    members: usize,
    mutations: usize,
}

#[derive(Serialize)]
struct MutationJson {
    member: String,
    action: String,
    detail: String,
}

fn role_name(catalog: &RoleCatalog, role: RoleId) -> String {
    catalog
        .roles()
        .iter()
        .find(|r| r.id == role)
        .map(|r| r.name.clone())
        .unwrap_or_else(|| format!("role {role}"))
}

fn describe(mutation: &Mutation, catalog: &RoleCatalog) -> (&'static str, String) {
    match mutation {
        Mutation::SetDisplayName { name, .. } => ("rename", format!("→ \"{name}\"")),
        Mutation::GrantRole { role, .. } => ("grant", role_name(catalog, *role)),
        Mutation::RevokeRole { role, .. } => ("revoke", role_name(catalog, *role)),
    }
}

/// Print a mutation plan as a rounded table, one row per mutation.
pub(crate) fn print_plan(plan: &ReconcilePlan, catalog: &RoleCatalog, prefix: &str) {
    if plan.is_empty() {
        println!("{prefix}{} nothing to reconcile", "✓".green().bold());
        return;
    }

    let rows: Vec<PlanTableRow> = plan
        .members()
        .iter()
        .flat_map(|member| {
            member.mutations.iter().map(|mutation| {
                let (action, detail) = describe(mutation, catalog);
                PlanTableRow {
                    member: member.username.clone(),
                    action: action.to_string(),
                    detail,
                }
            })
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!(
        "{prefix}{} mutation(s) across {} member(s)",
        plan.mutation_count(),
        plan.members().len()
    );
}

pub(crate) fn plan_json(plan: &ReconcilePlan, catalog: &RoleCatalog) -> PlanJson {
    PlanJson {
        summary: PlanSummaryJson {
            members: plan.members().len(),
            mutations: plan.mutation_count(),
        },
        mutations: plan
            .members()
            .iter()
            .flat_map(|member| {
                member.mutations.iter().map(|mutation| {
                    let (action, detail) = describe(mutation, catalog);
                    MutationJson {
                        member: member.username.clone(),
                        action: action.to_string(),
                        detail,
                    }
                })
            })
            .collect(),
    }
}

pub(crate) fn print_json<T: Serialize>(payload: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(payload).context("failed to serialize JSON output")?
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Report rendering
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub(crate) struct ReportJson {
    applied: usize,
    failed: usize,
    failures: Vec<FailureJson>,
}

#[derive(Serialize)]
struct FailureJson {
    member: String,
    action: String,
    detail: String,
    error: String,
}

pub(crate) fn report_json(report: &ReconcileReport, catalog: &RoleCatalog) -> ReportJson {
    ReportJson {
        applied: report.applied_count(),
        failed: report.failed_count(),
        failures: report.failed().map(|o| failure_json(o, catalog)).collect(),
    }
}

fn failure_json(outcome: &MutationOutcome, catalog: &RoleCatalog) -> FailureJson {
    let (action, detail) = describe(&outcome.mutation, catalog);
    FailureJson {
        member: outcome.username.clone(),
        action: action.to_string(),
        detail,
        error: outcome
            .result
            .as_ref()
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default(),
    }
}

pub(crate) fn print_report(report: &ReconcileReport, catalog: &RoleCatalog) {
    if report.is_clean() {
        println!(
            "{} applied {} mutation(s)",
            "✓".green().bold(),
            report.applied_count()
        );
        return;
    }

    println!(
        "{} applied {} mutation(s), {} failed",
        "✗".red().bold(),
        report.applied_count(),
        report.failed_count()
    );
    for outcome in report.failed() {
        let (action, detail) = describe(&outcome.mutation, catalog);
        let cause = outcome
            .result
            .as_ref()
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        println!(
            "  {} {}: {} {} — {}",
            "✗".red(),
            outcome.username,
            action,
            detail,
            cause
        );
    }
}
