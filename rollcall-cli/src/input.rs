//! Fixture loading and the file-backed mutation sink.
//!
//! The member-list JSON stands in for the platform: commands read the
//! roster from it, and `apply`/`restore --apply` write the reconciled state
//! back to it through [`FileSink`].

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use rollcall_core::catalog::CatalogConfig;
use rollcall_core::provider::{MutationSink, PlatformError, PlatformRole, SheetRow};
use rollcall_core::types::{Member, RoleId, UserId};

// ---------------------------------------------------------------------------
// Exports
// ---------------------------------------------------------------------------

/// Load a member-list export: a JSON array of members.
pub fn load_members(path: &Path) -> Result<Vec<Member>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("cannot read member export '{}'", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("cannot parse member export '{}'", path.display()))
}

/// Load a role-list export: a JSON array of `{id, name}` records.
pub fn load_roles(path: &Path) -> Result<Vec<PlatformRole>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("cannot read role export '{}'", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("cannot parse role export '{}'", path.display()))
}

// ---------------------------------------------------------------------------
// Catalog configuration
// ---------------------------------------------------------------------------

/// `--config` flag, else `~/.rollcall/config.yaml`.
pub fn resolve_config(flag: Option<&Path>) -> Result<CatalogConfig> {
    let path = match flag {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };
    CatalogConfig::load(&path).context("failed to load catalog configuration")
}

fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(home.join(".rollcall").join("config.yaml"))
}

// ---------------------------------------------------------------------------
// Sheet sources
// ---------------------------------------------------------------------------

/// Load spreadsheet rows from a CSV file path or a published-CSV URL.
///
/// Expected header: `username,first_name,last_initial,team`. Extra columns
/// are ignored; missing ones read as empty cells.
pub fn load_sheet(source: &str) -> Result<Vec<SheetRow>> {
    let text = if source.starts_with("http://") || source.starts_with("https://") {
        fetch_sheet(source)?
    } else {
        fs::read_to_string(source)
            .with_context(|| format!("cannot read sheet '{source}'"))?
    };
    parse_sheet(&text)
}

fn fetch_sheet(url: &str) -> Result<String> {
    let response = ureq::get(url)
        .call()
        .with_context(|| format!("failed to fetch sheet from '{url}'"))?;
    response
        .into_string()
        .context("sheet response was not valid UTF-8")
}

fn parse_sheet(text: &str) -> Result<Vec<SheetRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize().enumerate() {
        let row: SheetRow =
            result.with_context(|| format!("malformed sheet row {}", idx + 2))?;
        rows.push(row);
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// File-backed mutation sink
// ---------------------------------------------------------------------------

/// Applies mutations to the member-list export in memory; [`FileSink::save`]
/// persists the result back to disk.
pub struct FileSink {
    path: PathBuf,
    members: Vec<Member>,
}

impl FileSink {
    pub fn open(path: &Path) -> Result<Self> {
        let members = load_members(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            members,
        })
    }

    /// Write the mutated member list back to the export file.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.members)
            .context("failed to serialize member export")?;
        fs::write(&self.path, json)
            .with_context(|| format!("cannot write member export '{}'", self.path.display()))
    }

    fn find(&mut self, user: UserId) -> Result<&mut Member, PlatformError> {
        self.members
            .iter_mut()
            .find(|m| m.id == user)
            .ok_or_else(|| PlatformError::new(format!("unknown member {user}")))
    }
}

impl MutationSink for FileSink {
    fn set_display_name(&mut self, user: UserId, name: &str) -> Result<(), PlatformError> {
        self.find(user)?.display_name = name.to_string();
        Ok(())
    }

    fn grant_role(&mut self, user: UserId, role: RoleId) -> Result<(), PlatformError> {
        self.find(user)?.role_ids.insert(role);
        Ok(())
    }

    fn revoke_role(&mut self, user: UserId, role: RoleId) -> Result<(), PlatformError> {
        self.find(user)?.role_ids.remove(&role);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
