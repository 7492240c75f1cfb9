//! Snapshot encode/decode.
//!
//! # Wire format
//!
//! UTF-8 CSV, every field double-quoted, gzip-compressed:
//!
//! ```text
//! "Username","Display Name","Team 8097","Team 8097 Alumni","Active","Alumni"
//! "ada#1","Ada L.","1","0","1","0"
//! ```
//!
//! Rows follow roster (platform-listing) order; role columns follow catalog
//! order, so consecutive backups diff cleanly. Flag cells are the literal
//! characters `1`/`0`. The compressed bytes are treated as an opaque
//! attachment by every front end.

use std::io::{Read, Write};

use flate2::write::GzEncoder;
use flate2::Compression;

use rollcall_core::catalog::RoleCatalog;
use rollcall_core::types::Roster;

use crate::error::CodecError;

/// First header column.
pub const USERNAME_COLUMN: &str = "Username";
/// Second header column.
pub const DISPLAY_NAME_COLUMN: &str = "Display Name";

/// One decoded (or to-be-encoded) table row. `flags` is parallel to the
/// catalog's managed-role columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRow {
    pub username: String,
    pub display_name: String,
    pub flags: Vec<bool>,
}

/// The table rows a roster snapshots to, in roster order.
pub fn snapshot_rows(roster: &Roster, catalog: &RoleCatalog) -> Vec<SnapshotRow> {
    roster
        .members()
        .iter()
        .map(|member| SnapshotRow {
            username: member.username.clone(),
            display_name: member.display_name.clone(),
            flags: catalog
                .roles()
                .iter()
                .map(|role| member.role_ids.contains(&role.id))
                .collect(),
        })
        .collect()
}

fn header(catalog: &RoleCatalog) -> Vec<String> {
    let mut columns = vec![USERNAME_COLUMN.to_string(), DISPLAY_NAME_COLUMN.to_string()];
    columns.extend(catalog.roles().iter().map(|role| role.name.clone()));
    columns
}

/// Render the uncompressed snapshot table.
///
/// This is the exact text that [`encode`] compresses; the audit summary
/// diffs two of these.
pub fn encode_table(roster: &Roster, catalog: &RoleCatalog) -> Result<String, CodecError> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .from_writer(&mut buf);
        writer.write_record(header(catalog))?;
        for row in snapshot_rows(roster, catalog) {
            let mut record = vec![row.username, row.display_name];
            record.extend(
                row.flags
                    .iter()
                    .map(|&flag| if flag { "1" } else { "0" }.to_string()),
            );
            writer.write_record(&record)?;
        }
        writer.flush()?;
    }
    Ok(String::from_utf8(buf)?)
}

/// Encode a roster to the compressed backup artifact.
pub fn encode(roster: &Roster, catalog: &RoleCatalog) -> Result<Vec<u8>, CodecError> {
    let table = encode_table(roster, catalog)?;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(table.as_bytes())?;
    Ok(encoder.finish()?)
}

/// Decode a backup artifact into table rows.
///
/// Validation is strict: the header must match the catalog's columns exactly,
/// every row must have the header's column count, and every flag cell must be
/// the literal `0` or `1`. Unknown usernames are NOT validated here — they
/// simply match no current member at diff time.
pub fn decode(bytes: &[u8], catalog: &RoleCatalog) -> Result<Vec<SnapshotRow>, CodecError> {
    let mut decoder = flate2::read::GzDecoder::new(std::io::Cursor::new(bytes));
    let mut text = String::new();
    decoder.read_to_string(&mut text)?;

    if text.trim().is_empty() {
        return Err(CodecError::MissingHeader);
    }

    let expected = header(catalog);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let found: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if found.is_empty() {
        return Err(CodecError::MissingHeader);
    }
    if found != expected {
        return Err(CodecError::HeaderMismatch { expected, found });
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        if record.len() != expected.len() {
            return Err(CodecError::RowShape {
                line,
                expected: expected.len(),
                found: record.len(),
            });
        }

        let mut flags = Vec::with_capacity(expected.len() - 2);
        for (idx, cell) in record.iter().skip(2).enumerate() {
            match cell {
                "1" => flags.push(true),
                "0" => flags.push(false),
                other => {
                    return Err(CodecError::BadFlag {
                        line,
                        column: expected[idx + 2].clone(),
                        value: other.to_string(),
                    })
                }
            }
        }

        rows.push(SnapshotRow {
            username: record[0].to_string(),
            display_name: record[1].to_string(),
            flags,
        });
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
