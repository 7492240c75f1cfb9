//! # rollcall-codec
//!
//! Snapshot table codec: serializes a roster to the backup wire format
//! (always-quoted CSV, gzip-compressed) and parses it back.
//!
//! Call [`encode`] to produce a backup artifact, [`decode`] to parse one.
//! [`encode_table`] exposes the uncompressed table text for audit diffs.

pub mod error;
pub mod snapshot;

pub use error::CodecError;
pub use snapshot::{decode, encode, encode_table, snapshot_rows, SnapshotRow};
