//! Error types for rollcall-codec.
//!
//! Every variant below aborts a restore before any mutation is attempted;
//! decode is all-or-nothing.

use thiserror::Error;

/// All errors that can arise from encoding or decoding a backup artifact.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Gzip framing or underlying I/O failure (also covers a stream that is
    /// not valid UTF-8 after decompression).
    #[error("backup I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The in-memory table buffer was not valid UTF-8 (encode path).
    #[error("backup encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// CSV reader/writer internals.
    #[error("backup table error: {0}")]
    Csv(#[from] csv::Error),

    /// The decompressed document is empty — no header row.
    #[error("backup file is empty: missing header row")]
    MissingHeader,

    /// The header row does not match the configured role catalog.
    #[error("backup header {found:?} does not match the configured columns {expected:?}")]
    HeaderMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A row's column count differs from the header's.
    #[error("row at line {line} has {found} columns, expected {expected}")]
    RowShape {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A membership flag cell is not exactly `0` or `1`.
    #[error("flag cell '{value}' in column '{column}' at line {line} is not 0 or 1")]
    BadFlag {
        line: u64,
        column: String,
        value: String,
    },
}
