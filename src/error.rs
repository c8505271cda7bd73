//! Error types for the input loading path
//!
//! Lookups themselves never fail: a missing key is `None`. Errors only
//! arise while building tables from external sources.

use crate::table::TableKey;
use std::path::PathBuf;
use thiserror::Error;

/// Error raised while loading reference bindings or input tables
#[derive(Debug, Error)]
pub enum InputError {
    #[error("I/O error reading input")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV input")]
    Csv(#[from] csv::Error),

    #[error("malformed references JSON")]
    Json(#[from] serde_json::Error),

    /// Two rows in one source resolved to the same composite key
    #[error("duplicate key {key:?} in input table")]
    DuplicateKey { key: TableKey },

    /// A bound reference's source file is missing from the input directory
    #[error("source file {path} for reference {name} not found")]
    MissingSource { name: String, path: PathBuf },
}
