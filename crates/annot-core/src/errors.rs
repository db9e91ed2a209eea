//! Cross-cutting error types for annot-sync.
//!
//! Database and configuration errors live in their own crates; the CLI
//! converges everything on `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any annot-sync crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// `RGD_OBJECT_KEY` value outside the reconciled object types.
    #[error("Unknown object type code: {0}")]
    UnknownObjectType(i64),

    /// Category name that does not map to a reconciled object type.
    #[error("Unknown category '{0}' (expected gene, strain, qtl, or variant)")]
    UnknownCategory(String),
}
