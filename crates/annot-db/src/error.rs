//! Database error types for annot-db.

use annot_core::enums::ObjectType;
use thiserror::Error;

/// Statement a reconcile step was executing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
    SelectCandidates,
    UpdateAnnotation,
}

impl Statement {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SelectCandidates => "select candidates",
            Self::UpdateAnnotation => "update annotation",
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Opening the database or its connection failed.
    #[error("Connection failed ({target}): {source}")]
    Connect {
        target: String,
        #[source]
        source: libsql::Error,
    },

    /// A reconcile statement failed. Fatal for the whole run.
    #[error("Reconcile {category} failed during {statement}: {source}")]
    Reconcile {
        category: ObjectType,
        statement: Statement,
        #[source]
        source: libsql::Error,
    },

    /// Invalid state encountered (e.g., missing configuration).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}
