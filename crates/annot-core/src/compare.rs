//! NULL-safe field comparison.
//!
//! Candidate rows are selected in SQL with `IS NOT`, which treats NULL as a
//! value equal only to another NULL. The in-process re-check must agree with
//! that predicate exactly: NULL never equals a string (not even `""`), and
//! strings compare byte-for-byte, case-sensitively.

use serde::Serialize;

use crate::entities::JoinedPair;

/// Equality rule shared with the SQL selection predicate.
#[must_use]
pub fn fields_equal(cached: Option<&str>, authoritative: Option<&str>) -> bool {
    match (cached, authoritative) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Which cached fields have drifted from the authoritative object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldChanges {
    pub symbol: bool,
    pub name: bool,
}

impl FieldChanges {
    /// Compare both fields of a joined pair.
    #[must_use]
    pub fn assess(pair: &JoinedPair) -> Self {
        Self {
            symbol: !fields_equal(
                pair.annotation.object_symbol.as_deref(),
                pair.object.symbol.as_deref(),
            ),
            name: !fields_equal(
                pair.annotation.object_name.as_deref(),
                pair.object.name.as_deref(),
            ),
        }
    }

    #[must_use]
    pub const fn any(self) -> bool {
        self.symbol || self.name
    }
}
