//! Rows read from the annotation table and the authoritative object tables.

use serde::Serialize;

/// Cached display fields of one `FULL_ANNOT` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationRecord {
    pub full_annot_key: i64,
    pub annotated_object_rgd_id: i64,
    pub object_symbol: Option<String>,
    pub object_name: Option<String>,
}

/// Current symbol and name of an object in its own table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthoritativeObject {
    pub rgd_id: i64,
    pub symbol: Option<String>,
    pub name: Option<String>,
}

/// An annotation row joined to the object it describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinedPair {
    pub annotation: AnnotationRecord,
    pub object: AuthoritativeObject,
}

impl JoinedPair {
    #[must_use]
    pub const fn full_annot_key(&self) -> i64 {
        self.annotation.full_annot_key
    }

    #[must_use]
    pub const fn rgd_id(&self) -> i64 {
        self.object.rgd_id
    }
}
