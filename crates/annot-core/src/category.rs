//! Per-category table and column descriptors.
//!
//! The four reconciled object types differ only in which table holds the
//! authoritative record and what its symbol and name columns are called.
//! Everything downstream works off a [`CategorySpec`] so there is a single
//! reconcile path for all of them.

use serde::Serialize;

use crate::enums::ObjectType;

/// Annotation table every category is reconciled into.
pub const ANNOTATION_TABLE: &str = "FULL_ANNOT";

/// Identifier column shared by every authoritative object table.
pub const OBJECT_ID_COLUMN: &str = "RGD_ID";

/// Where to find the authoritative symbol and name for one object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategorySpec {
    pub object_type: ObjectType,
    pub table: &'static str,
    pub symbol_column: &'static str,
    pub name_column: &'static str,
    /// Label used in log lines and summaries (`GENES`, `VARIANTS`, ...).
    pub label: &'static str,
}

/// All categories, in processing order.
pub static CATEGORIES: [CategorySpec; 4] = [
    CategorySpec {
        object_type: ObjectType::Gene,
        table: "GENES",
        symbol_column: "GENE_SYMBOL",
        name_column: "FULL_NAME",
        label: "GENES",
    },
    CategorySpec {
        object_type: ObjectType::Strain,
        table: "STRAINS",
        symbol_column: "STRAIN_SYMBOL",
        name_column: "FULL_NAME",
        label: "STRAINS",
    },
    CategorySpec {
        object_type: ObjectType::Qtl,
        table: "QTLS",
        symbol_column: "QTL_SYMBOL",
        name_column: "QTL_NAME",
        label: "QTLS",
    },
    CategorySpec {
        object_type: ObjectType::Variant,
        table: "GENOMIC_ELEMENTS",
        symbol_column: "SYMBOL",
        name_column: "NAME",
        label: "VARIANTS",
    },
];

impl CategorySpec {
    /// Descriptor for the given object type.
    #[must_use]
    pub fn for_type(object_type: ObjectType) -> &'static Self {
        match object_type {
            ObjectType::Gene => &CATEGORIES[0],
            ObjectType::Strain => &CATEGORIES[1],
            ObjectType::Qtl => &CATEGORIES[2],
            ObjectType::Variant => &CATEGORIES[3],
        }
    }

    /// Numeric `RGD_OBJECT_KEY` code for this category.
    #[must_use]
    pub const fn code(&self) -> i64 {
        self.object_type.code()
    }
}

/// Resolve a requested subset of object types into category descriptors.
///
/// An empty request selects every category. The result is always in
/// processing order with duplicates removed.
#[must_use]
pub fn select_categories(requested: &[ObjectType]) -> Vec<&'static CategorySpec> {
    CATEGORIES
        .iter()
        .filter(|spec| requested.is_empty() || requested.contains(&spec.object_type))
        .collect()
}
