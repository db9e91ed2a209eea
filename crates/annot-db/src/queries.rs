//! SQL for candidate selection and the corrective update.
//!
//! Table and column names come from the fixed [`CategorySpec`] table, never
//! from user input, so they are interpolated directly. Values are always bound.

use annot_core::category::{ANNOTATION_TABLE, CategorySpec, OBJECT_ID_COLUMN};

/// Column order produced by [`candidates_sql`].
pub const COL_FULL_ANNOT_KEY: i32 = 0;
pub const COL_OBJECT_RGD_ID: i32 = 1;
pub const COL_CACHED_SYMBOL: i32 = 2;
pub const COL_CACHED_NAME: i32 = 3;
pub const COL_CURRENT_SYMBOL: i32 = 4;
pub const COL_CURRENT_NAME: i32 = 5;

/// Select every annotation row of one category whose cached symbol or name
/// differs from the authoritative object.
///
/// `IS NOT` is NULL-safe: NULL matches only NULL. `COLLATE BINARY` keeps the
/// comparison case-sensitive regardless of the column's declared collation.
/// Binds `?1` to the category's `RGD_OBJECT_KEY`.
#[must_use]
pub fn candidates_sql(spec: &CategorySpec) -> String {
    let CategorySpec {
        table,
        symbol_column: sym,
        name_column: name,
        ..
    } = spec;
    format!(
        "SELECT f.FULL_ANNOT_KEY, f.ANNOTATED_OBJECT_RGD_ID, f.OBJECT_SYMBOL, f.OBJECT_NAME,
                o.{sym}, o.{name}
         FROM {ANNOTATION_TABLE} f
         JOIN {table} o ON o.{OBJECT_ID_COLUMN} = f.ANNOTATED_OBJECT_RGD_ID
         WHERE f.RGD_OBJECT_KEY = ?1
           AND (f.OBJECT_SYMBOL IS NOT o.{sym} COLLATE BINARY
                OR f.OBJECT_NAME IS NOT o.{name} COLLATE BINARY)
         ORDER BY f.FULL_ANNOT_KEY"
    )
}

/// Overwrite one annotation row's display fields and stamp audit metadata.
///
/// Binds `?1` symbol, `?2` name, `?3` modification timestamp, `?4` modifier,
/// `?5` `FULL_ANNOT_KEY`.
pub const UPDATE_ANNOTATION_SQL: &str = "UPDATE FULL_ANNOT
     SET OBJECT_SYMBOL = ?1, OBJECT_NAME = ?2, LAST_MODIFIED_DATE = ?3, LAST_MODIFIED_BY = ?4
     WHERE FULL_ANNOT_KEY = ?5";
