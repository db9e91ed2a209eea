//! Shared test utilities for annot-db unit tests.

use annot_core::category::CategorySpec;
use annot_core::enums::ObjectType;

use crate::AnnotDb;

const SCHEMA: &str = include_str!("../tests/fixtures/schema.sql");

/// Snapshot of the fields a reconcile pass may touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotRow {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub last_modified_date: Option<String>,
    pub last_modified_by: Option<i64>,
}

/// In-memory database with the fixture schema applied.
pub async fn test_db() -> AnnotDb {
    let db = AnnotDb::open_local(":memory:").await.unwrap();
    db.conn().execute_batch(SCHEMA).await.unwrap();
    db
}

pub async fn insert_annotation(
    db: &AnnotDb,
    key: i64,
    object_type: ObjectType,
    rgd_id: i64,
    symbol: Option<&str>,
    name: Option<&str>,
) {
    db.conn()
        .execute(
            "INSERT INTO FULL_ANNOT (FULL_ANNOT_KEY, RGD_OBJECT_KEY, ANNOTATED_OBJECT_RGD_ID, OBJECT_SYMBOL, OBJECT_NAME)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            libsql::params![key, object_type.code(), rgd_id, symbol, name],
        )
        .await
        .unwrap();
}

pub async fn insert_object(
    db: &AnnotDb,
    object_type: ObjectType,
    rgd_id: i64,
    symbol: Option<&str>,
    name: Option<&str>,
) {
    let spec = CategorySpec::for_type(object_type);
    db.conn()
        .execute(
            &format!(
                "INSERT INTO {} (RGD_ID, {}, {}) VALUES (?1, ?2, ?3)",
                spec.table, spec.symbol_column, spec.name_column
            ),
            libsql::params![rgd_id, symbol, name],
        )
        .await
        .unwrap();
}

pub async fn read_annotation(db: &AnnotDb, key: i64) -> AnnotRow {
    let mut rows = db
        .conn()
        .query(
            "SELECT OBJECT_SYMBOL, OBJECT_NAME, LAST_MODIFIED_DATE, LAST_MODIFIED_BY
             FROM FULL_ANNOT WHERE FULL_ANNOT_KEY = ?1",
            [key],
        )
        .await
        .unwrap();
    let row = rows.next().await.unwrap().expect("annotation row exists");
    AnnotRow {
        symbol: row.get::<Option<String>>(0).unwrap(),
        name: row.get::<Option<String>>(1).unwrap(),
        last_modified_date: row.get::<Option<String>>(2).unwrap(),
        last_modified_by: row.get::<Option<i64>>(3).unwrap(),
    }
}
