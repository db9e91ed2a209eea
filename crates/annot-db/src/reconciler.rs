//! Reconcile cached `FULL_ANNOT` display fields against authoritative objects.
//!
//! For each category the candidate set is read in full before the first
//! UPDATE so that no write runs while a read cursor over `FULL_ANNOT` is open
//! on the same connection. Each UPDATE commits on its own; a failure part-way
//! through a category leaves the earlier rows rewritten, and a re-run picks up
//! the rest.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use annot_core::category::{CategorySpec, select_categories};
use annot_core::compare::FieldChanges;
use annot_core::entities::{AnnotationRecord, AuthoritativeObject, JoinedPair};
use annot_core::enums::ObjectType;
use annot_core::stats::{CategoryStats, RunSummary, UpdateOutcome};

use crate::AnnotDb;
use crate::error::{DatabaseError, Statement};
use crate::helpers::{get_nullable_text, text_or_null};
use crate::queries::{
    COL_CACHED_NAME, COL_CACHED_SYMBOL, COL_CURRENT_NAME, COL_CURRENT_SYMBOL, COL_FULL_ANNOT_KEY,
    COL_OBJECT_RGD_ID, UPDATE_ANNOTATION_SQL, candidates_sql,
};

/// Drives the per-category reconcile passes over one connection.
pub struct Reconciler<'a> {
    db: &'a AnnotDb,
    last_modified_by: i64,
    dry_run: bool,
}

impl<'a> Reconciler<'a> {
    /// Reconciler that stamps `last_modified_by` on every rewritten row.
    #[must_use]
    pub const fn new(db: &'a AnnotDb, last_modified_by: i64) -> Self {
        Self {
            db,
            last_modified_by,
            dry_run: false,
        }
    }

    /// Report what would change without issuing any UPDATE.
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Reconcile every category in processing order.
    ///
    /// # Errors
    ///
    /// Returns the first `DatabaseError`; nothing after it runs.
    pub async fn run(&self) -> Result<RunSummary, DatabaseError> {
        self.run_specs(&select_categories(&[])).await
    }

    /// Reconcile a subset of categories. An empty slice means all of them.
    ///
    /// # Errors
    ///
    /// Returns the first `DatabaseError`; nothing after it runs.
    pub async fn run_selected(&self, types: &[ObjectType]) -> Result<RunSummary, DatabaseError> {
        self.run_specs(&select_categories(types)).await
    }

    async fn run_specs(&self, specs: &[&CategorySpec]) -> Result<RunSummary, DatabaseError> {
        let started = Instant::now();
        let mut categories = Vec::with_capacity(specs.len());
        for spec in specs {
            let stats = self.reconcile_category(spec).await?;
            categories.push(stats.report());
        }
        Ok(RunSummary {
            dry_run: self.dry_run,
            last_modified_by: self.last_modified_by,
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            categories,
        })
    }

    /// Select, re-verify, and rewrite every drifted row of one category.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Reconcile` naming the failing statement.
    pub async fn reconcile_category(
        &self,
        spec: &CategorySpec,
    ) -> Result<CategoryStats, DatabaseError> {
        info!(category = spec.label, dry_run = self.dry_run, "Starting update for {}", spec.label);

        let candidates = self.fetch_candidates(spec).await?;
        let mut stats = CategoryStats::new(spec);

        for pair in &candidates {
            let changes = FieldChanges::assess(pair);
            stats.record_changes(pair, changes);
            log_changes(spec, pair, changes);

            if !changes.any() {
                warn!(
                    category = spec.label,
                    full_annot_key = pair.full_annot_key(),
                    rgd_id = pair.rgd_id(),
                    "candidate selected but no field differs; not rewriting"
                );
                continue;
            }

            let outcome = self.apply_update(spec, pair).await?;
            stats.record_outcome(outcome);
        }

        info!(
            category = spec.label,
            candidates = stats.candidates,
            rows_applied = stats.rows_applied,
            rows_missed = stats.rows_missed,
            "{} Symbol Updates for {} {}",
            stats.symbol_updates,
            stats.distinct_symbol_objects(),
            spec.label
        );
        info!(
            category = spec.label,
            "{} Name Updates for {} {}",
            stats.name_updates,
            stats.distinct_name_objects(),
            spec.label
        );

        Ok(stats)
    }

    /// Read every annotation row of the category whose cached fields differ
    /// from the joined authoritative object. Orphaned annotation rows (no
    /// matching object) are excluded by the join.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Reconcile` if the query or a row read fails.
    pub async fn fetch_candidates(
        &self,
        spec: &CategorySpec,
    ) -> Result<Vec<JoinedPair>, DatabaseError> {
        let fail = |source: libsql::Error| DatabaseError::Reconcile {
            category: spec.object_type,
            statement: Statement::SelectCandidates,
            source,
        };

        let mut rows = self
            .db
            .conn()
            .query(&candidates_sql(spec), [spec.code()])
            .await
            .map_err(fail)?;

        let mut pairs = Vec::new();
        while let Some(row) = rows.next().await.map_err(fail)? {
            pairs.push(row_to_pair(&row).map_err(|e| match e {
                DatabaseError::LibSql(source) => fail(source),
                other => other,
            })?);
        }
        debug!(category = spec.label, count = pairs.len(), "candidates loaded");
        Ok(pairs)
    }

    /// Rewrite one annotation row with the authoritative symbol and name.
    ///
    /// Zero rows affected means the row vanished since it was read; that is
    /// logged and reported as [`UpdateOutcome::Missed`], not an error.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Reconcile` if the UPDATE fails.
    pub async fn apply_update(
        &self,
        spec: &CategorySpec,
        pair: &JoinedPair,
    ) -> Result<UpdateOutcome, DatabaseError> {
        if self.dry_run {
            return Ok(UpdateOutcome::Skipped);
        }

        let now = Utc::now();
        let affected = self
            .db
            .conn()
            .execute(
                UPDATE_ANNOTATION_SQL,
                libsql::params_from_iter(vec![
                    text_or_null(pair.object.symbol.as_deref()),
                    text_or_null(pair.object.name.as_deref()),
                    libsql::Value::Text(now.to_rfc3339()),
                    libsql::Value::Integer(self.last_modified_by),
                    libsql::Value::Integer(pair.full_annot_key()),
                ]),
            )
            .await
            .map_err(|source| DatabaseError::Reconcile {
                category: spec.object_type,
                statement: Statement::UpdateAnnotation,
                source,
            })?;

        if affected == 0 {
            warn!(
                category = spec.label,
                full_annot_key = pair.full_annot_key(),
                rgd_id = pair.rgd_id(),
                "update missed: annotation row no longer exists"
            );
            return Ok(UpdateOutcome::Missed);
        }
        Ok(UpdateOutcome::Applied)
    }
}

fn row_to_pair(row: &libsql::Row) -> Result<JoinedPair, DatabaseError> {
    let rgd_id = row.get::<i64>(COL_OBJECT_RGD_ID)?;
    Ok(JoinedPair {
        annotation: AnnotationRecord {
            full_annot_key: row.get::<i64>(COL_FULL_ANNOT_KEY)?,
            annotated_object_rgd_id: rgd_id,
            object_symbol: get_nullable_text(row, COL_CACHED_SYMBOL)?,
            object_name: get_nullable_text(row, COL_CACHED_NAME)?,
        },
        object: AuthoritativeObject {
            rgd_id,
            symbol: get_nullable_text(row, COL_CURRENT_SYMBOL)?,
            name: get_nullable_text(row, COL_CURRENT_NAME)?,
        },
    })
}

fn log_changes(spec: &CategorySpec, pair: &JoinedPair, changes: FieldChanges) {
    if changes.symbol {
        debug!(
            category = spec.label,
            full_annot_key = pair.full_annot_key(),
            rgd_id = pair.rgd_id(),
            old = ?pair.annotation.object_symbol,
            new = ?pair.object.symbol,
            "SYMBOL changed"
        );
    }
    if changes.name {
        debug!(
            category = spec.label,
            full_annot_key = pair.full_annot_key(),
            rgd_id = pair.rgd_id(),
            old = ?pair.annotation.object_name,
            new = ?pair.object.name,
            "NAME changed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::parse_datetime;
    use crate::test_support::{insert_annotation, insert_object, read_annotation, test_db};
    use annot_core::compare::fields_equal;
    use pretty_assertions::assert_eq;

    const MODIFIER: i64 = 187;

    fn genes() -> &'static CategorySpec {
        CategorySpec::for_type(ObjectType::Gene)
    }

    #[tokio::test]
    async fn symbol_only_drift_rewrites_symbol() {
        let db = test_db().await;
        insert_object(&db, ObjectType::Gene, 1000, Some("Abc1a"), Some("abc protein 1")).await;
        insert_annotation(&db, 101, ObjectType::Gene, 1000, Some("Abc1"), Some("abc protein 1"))
            .await;

        let stats = Reconciler::new(&db, MODIFIER)
            .reconcile_category(genes())
            .await
            .unwrap();

        assert_eq!(stats.symbol_updates, 1);
        assert_eq!(stats.distinct_symbol_objects(), 1);
        assert_eq!(stats.name_updates, 0);
        assert_eq!(stats.distinct_name_objects(), 0);
        assert_eq!(stats.rows_applied, 1);

        let row = read_annotation(&db, 101).await;
        assert_eq!(row.symbol.as_deref(), Some("Abc1a"));
        assert_eq!(row.name.as_deref(), Some("abc protein 1"));
        assert_eq!(row.last_modified_by, Some(MODIFIER));
        let stamped = parse_datetime(row.last_modified_date.as_deref().unwrap()).unwrap();
        assert!((Utc::now() - stamped).num_seconds() < 60);
    }

    #[tokio::test]
    async fn null_symbols_stay_null_when_name_drifts() {
        let db = test_db().await;
        insert_object(&db, ObjectType::Gene, 2000, None, Some("Y")).await;
        insert_annotation(&db, 202, ObjectType::Gene, 2000, None, Some("X")).await;

        let stats = Reconciler::new(&db, MODIFIER)
            .reconcile_category(genes())
            .await
            .unwrap();

        assert_eq!(stats.symbol_updates, 0);
        assert_eq!(stats.name_updates, 1);

        let row = read_annotation(&db, 202).await;
        assert_eq!(row.symbol, None);
        assert_eq!(row.name.as_deref(), Some("Y"));
    }

    #[tokio::test]
    async fn null_and_empty_string_are_different() {
        let db = test_db().await;
        insert_object(&db, ObjectType::Gene, 3000, Some(""), Some("n")).await;
        insert_annotation(&db, 303, ObjectType::Gene, 3000, None, Some("n")).await;

        let stats = Reconciler::new(&db, MODIFIER)
            .reconcile_category(genes())
            .await
            .unwrap();

        assert_eq!(stats.symbol_updates, 1);
        assert_eq!(read_annotation(&db, 303).await.symbol.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn sql_predicate_agrees_with_equality_rule() {
        let db = test_db().await;
        let values: [Option<&str>; 5] = [None, Some(""), Some("Abc1"), Some("ABC1"), Some("*")];

        // Every cached/authoritative symbol combination, with a stable name.
        let mut key = 0;
        let mut expected = Vec::new();
        for cached in &values {
            for current in &values {
                key += 1;
                let rgd_id = 10_000 + key;
                insert_object(&db, ObjectType::Gene, rgd_id, *current, Some("name")).await;
                insert_annotation(&db, key, ObjectType::Gene, rgd_id, *cached, Some("name")).await;
                if !fields_equal(*cached, *current) {
                    expected.push(key);
                }
            }
        }

        let reconciler = Reconciler::new(&db, MODIFIER);
        let candidates = reconciler.fetch_candidates(genes()).await.unwrap();
        let selected: Vec<i64> = candidates.iter().map(JoinedPair::full_annot_key).collect();
        assert_eq!(selected, expected);

        for pair in &candidates {
            assert!(
                FieldChanges::assess(pair).any(),
                "selected pair has no in-process change: {pair:?}"
            );
        }
    }

    #[tokio::test]
    async fn missing_row_is_reported_as_missed() {
        let db = test_db().await;
        let pair = JoinedPair {
            annotation: AnnotationRecord {
                full_annot_key: 999,
                annotated_object_rgd_id: 1,
                object_symbol: Some("a".into()),
                object_name: None,
            },
            object: AuthoritativeObject {
                rgd_id: 1,
                symbol: Some("b".into()),
                name: None,
            },
        };

        let outcome = Reconciler::new(&db, MODIFIER)
            .apply_update(genes(), &pair)
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Missed);
    }

    #[tokio::test]
    async fn dry_run_leaves_rows_untouched() {
        let db = test_db().await;
        insert_object(&db, ObjectType::Gene, 1000, Some("Abc1a"), Some("n")).await;
        insert_annotation(&db, 101, ObjectType::Gene, 1000, Some("Abc1"), Some("n")).await;

        let stats = Reconciler::new(&db, MODIFIER)
            .dry_run(true)
            .reconcile_category(genes())
            .await
            .unwrap();

        assert_eq!(stats.symbol_updates, 1);
        assert_eq!(stats.rows_skipped, 1);
        assert_eq!(stats.rows_applied, 0);

        let row = read_annotation(&db, 101).await;
        assert_eq!(row.symbol.as_deref(), Some("Abc1"));
        assert_eq!(row.last_modified_by, None);
    }

    #[tokio::test]
    async fn query_failure_names_category_and_statement() {
        let db = test_db().await;
        db.conn().execute("DROP TABLE QTLS", ()).await.unwrap();

        let err = Reconciler::new(&db, MODIFIER)
            .reconcile_category(CategorySpec::for_type(ObjectType::Qtl))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DatabaseError::Reconcile {
                category: ObjectType::Qtl,
                statement: Statement::SelectCandidates,
                ..
            }
        ));
        assert!(err.to_string().contains("select candidates"));
    }

    #[tokio::test]
    async fn run_stops_at_first_failing_category() {
        let db = test_db().await;
        insert_object(&db, ObjectType::Gene, 1, Some("new"), None).await;
        insert_annotation(&db, 1, ObjectType::Gene, 1, Some("old"), None).await;
        db.conn().execute("DROP TABLE STRAINS", ()).await.unwrap();

        let result = Reconciler::new(&db, MODIFIER).run().await;
        assert!(matches!(
            result,
            Err(DatabaseError::Reconcile {
                category: ObjectType::Strain,
                ..
            })
        ));
        // Genes ran before the failure and committed.
        assert_eq!(read_annotation(&db, 1).await.symbol.as_deref(), Some("new"));
    }
}
