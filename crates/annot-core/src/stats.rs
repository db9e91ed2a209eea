//! Per-category change tallies and the run summary.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::category::CategorySpec;
use crate::compare::FieldChanges;
use crate::entities::JoinedPair;
use crate::enums::ObjectType;

/// Result of issuing (or not issuing) the corrective UPDATE for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOutcome {
    /// Exactly one row was rewritten.
    Applied,
    /// The UPDATE matched no row; the annotation was deleted or re-keyed
    /// between the read and the write.
    Missed,
    /// Dry run: the write was not attempted.
    Skipped,
}

/// Accumulator for one category pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStats {
    pub object_type: ObjectType,
    pub label: &'static str,
    pub candidates: u64,
    pub symbol_updates: u64,
    pub name_updates: u64,
    pub objects_with_changed_symbol: BTreeSet<i64>,
    pub objects_with_changed_name: BTreeSet<i64>,
    pub rows_applied: u64,
    pub rows_missed: u64,
    pub rows_skipped: u64,
    /// Candidates the SQL predicate selected but the in-process rule
    /// considered unchanged. Non-zero means the two rules disagree.
    pub unchanged_candidates: u64,
}

impl CategoryStats {
    #[must_use]
    pub const fn new(spec: &CategorySpec) -> Self {
        Self {
            object_type: spec.object_type,
            label: spec.label,
            candidates: 0,
            symbol_updates: 0,
            name_updates: 0,
            objects_with_changed_symbol: BTreeSet::new(),
            objects_with_changed_name: BTreeSet::new(),
            rows_applied: 0,
            rows_missed: 0,
            rows_skipped: 0,
            unchanged_candidates: 0,
        }
    }

    /// Count a candidate and whichever of its fields changed.
    pub fn record_changes(&mut self, pair: &JoinedPair, changes: FieldChanges) {
        self.candidates += 1;
        if changes.symbol {
            self.symbol_updates += 1;
            self.objects_with_changed_symbol.insert(pair.rgd_id());
        }
        if changes.name {
            self.name_updates += 1;
            self.objects_with_changed_name.insert(pair.rgd_id());
        }
        if !changes.any() {
            self.unchanged_candidates += 1;
        }
    }

    pub const fn record_outcome(&mut self, outcome: UpdateOutcome) {
        match outcome {
            UpdateOutcome::Applied => self.rows_applied += 1,
            UpdateOutcome::Missed => self.rows_missed += 1,
            UpdateOutcome::Skipped => self.rows_skipped += 1,
        }
    }

    #[must_use]
    pub fn distinct_symbol_objects(&self) -> usize {
        self.objects_with_changed_symbol.len()
    }

    #[must_use]
    pub fn distinct_name_objects(&self) -> usize {
        self.objects_with_changed_name.len()
    }

    /// Serializable snapshot with set sizes instead of the id sets.
    #[must_use]
    pub fn report(&self) -> CategoryReport {
        CategoryReport {
            category: self.object_type,
            label: self.label,
            candidates: self.candidates,
            symbol_updates: self.symbol_updates,
            symbol_objects: self.distinct_symbol_objects(),
            name_updates: self.name_updates,
            name_objects: self.distinct_name_objects(),
            rows_applied: self.rows_applied,
            rows_missed: self.rows_missed,
            rows_skipped: self.rows_skipped,
        }
    }
}

/// Output shape of one category in the run summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    pub category: ObjectType,
    pub label: &'static str,
    pub candidates: u64,
    pub symbol_updates: u64,
    pub symbol_objects: usize,
    pub name_updates: u64,
    pub name_objects: usize,
    pub rows_applied: u64,
    pub rows_missed: u64,
    pub rows_skipped: u64,
}

/// Everything a run reports back to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub dry_run: bool,
    pub last_modified_by: i64,
    pub elapsed_ms: u64,
    pub categories: Vec<CategoryReport>,
}

impl RunSummary {
    /// Rows rewritten across all categories.
    #[must_use]
    pub fn total_applied(&self) -> u64 {
        self.categories.iter().map(|c| c.rows_applied).sum()
    }

    /// Candidates found across all categories.
    #[must_use]
    pub fn total_candidates(&self) -> u64 {
        self.categories.iter().map(|c| c.candidates).sum()
    }
}
