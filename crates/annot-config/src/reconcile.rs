//! Reconciliation run settings.

use annot_core::enums::ObjectType;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReconcileConfig {
    /// Identity stamped into `LAST_MODIFIED_BY` on every rewritten row.
    /// Zero means unset.
    #[serde(default)]
    pub last_modified_by: i64,

    /// Categories to reconcile (`gene`, `strain`, `qtl`, `variant`). Empty
    /// means all of them.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl ReconcileConfig {
    /// The modifier identity, if one has been configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when unset and
    /// `ConfigError::InvalidValue` when negative.
    pub fn modifier(&self) -> Result<i64, ConfigError> {
        match self.last_modified_by {
            0 => Err(ConfigError::NotConfigured {
                section: "reconcile.last_modified_by".into(),
            }),
            id if id < 0 => Err(ConfigError::InvalidValue {
                field: "reconcile.last_modified_by".into(),
                reason: format!("must be a positive user key, got {id}"),
            }),
            id => Ok(id),
        }
    }

    /// Parse the configured category names.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first unknown category.
    pub fn object_types(&self) -> Result<Vec<ObjectType>, ConfigError> {
        self.categories
            .iter()
            .map(|name| {
                name.parse::<ObjectType>()
                    .map_err(|e| ConfigError::InvalidValue {
                        field: "reconcile.categories".into(),
                        reason: e.to_string(),
                    })
            })
            .collect()
    }
}
