//! Object type codes for annotated objects.
//!
//! `FULL_ANNOT.RGD_OBJECT_KEY` carries one of these codes for every row. Only
//! the four types below are reconciled; rows with any other code are ignored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Type of object an annotation row points at.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    Gene,
    Strain,
    Qtl,
    Variant,
}

impl ObjectType {
    /// All reconciled types, in processing order.
    pub const ALL: [Self; 4] = [Self::Gene, Self::Strain, Self::Qtl, Self::Variant];

    /// Numeric code stored in `FULL_ANNOT.RGD_OBJECT_KEY`.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Gene => 1,
            Self::Strain => 5,
            Self::Qtl => 6,
            Self::Variant => 7,
        }
    }

    /// Look up a type by its numeric code.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownObjectType` for codes outside the four
    /// reconciled types.
    pub fn from_code(code: i64) -> Result<Self, CoreError> {
        match code {
            1 => Ok(Self::Gene),
            5 => Ok(Self::Strain),
            6 => Ok(Self::Qtl),
            7 => Ok(Self::Variant),
            other => Err(CoreError::UnknownObjectType(other)),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gene => "gene",
            Self::Strain => "strain",
            Self::Qtl => "qtl",
            Self::Variant => "variant",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = CoreError;

    /// Accepts the snake_case name plus the plural table-style labels
    /// (`genes`, `variants`, ...), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gene" | "genes" => Ok(Self::Gene),
            "strain" | "strains" => Ok(Self::Strain),
            "qtl" | "qtls" => Ok(Self::Qtl),
            "variant" | "variants" => Ok(Self::Variant),
            _ => Err(CoreError::UnknownCategory(s.to_string())),
        }
    }
}
