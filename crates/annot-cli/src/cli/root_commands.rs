use annot_core::enums::ObjectType;
use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Rewrite drifted symbols and names in FULL_ANNOT.
    Run(ReconcileArgs),
    /// Report drifted rows without writing anything.
    Check(ReconcileArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ReconcileArgs {
    /// Restrict to a category (gene, strain, qtl, variant). Repeatable.
    #[arg(long = "category", value_name = "CATEGORY")]
    pub categories: Vec<ObjectType>,

    /// Identity stamped into LAST_MODIFIED_BY (overrides config).
    #[arg(long, value_name = "USER_KEY")]
    pub modified_by: Option<i64>,
}

impl Commands {
    #[must_use]
    pub const fn args(&self) -> &ReconcileArgs {
        match self {
            Self::Run(args) | Self::Check(args) => args,
        }
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        matches!(self, Self::Check(_))
    }
}
