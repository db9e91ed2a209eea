use std::time::Instant;

use anyhow::Context;
use tracing::info;

use annot_config::AnnotConfig;
use annot_core::enums::ObjectType;
use annot_db::AnnotDb;
use annot_db::reconciler::Reconciler;

use crate::cli::{GlobalFlags, ReconcileArgs};
use crate::output::{format_elapsed, output};

/// Settings for one run after merging CLI flags over configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub modified_by: i64,
    pub categories: Vec<ObjectType>,
    pub dry_run: bool,
}

impl RunPlan {
    /// CLI flags win over configuration. A real run needs a modifier
    /// identity; a dry run does not write and accepts none.
    pub fn resolve(
        args: &ReconcileArgs,
        config: &AnnotConfig,
        dry_run: bool,
    ) -> anyhow::Result<Self> {
        let modified_by = match args.modified_by {
            Some(id) if id > 0 => id,
            Some(id) => anyhow::bail!("--modified-by must be a positive user key, got {id}"),
            None if dry_run => config.reconcile.last_modified_by,
            None => config
                .reconcile
                .modifier()
                .context("set --modified-by or reconcile.last_modified_by")?,
        };

        let categories = if args.categories.is_empty() {
            config.reconcile.object_types()?
        } else {
            args.categories.clone()
        };

        Ok(Self {
            modified_by,
            categories,
            dry_run,
        })
    }
}

pub async fn handle(
    args: &ReconcileArgs,
    dry_run: bool,
    flags: &GlobalFlags,
    config: &AnnotConfig,
) -> anyhow::Result<()> {
    let started = Instant::now();
    let plan = RunPlan::resolve(args, config, dry_run)?;
    let database = config.require_database()?;

    info!(dry_run = plan.dry_run, "annot-sync {}", env!("CARGO_PKG_VERSION"));
    let db = AnnotDb::open(database)
        .await
        .context("failed to open annotation database")?;
    info!("   {}", db.target());
    info!("=======");

    let summary = Reconciler::new(&db, plan.modified_by)
        .dry_run(plan.dry_run)
        .run_selected(&plan.categories)
        .await
        .context("reconcile run failed")?;

    info!("=== OK ===  elapsed  {}", format_elapsed(started.elapsed()));
    output(&summary, flags.format)
}
