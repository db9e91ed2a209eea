pub mod reconcile;

use annot_config::AnnotConfig;

use crate::cli::{Commands, GlobalFlags};

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    flags: &GlobalFlags,
    config: &AnnotConfig,
) -> anyhow::Result<()> {
    let dry_run = command.is_dry_run();
    reconcile::handle(command.args(), dry_run, flags, config).await
}
