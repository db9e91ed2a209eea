use std::path::Path;

use annot_config::AnnotConfig;
use anyhow::Context;

use crate::cli::GlobalFlags;

/// Load `.env` and the layered configuration.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<AnnotConfig> {
    let explicit = flags.config.as_deref().map(Path::new);
    AnnotConfig::load_with_dotenv(explicit).with_context(|| match explicit {
        Some(path) => format!("failed to load configuration (with {})", path.display()),
        None => String::from("failed to load configuration"),
    })
}
