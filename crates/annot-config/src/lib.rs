//! # annot-config
//!
//! Layered configuration loading for annot-sync using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ANNOT_SYNC_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `./annot-sync.toml`
//! 4. User-level `~/.config/annot-sync/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ANNOT_SYNC_DATABASE__PATH` -> `database.path`,
//! `ANNOT_SYNC_RECONCILE__LAST_MODIFIED_BY` -> `reconcile.last_modified_by`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use annot_config::AnnotConfig;
//!
//! let config = AnnotConfig::load_with_dotenv(None).expect("config");
//! if config.database.is_configured() {
//!     println!("database: {}", config.database.describe());
//! }
//! ```

mod database;
mod error;
mod reconcile;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use reconcile::ReconcileConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "ANNOT_SYNC_";

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = "annot-sync.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnnotConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub reconcile: ReconcileConfig,
}

impl AnnotConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source fails to parse or extract.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(explicit).extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source fails to parse or extract.
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(explicit)
    }

    /// Build the figment provider chain.
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit --config file. Missing files are an error here,
        // not silently skipped.
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("annot-sync").join("config.toml"))
    }

    /// Fail early when the database descriptor is missing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` for the `database` section.
    pub fn require_database(&self) -> Result<&DatabaseConfig, ConfigError> {
        if self.database.is_configured() {
            Ok(&self.database)
        } else {
            Err(ConfigError::NotConfigured {
                section: "database".into(),
            })
        }
    }
}
