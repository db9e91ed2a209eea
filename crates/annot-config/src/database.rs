//! libSQL database connection configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local database file (or `:memory:`).
    #[serde(default)]
    pub path: String,

    /// Remote database URL (e.g., `libsql://rgd-prod.example.io`).
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,
}

impl DatabaseConfig {
    /// Check whether either a local path or a full remote descriptor is set.
    pub fn is_configured(&self) -> bool {
        self.is_remote() || !self.path.is_empty()
    }

    /// Remote access wins over a local path when both are configured.
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }

    /// Human-readable connection info for the run banner. Never includes the token.
    pub fn describe(&self) -> String {
        if self.is_remote() {
            format!("remote {}", self.url)
        } else if !self.path.is_empty() {
            format!("local {}", self.path)
        } else {
            String::from("(not configured)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = DatabaseConfig::default();
        assert!(!config.is_configured());
        assert!(!config.is_remote());
        assert_eq!(config.describe(), "(not configured)");
    }

    #[test]
    fn local_path_is_enough() {
        let config = DatabaseConfig {
            path: "./rgd.db".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
        assert!(!config.is_remote());
        assert_eq!(config.describe(), "local ./rgd.db");
    }

    #[test]
    fn url_without_token_is_not_remote() {
        let config = DatabaseConfig {
            url: "libsql://rgd.example.io".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn remote_wins_and_hides_token() {
        let config = DatabaseConfig {
            path: "./rgd.db".into(),
            url: "libsql://rgd.example.io".into(),
            auth_token: "secret-token".into(),
        };
        assert!(config.is_remote());
        let info = config.describe();
        assert_eq!(info, "remote libsql://rgd.example.io");
        assert!(!info.contains("secret"));
    }
}
