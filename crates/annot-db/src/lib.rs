//! # annot-db
//!
//! libSQL access for annot-sync.
//!
//! Reads `FULL_ANNOT` rows joined to their authoritative object tables,
//! re-verifies each candidate with the NULL-safe equality rule, and rewrites
//! drifted display fields one row at a time. The schema is owned elsewhere;
//! this crate never creates or alters tables.

pub mod error;
pub mod helpers;
pub mod queries;
pub mod reconciler;

#[cfg(test)]
mod test_support;

use annot_config::DatabaseConfig;
use error::DatabaseError;
use libsql::Builder;

/// Database handle used by the reconciler.
///
/// Wraps a libSQL database and a single connection. Every statement of a run
/// goes through this one connection.
pub struct AnnotDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    target: String,
}

impl AnnotDb {
    /// Open a local database file (or `":memory:"`).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connect` if the database cannot be opened.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let target = format!("local {path}");
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|source| DatabaseError::Connect {
                target: target.clone(),
                source,
            })?;
        Self::connect(db, target)
    }

    /// Open a remote libSQL database over HTTP.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connect` if the client cannot be built.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let target = format!("remote {url}");
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await
            .map_err(|source| DatabaseError::Connect {
                target: target.clone(),
                source,
            })?;
        Self::connect(db, target)
    }

    /// Open whichever database the configuration describes. Remote wins.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if nothing is configured, or
    /// `DatabaseError::Connect` if opening fails.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.is_remote() {
            Self::open_remote(&config.url, &config.auth_token).await
        } else if config.is_configured() {
            Self::open_local(&config.path).await
        } else {
            Err(DatabaseError::InvalidState(
                "no database path or remote url configured".into(),
            ))
        }
    }

    fn connect(db: libsql::Database, target: String) -> Result<Self, DatabaseError> {
        let conn = db.connect().map_err(|source| DatabaseError::Connect {
            target: target.clone(),
            source,
        })?;
        Ok(Self { db, conn, target })
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Connection description for logs (`local <path>` / `remote <url>`).
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_local_in_memory() {
        let db = AnnotDb::open_local(":memory:").await.unwrap();
        assert_eq!(db.target(), "local :memory:");
        let mut rows = db.conn().query("SELECT 1", ()).await.unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }

    #[tokio::test]
    async fn open_uses_local_path_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgd.db");
        let config = DatabaseConfig {
            path: path.to_string_lossy().into_owned(),
            ..Default::default()
        };
        let db = AnnotDb::open(&config).await.unwrap();
        assert!(db.target().starts_with("local "));
    }

    #[tokio::test]
    async fn open_rejects_empty_config() {
        let result = AnnotDb::open(&DatabaseConfig::default()).await;
        assert!(matches!(result, Err(DatabaseError::InvalidState(_))));
    }
}
