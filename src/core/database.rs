//! The manager for everything database related.
//!
//! Owns the pooled connection to the relational store. On construction the
//! database properties file is provisioned from a bundled template if it does
//! not exist yet, then the pool is opened against the configured database.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;

use crate::core::error::SystemError;

/// Bundled default properties, written on first run.
const DEFAULT_PROPERTIES: &str = include_str!("../../resources/database.toml");

/// Name of the properties file inside the data directory.
const PROPERTIES_FILE: &str = "database.toml";

/// Pool properties parsed from `database.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseProperties {
    /// Optional explicit database url. Defaults to `skylands.db` inside the
    /// data directory when unset.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout() -> u64 {
    30
}

/// The manager for everything database related.
#[derive(Debug, Clone)]
pub struct DatabaseManager {
    pool: SqlitePool,
}

impl DatabaseManager {
    /// Open the pool for the given data directory, provisioning the
    /// properties file first if it is missing.
    pub async fn open(data_dir: &Path) -> Result<Self, SystemError> {
        let properties = Self::load_properties(data_dir).await?;
        let options = match &properties.url {
            Some(url) => SqliteConnectOptions::from_str(url)
                .map_err(|e| SystemError::Config(format!("invalid database url: {}", e)))?,
            None => SqliteConnectOptions::new()
                .filename(data_dir.join("skylands.db"))
                .create_if_missing(true),
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(properties.max_connections)
            .min_connections(properties.min_connections)
            .acquire_timeout(Duration::from_secs(properties.acquire_timeout_secs))
            .connect_with(options)
            .await
            .map_err(|e| SystemError::StorageUnavailable(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Ensure the properties file exists, then parse it.
    async fn load_properties(data_dir: &Path) -> Result<DatabaseProperties, SystemError> {
        tokio::fs::create_dir_all(data_dir).await?;
        let path: PathBuf = data_dir.join(PROPERTIES_FILE);
        if !path.exists() {
            tokio::fs::write(&path, DEFAULT_PROPERTIES).await?;
            log::info!("created default database properties at {}", path.display());
        }
        let content = tokio::fs::read_to_string(&path).await?;
        toml::from_str(&content)
            .map_err(|e| SystemError::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// The underlying pool. Statement helpers bind against this directly.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Acquire one connection for a unit of work. Fails with
    /// [`SystemError::StorageUnavailable`] when the pool cannot produce one.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, SystemError> {
        self.pool
            .acquire()
            .await
            .map_err(|e| SystemError::StorageUnavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn first_open_provisions_properties_file() {
        let dir = TempDir::new().expect("tempdir");
        let db = DatabaseManager::open(dir.path()).await.expect("open");
        assert!(dir.path().join(PROPERTIES_FILE).exists());
        drop(db);

        // Second open reuses the provisioned file.
        let db = DatabaseManager::open(dir.path()).await.expect("reopen");
        let mut conn = db.acquire().await.expect("acquire");
        sqlx::query("SELECT 1")
            .execute(&mut *conn)
            .await
            .expect("probe");
    }

    #[tokio::test]
    async fn bundled_template_parses() {
        let properties: DatabaseProperties =
            toml::from_str(DEFAULT_PROPERTIES).expect("template parses");
        assert!(properties.url.is_none());
        assert_eq!(properties.max_connections, 10);
    }
}
