//! SQLite pool setup

use catalog_core::CatalogError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, Sqlite};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub type DbPool = Pool<Sqlite>;

/// Where the catalog file lives and how the pool treats it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub max_connections: u32,
    pub enable_wal: bool,
    pub create_if_missing: bool,
}

impl DatabaseConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_connections: 5,
            enable_wal: true,
            create_if_missing: true,
        }
    }

    pub fn with_max_connections(self, max_connections: u32) -> Self {
        Self {
            max_connections,
            ..self
        }
    }

    pub fn with_wal(self, enable_wal: bool) -> Self {
        Self { enable_wal, ..self }
    }

    /// Open only a catalog that already exists
    pub fn existing_only(self) -> Self {
        Self {
            create_if_missing: false,
            ..self
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect_options(&self) -> SqliteConnectOptions {
        // Cascading child deletes need foreign keys on every connection
        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(self.create_if_missing)
            .foreign_keys(true);

        if self.enable_wal {
            options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
        } else {
            options.journal_mode(SqliteJournalMode::Delete)
        }
    }
}

/// Opens a pool on the configured file
pub async fn connect(config: &DatabaseConfig) -> Result<DbPool, CatalogError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .connect_with(config.connect_options())
        .await
        .map_err(|e| {
            CatalogError::database(format!("Cannot open {}", config.path.display()), e)
        })?;

    log::debug!(
        "Connected to {} ({} connections, wal: {})",
        config.path.display(),
        config.max_connections,
        config.enable_wal
    );
    Ok(pool)
}

/// A private database that lives as long as the pool
///
/// `:memory:` gives each connection its own database, so the pool keeps
/// exactly one connection alive.
pub async fn connect_in_memory() -> Result<DbPool, CatalogError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(|e| CatalogError::database("Bad in-memory connection string", e))?
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(|e| CatalogError::database("Cannot open in-memory database", e))
}
