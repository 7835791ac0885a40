//! Media Catalog Database Layer
//!
//! This crate stores catalog entities in SQLite using sqlx. Each entity
//! family maps to one table through the [`Record`] trait, and a single
//! generic [`SqliteRepository`] implements the core `Repository` contract
//! for all of them.

pub mod connection;
pub mod migrations;
pub mod record;
mod records;
pub mod repository;

pub use connection::{connect, connect_in_memory, DatabaseConfig, DbPool};
pub use migrations::{applied_version, current_version, run_migrations, verify_integrity};
pub use record::Record;
pub use repository::SqliteRepository;

/// Opens the database, brings its schema up to date and checks it
pub async fn open(config: &DatabaseConfig) -> Result<DbPool, catalog_core::CatalogError> {
    let pool = connect(config).await?;
    let applied = run_migrations(&pool).await?;
    if applied > 0 {
        log::info!("Applied {} migration(s) to {}", applied, config.path().display());
    }
    verify_integrity(&pool).await?;
    Ok(pool)
}
