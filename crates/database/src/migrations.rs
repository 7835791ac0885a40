//! Embedded schema migrations
//!
//! Each script runs once, inside the transaction that records its version
//! in `schema_migrations`.

use crate::DbPool;
use catalog_core::CatalogError;

/// `(version, script)` in application order
const MIGRATIONS: &[(i64, &str)] = &[
    (1, include_str!("../migrations/001_initial_schema.sql")),
    (2, include_str!("../migrations/002_add_indexes.sql")),
];

const CREATE_VERSION_TABLE: &str = "CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

/// Schema version this build expects
pub fn current_version() -> i64 {
    MIGRATIONS.last().map_or(0, |(version, _)| *version)
}

/// Highest applied version, 0 for an empty database
pub async fn applied_version(pool: &DbPool) -> Result<i64, CatalogError> {
    sqlx::query(CREATE_VERSION_TABLE)
        .execute(pool)
        .await
        .map_err(|e| CatalogError::database("Failed to create schema_migrations", e))?;

    let version: Option<i64> = sqlx::query_scalar("SELECT MAX(version) FROM schema_migrations")
        .fetch_one(pool)
        .await
        .map_err(|e| CatalogError::database("Failed to read schema version", e))?;
    Ok(version.unwrap_or(0))
}

/// Applies every migration newer than the database, returning how many ran
pub async fn run_migrations(pool: &DbPool) -> Result<usize, CatalogError> {
    let applied = applied_version(pool).await?;
    if applied > current_version() {
        return Err(CatalogError::MigrationFailed {
            version: applied,
            reason: format!(
                "database is newer than this build (version {})",
                current_version()
            ),
        });
    }

    let pending: Vec<_> = MIGRATIONS.iter().filter(|(v, _)| *v > applied).collect();
    for (version, script) in &pending {
        apply(pool, *version, script).await?;
    }
    Ok(pending.len())
}

async fn apply(pool: &DbPool, version: i64, script: &str) -> Result<(), CatalogError> {
    let failed = |e: sqlx::Error| CatalogError::MigrationFailed {
        version,
        reason: e.to_string(),
    };

    let mut tx = pool.begin().await.map_err(failed)?;
    sqlx::raw_sql(script).execute(&mut *tx).await.map_err(failed)?;
    sqlx::query("INSERT INTO schema_migrations (version) VALUES (?)")
        .bind(version)
        .execute(&mut *tx)
        .await
        .map_err(failed)?;
    tx.commit().await.map_err(failed)?;

    log::info!("Catalog schema migrated to version {}", version);
    Ok(())
}

/// Runs `PRAGMA integrity_check`
pub async fn verify_integrity(pool: &DbPool) -> Result<(), CatalogError> {
    let problems: Vec<String> = sqlx::query_scalar("PRAGMA integrity_check")
        .fetch_all(pool)
        .await
        .map_err(|e| CatalogError::database("Failed to check integrity", e))?;

    match problems.as_slice() {
        [ok] if ok == "ok" => Ok(()),
        _ => Err(CatalogError::DatabaseCorrupted {
            details: problems.join("; "),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_in_memory;

    #[tokio::test]
    async fn test_fresh_database_is_migrated_once() {
        let pool = connect_in_memory().await.unwrap();
        assert_eq!(applied_version(&pool).await.unwrap(), 0);

        assert_eq!(run_migrations(&pool).await.unwrap(), MIGRATIONS.len());
        assert_eq!(run_migrations(&pool).await.unwrap(), 0);

        let versions: Vec<i64> =
            sqlx::query_scalar("SELECT version FROM schema_migrations ORDER BY version")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(versions, vec![1, 2]);
        assert_eq!(applied_version(&pool).await.unwrap(), current_version());
    }

    #[tokio::test]
    async fn test_newer_database_is_refused() {
        let pool = connect_in_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();
        sqlx::query("INSERT INTO schema_migrations (version) VALUES (99)")
            .execute(&pool)
            .await
            .unwrap();

        assert!(matches!(
            run_migrations(&pool).await,
            Err(CatalogError::MigrationFailed { version: 99, .. })
        ));
    }

    #[tokio::test]
    async fn test_migrated_database_passes_integrity_check() {
        let pool = connect_in_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();

        verify_integrity(&pool).await.unwrap();
    }
}
