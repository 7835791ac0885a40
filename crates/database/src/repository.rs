//! SQLite implementation of the catalog repository

use crate::record::Record;
use crate::DbPool;
use async_trait::async_trait;
use catalog_core::{CatalogError, EntityId, Positioned, Repository};
use sqlx::sqlite::SqliteRow;
use std::marker::PhantomData;

/// Repository storing one entity family in its own table
pub struct SqliteRepository<T> {
    pool: DbPool,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for SqliteRepository<T> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<T> SqliteRepository<T> {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl<T: Record> SqliteRepository<T> {
    fn select_sql() -> String {
        let mut columns = vec!["id", "position"];
        columns.extend(T::PARENT_COLUMN);
        columns.extend_from_slice(T::COLUMNS);
        format!("SELECT {} FROM {}", columns.join(", "), T::TABLE)
    }

    fn map_rows(rows: Vec<SqliteRow>) -> Result<Vec<T>, CatalogError> {
        rows.iter().map(T::from_row).collect()
    }

    fn require_id(entity: &T) -> Result<EntityId, CatalogError> {
        entity.id().ok_or_else(|| {
            CatalogError::invalid_argument("id", format!("{} has not been persisted", T::KIND))
        })
    }

    async fn write_position<'e, E>(executor: E, entity: &T) -> Result<(), CatalogError>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let id = Self::require_id(entity)?;
        let sql = format!("UPDATE {} SET position = ? WHERE id = ?", T::TABLE);

        sqlx::query(&sql)
            .bind(i64::from(entity.position()))
            .bind(id.get())
            .execute(executor)
            .await
            .map_err(|e| storage_error(format!("Failed to reposition {} {}", T::KIND, id), e))?;

        Ok(())
    }
}

#[async_trait]
impl<T: Record> Repository<T> for SqliteRepository<T> {
    async fn get(&self, id: EntityId) -> Result<Option<T>, CatalogError> {
        let sql = format!("{} WHERE id = ?", Self::select_sql());

        let row = sqlx::query(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error(format!("Failed to fetch {}", T::KIND), e))?;

        row.as_ref().map(T::from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<T>, CatalogError> {
        let sql = match T::PARENT_COLUMN {
            Some(parent) => format!("{} ORDER BY {}, position, id", Self::select_sql(), parent),
            None => format!("{} ORDER BY position, id", Self::select_sql()),
        };

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error(format!("Failed to list {}", T::KIND), e))?;

        Self::map_rows(rows)
    }

    async fn siblings(&self, parent: Option<EntityId>) -> Result<Vec<T>, CatalogError> {
        let rows = match (T::PARENT_COLUMN, parent) {
            (None, None) => {
                let sql = format!("{} ORDER BY position, id", Self::select_sql());
                sqlx::query(&sql).fetch_all(&self.pool).await
            }
            (Some(column), Some(parent)) => {
                let sql = format!(
                    "{} WHERE {} = ? ORDER BY position, id",
                    Self::select_sql(),
                    column
                );
                sqlx::query(&sql).bind(parent.get()).fetch_all(&self.pool).await
            }
            (Some(_), None) => {
                return Err(CatalogError::invalid_argument(
                    "parent",
                    format!("{} always belongs to a parent", T::KIND),
                ))
            }
            (None, Some(_)) => {
                return Err(CatalogError::invalid_argument(
                    "parent",
                    format!("{} has no parent", T::KIND),
                ))
            }
        }
        .map_err(|e| storage_error(format!("Failed to load {} siblings", T::KIND), e))?;

        Self::map_rows(rows)
    }

    async fn insert(&self, entity: &T) -> Result<T, CatalogError> {
        let mut columns = vec!["position"];
        columns.extend(T::PARENT_COLUMN);
        columns.extend_from_slice(T::COLUMNS);
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            T::TABLE,
            columns.join(", "),
            placeholders
        );

        let mut query = sqlx::query(&sql).bind(i64::from(entity.position()));
        if T::PARENT_COLUMN.is_some() {
            let parent = entity.parent().ok_or_else(|| {
                CatalogError::invalid_argument(
                    "parent",
                    format!("{} always belongs to a parent", T::KIND),
                )
            })?;
            query = query.bind(parent.get());
        }

        let result = entity
            .bind_columns(query)?
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error(format!("Failed to insert {}", T::KIND), e))?;

        let mut stored = entity.clone();
        stored.set_id(Some(EntityId::new(result.last_insert_rowid())));
        Ok(stored)
    }

    async fn update(&self, entity: &T) -> Result<(), CatalogError> {
        let id = Self::require_id(entity)?;
        let assignments = T::COLUMNS
            .iter()
            .map(|column| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {} SET {} WHERE id = ?", T::TABLE, assignments);

        let result = entity
            .bind_columns(sqlx::query(&sql))?
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error(format!("Failed to update {}", T::KIND), e))?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found(T::KIND.name(), id));
        }
        Ok(())
    }

    async fn delete(&self, id: EntityId, reordered: &[T]) -> Result<(), CatalogError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("Failed to begin transaction", e))?;

        let sql = format!("DELETE FROM {} WHERE id = ?", T::TABLE);
        let result = sqlx::query(&sql)
            .bind(id.get())
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error(format!("Failed to delete {}", T::KIND), e))?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found(T::KIND.name(), id));
        }

        for entity in reordered {
            Self::write_position(&mut *tx, entity).await?;
        }

        tx.commit()
            .await
            .map_err(|e| storage_error("Failed to commit transaction", e))?;

        log::debug!(
            "Deleted {} {} and repositioned {} sibling(s)",
            T::KIND,
            id,
            reordered.len()
        );
        Ok(())
    }

    async fn save_positions(&self, entities: &[T]) -> Result<(), CatalogError> {
        if entities.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("Failed to begin transaction", e))?;

        for entity in entities {
            Self::write_position(&mut *tx, entity).await?;
        }

        tx.commit()
            .await
            .map_err(|e| storage_error("Failed to commit transaction", e))?;

        Ok(())
    }

    async fn exists(&self, id: EntityId) -> Result<bool, CatalogError> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE id = ?", T::TABLE);

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(id.get())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error(format!("Failed to check {}", T::KIND), e))?;

        Ok(count > 0)
    }

    async fn count(&self) -> Result<u64, CatalogError> {
        let sql = format!("SELECT COUNT(*) FROM {}", T::TABLE);

        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error(format!("Failed to count {}", T::KIND), e))?;

        Ok(count.max(0) as u64)
    }

    async fn clear(&self) -> Result<(), CatalogError> {
        let sql = format!("DELETE FROM {}", T::TABLE);

        sqlx::query(&sql)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error(format!("Failed to clear {}", T::KIND), e))?;

        Ok(())
    }
}

/// Wraps a sqlx failure, singling out a busy database
fn storage_error(message: impl Into<String>, error: sqlx::Error) -> CatalogError {
    let message = message.into();
    match &error {
        sqlx::Error::Database(db) if db.message().contains("database is locked") => {
            CatalogError::DatabaseLocked { operation: message }
        }
        _ => CatalogError::database(message, error),
    }
}
