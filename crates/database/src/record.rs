//! Table mapping for catalog entities
//!
//! A [`Record`] names its table and content columns and knows how to bind
//! and read them. The `id` and `position` columns, plus the parent column
//! of child tables, are handled by [`crate::SqliteRepository`].

use catalog_core::{CatalogEntity, CatalogError, Duration, EntityId, Language};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite};

/// Query with SQLite arguments, as built by `sqlx::query`
pub type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// Mapping between an entity family and its table
pub trait Record: CatalogEntity {
    const TABLE: &'static str;

    /// Column referencing the owning row, for child tables
    const PARENT_COLUMN: Option<&'static str> = None;

    /// Content columns in binding order
    const COLUMNS: &'static [&'static str];

    /// Binds content values in the order of [`Record::COLUMNS`]
    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, CatalogError>;

    /// Builds the entity from a row holding every column of the table
    fn from_row(row: &SqliteRow) -> Result<Self, CatalogError>;
}

pub(crate) fn text(row: &SqliteRow, column: &str) -> Result<String, CatalogError> {
    row.try_get(column)
        .map_err(|e| CatalogError::database(format!("Failed to read {}", column), e))
}

pub(crate) fn optional_text(row: &SqliteRow, column: &str) -> Result<Option<String>, CatalogError> {
    row.try_get(column)
        .map_err(|e| CatalogError::database(format!("Failed to read {}", column), e))
}

pub(crate) fn integer(row: &SqliteRow, column: &str) -> Result<i64, CatalogError> {
    row.try_get(column)
        .map_err(|e| CatalogError::database(format!("Failed to read {}", column), e))
}

pub(crate) fn optional_integer(row: &SqliteRow, column: &str) -> Result<Option<i64>, CatalogError> {
    row.try_get(column)
        .map_err(|e| CatalogError::database(format!("Failed to read {}", column), e))
}

pub(crate) fn flag(row: &SqliteRow, column: &str) -> Result<bool, CatalogError> {
    Ok(integer(row, column)? != 0)
}

/// Non-negative integer that fits a `u32`
pub(crate) fn count(row: &SqliteRow, column: &str) -> Result<u32, CatalogError> {
    let value = integer(row, column)?;
    u32::try_from(value).map_err(|_| invalid(column, value))
}

pub(crate) fn year(row: &SqliteRow, column: &str) -> Result<i32, CatalogError> {
    let value = integer(row, column)?;
    i32::try_from(value).map_err(|_| invalid(column, value))
}

pub(crate) fn imdb_code(row: &SqliteRow, column: &str) -> Result<Option<i32>, CatalogError> {
    optional_integer(row, column)?
        .map(|value| i32::try_from(value).map_err(|_| invalid(column, value)))
        .transpose()
}

pub(crate) fn entity_id(row: &SqliteRow, column: &str) -> Result<EntityId, CatalogError> {
    Ok(EntityId::new(integer(row, column)?))
}

pub(crate) fn duration(row: &SqliteRow, column: &str) -> Result<Duration, CatalogError> {
    let value = integer(row, column)?;
    u64::try_from(value)
        .map(Duration::from_millis)
        .map_err(|_| invalid(column, value))
}

pub(crate) fn language(row: &SqliteRow, column: &str) -> Result<Language, CatalogError> {
    let code = text(row, column)?;
    code.parse().map_err(|_| invalid(column, code))
}

/// Decodes a JSON array column
pub(crate) fn json<T: DeserializeOwned>(row: &SqliteRow, column: &str) -> Result<T, CatalogError> {
    let raw = text(row, column)?;
    serde_json::from_str(&raw).map_err(|_| invalid(column, raw))
}

/// Encodes a list-valued field for a JSON column
pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T, field: &str) -> Result<String, CatalogError> {
    serde_json::to_string(value)
        .map_err(|e| CatalogError::database(format!("Failed to serialize {}", field), e))
}

/// SQLite integers are signed; longer lengths are refused, never clamped
pub(crate) fn millis(duration: Duration, column: &str) -> Result<i64, CatalogError> {
    i64::try_from(duration.as_millis()).map_err(|_| {
        CatalogError::invalid_argument(
            column,
            format!("{} ms does not fit an SQLite integer", duration.as_millis()),
        )
    })
}

fn invalid(column: &str, value: impl ToString) -> CatalogError {
    CatalogError::InvalidData {
        field: column.to_string(),
        value: value.to_string(),
    }
}
