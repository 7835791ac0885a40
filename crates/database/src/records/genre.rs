use crate::record::{count, entity_id, text, Record, SqliteQuery};
use catalog_core::{CatalogError, Genre};
use sqlx::sqlite::SqliteRow;

impl Record for Genre {
    const TABLE: &'static str = "genres";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, CatalogError> {
        Ok(query.bind(&self.name))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, CatalogError> {
        Ok(Self {
            id: Some(entity_id(row, "id")?),
            name: text(row, "name")?,
            position: count(row, "position")?,
        })
    }
}
