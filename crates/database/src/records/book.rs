use crate::record::{count, entity_id, json, optional_text, text, to_json, Record, SqliteQuery};
use catalog_core::{Book, BookCategory, CatalogError};
use sqlx::sqlite::SqliteRow;

impl Record for BookCategory {
    const TABLE: &'static str = "book_categories";
    const COLUMNS: &'static [&'static str] = &["name", "note"];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, CatalogError> {
        Ok(query.bind(&self.name).bind(&self.note))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, CatalogError> {
        Ok(Self {
            id: Some(entity_id(row, "id")?),
            name: text(row, "name")?,
            note: optional_text(row, "note")?,
            position: count(row, "position")?,
        })
    }
}

impl Record for Book {
    const TABLE: &'static str = "books";
    const PARENT_COLUMN: Option<&'static str> = Some("category_id");
    const COLUMNS: &'static [&'static str] = &["author", "title", "languages", "note"];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, CatalogError> {
        let languages = to_json(&self.languages, "languages")?;

        Ok(query
            .bind(&self.author)
            .bind(&self.title)
            .bind(languages)
            .bind(&self.note))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, CatalogError> {
        Ok(Self {
            id: Some(entity_id(row, "id")?),
            category_id: entity_id(row, "category_id")?,
            author: text(row, "author")?,
            title: text(row, "title")?,
            languages: json(row, "languages")?,
            note: optional_text(row, "note")?,
            position: count(row, "position")?,
        })
    }
}
