use crate::record::{count, duration, entity_id, millis, optional_text, text, Record, SqliteQuery};
use catalog_core::{CatalogError, Music, Song};
use sqlx::sqlite::SqliteRow;

impl Record for Music {
    const TABLE: &'static str = "music";
    const COLUMNS: &'static [&'static str] = &["name", "wiki_en", "wiki_cz", "media_count", "note"];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, CatalogError> {
        Ok(query
            .bind(&self.name)
            .bind(&self.wiki_en)
            .bind(&self.wiki_cz)
            .bind(self.media_count)
            .bind(&self.note))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, CatalogError> {
        Ok(Self {
            id: Some(entity_id(row, "id")?),
            name: text(row, "name")?,
            wiki_en: optional_text(row, "wiki_en")?,
            wiki_cz: optional_text(row, "wiki_cz")?,
            media_count: count(row, "media_count")?,
            note: optional_text(row, "note")?,
            position: count(row, "position")?,
        })
    }
}

impl Record for Song {
    const TABLE: &'static str = "songs";
    const PARENT_COLUMN: Option<&'static str> = Some("music_id");
    const COLUMNS: &'static [&'static str] = &["name", "length_ms", "note"];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, CatalogError> {
        let length = millis(self.length, "length_ms")?;
        Ok(query
            .bind(&self.name)
            .bind(length)
            .bind(&self.note))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, CatalogError> {
        Ok(Self {
            id: Some(entity_id(row, "id")?),
            music_id: entity_id(row, "music_id")?,
            name: text(row, "name")?,
            length: duration(row, "length_ms")?,
            note: optional_text(row, "note")?,
            position: count(row, "position")?,
        })
    }
}
