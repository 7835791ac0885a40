use crate::record::{count, entity_id, flag, optional_text, text, Record, SqliteQuery};
use catalog_core::{CatalogError, Game, Program};
use sqlx::sqlite::SqliteRow;

impl Record for Game {
    const TABLE: &'static str = "games";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "wiki_en",
        "wiki_cz",
        "media_count",
        "crack",
        "serial_key",
        "patch",
        "trainer",
        "trainer_data",
        "editor",
        "saves",
        "other_data",
        "note",
    ];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, CatalogError> {
        Ok(query
            .bind(&self.name)
            .bind(&self.wiki_en)
            .bind(&self.wiki_cz)
            .bind(self.media_count)
            .bind(self.crack)
            .bind(self.serial_key)
            .bind(self.patch)
            .bind(self.trainer)
            .bind(self.trainer_data)
            .bind(self.editor)
            .bind(self.saves)
            .bind(&self.other_data)
            .bind(&self.note))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, CatalogError> {
        Ok(Self {
            id: Some(entity_id(row, "id")?),
            name: text(row, "name")?,
            wiki_en: optional_text(row, "wiki_en")?,
            wiki_cz: optional_text(row, "wiki_cz")?,
            media_count: count(row, "media_count")?,
            crack: flag(row, "crack")?,
            serial_key: flag(row, "serial_key")?,
            patch: flag(row, "patch")?,
            trainer: flag(row, "trainer")?,
            trainer_data: flag(row, "trainer_data")?,
            editor: flag(row, "editor")?,
            saves: flag(row, "saves")?,
            other_data: optional_text(row, "other_data")?,
            note: optional_text(row, "note")?,
            position: count(row, "position")?,
        })
    }
}

impl Record for Program {
    const TABLE: &'static str = "programs";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "wiki_en",
        "wiki_cz",
        "media_count",
        "crack",
        "serial_key",
        "other_data",
        "note",
    ];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, CatalogError> {
        Ok(query
            .bind(&self.name)
            .bind(&self.wiki_en)
            .bind(&self.wiki_cz)
            .bind(self.media_count)
            .bind(self.crack)
            .bind(self.serial_key)
            .bind(&self.other_data)
            .bind(&self.note))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, CatalogError> {
        Ok(Self {
            id: Some(entity_id(row, "id")?),
            name: text(row, "name")?,
            wiki_en: optional_text(row, "wiki_en")?,
            wiki_cz: optional_text(row, "wiki_cz")?,
            media_count: count(row, "media_count")?,
            crack: flag(row, "crack")?,
            serial_key: flag(row, "serial_key")?,
            other_data: optional_text(row, "other_data")?,
            note: optional_text(row, "note")?,
            position: count(row, "position")?,
        })
    }
}
