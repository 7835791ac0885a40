use crate::record::{
    count, duration, entity_id, imdb_code, json, language, millis, optional_text, text, to_json,
    year, Record, SqliteQuery,
};
use catalog_core::{CatalogError, Episode, Season, Serie};
use sqlx::sqlite::SqliteRow;

impl Record for Serie {
    const TABLE: &'static str = "series";
    const COLUMNS: &'static [&'static str] = &[
        "czech_name",
        "original_name",
        "imdb_code",
        "wiki_en",
        "wiki_cz",
        "picture",
        "note",
        "genres",
    ];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, CatalogError> {
        let genres = to_json(&self.genres, "genres")?;

        Ok(query
            .bind(&self.czech_name)
            .bind(&self.original_name)
            .bind(self.imdb_code)
            .bind(&self.wiki_en)
            .bind(&self.wiki_cz)
            .bind(&self.picture)
            .bind(&self.note)
            .bind(genres))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, CatalogError> {
        Ok(Self {
            id: Some(entity_id(row, "id")?),
            czech_name: text(row, "czech_name")?,
            original_name: text(row, "original_name")?,
            imdb_code: imdb_code(row, "imdb_code")?,
            wiki_en: optional_text(row, "wiki_en")?,
            wiki_cz: optional_text(row, "wiki_cz")?,
            picture: optional_text(row, "picture")?,
            note: optional_text(row, "note")?,
            genres: json(row, "genres")?,
            position: count(row, "position")?,
        })
    }
}

impl Record for Season {
    const TABLE: &'static str = "seasons";
    const PARENT_COLUMN: Option<&'static str> = Some("serie_id");
    const COLUMNS: &'static [&'static str] = &[
        "number",
        "start_year",
        "end_year",
        "language",
        "subtitles",
        "note",
    ];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, CatalogError> {
        let subtitles = to_json(&self.subtitles, "subtitles")?;

        Ok(query
            .bind(self.number)
            .bind(self.start_year)
            .bind(self.end_year)
            .bind(self.language.code())
            .bind(subtitles)
            .bind(&self.note))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, CatalogError> {
        Ok(Self {
            id: Some(entity_id(row, "id")?),
            serie_id: entity_id(row, "serie_id")?,
            number: count(row, "number")?,
            start_year: year(row, "start_year")?,
            end_year: year(row, "end_year")?,
            language: language(row, "language")?,
            subtitles: json(row, "subtitles")?,
            note: optional_text(row, "note")?,
            position: count(row, "position")?,
        })
    }
}

impl Record for Episode {
    const TABLE: &'static str = "episodes";
    const PARENT_COLUMN: Option<&'static str> = Some("season_id");
    const COLUMNS: &'static [&'static str] = &["number", "name", "length_ms", "note"];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, CatalogError> {
        let length = millis(self.length, "length_ms")?;
        Ok(query
            .bind(self.number)
            .bind(&self.name)
            .bind(length)
            .bind(&self.note))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, CatalogError> {
        Ok(Self {
            id: Some(entity_id(row, "id")?),
            season_id: entity_id(row, "season_id")?,
            number: count(row, "number")?,
            name: text(row, "name")?,
            length: duration(row, "length_ms")?,
            note: optional_text(row, "note")?,
            position: count(row, "position")?,
        })
    }
}
