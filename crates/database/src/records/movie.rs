use crate::record::{
    count, entity_id, imdb_code, json, language, optional_text, text, to_json, year, Record,
    SqliteQuery,
};
use catalog_core::{CatalogError, Movie};
use sqlx::sqlite::SqliteRow;

impl Record for Movie {
    const TABLE: &'static str = "movies";
    const COLUMNS: &'static [&'static str] = &[
        "czech_name",
        "original_name",
        "year",
        "language",
        "subtitles",
        "media",
        "imdb_code",
        "wiki_en",
        "wiki_cz",
        "picture",
        "note",
        "genres",
    ];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, CatalogError> {
        let subtitles = to_json(&self.subtitles, "subtitles")?;
        let media = to_json(&self.media, "media")?;
        let genres = to_json(&self.genres, "genres")?;

        Ok(query
            .bind(&self.czech_name)
            .bind(&self.original_name)
            .bind(self.year)
            .bind(self.language.code())
            .bind(subtitles)
            .bind(media)
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
            year: year(row, "year")?,
            language: language(row, "language")?,
            subtitles: json(row, "subtitles")?,
            media: json(row, "media")?,
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
