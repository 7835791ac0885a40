//! Movie domain model

use crate::entity::{positioned, CatalogEntity, EntityKind};
use crate::types::{Checks, Duration, EntityId, Language, ValidationRules, Validator};
use serde::{Deserialize, Serialize};

/// A movie stored on one or more media
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub czech_name: String,
    pub original_name: String,
    pub year: i32,
    pub language: Language,
    #[serde(default)]
    pub subtitles: Vec<Language>,
    /// Length of every medium the movie spans
    #[serde(default)]
    pub media: Vec<Duration>,
    #[serde(default)]
    pub imdb_code: Option<i32>,
    #[serde(default)]
    pub wiki_en: Option<String>,
    #[serde(default)]
    pub wiki_cz: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub genres: Vec<EntityId>,
    #[serde(default)]
    pub position: u32,
}

impl Movie {
    /// Creates a new movie with required fields
    pub fn new(
        czech_name: impl Into<String>,
        original_name: impl Into<String>,
        year: i32,
        language: Language,
    ) -> Self {
        Self {
            id: None,
            czech_name: czech_name.into(),
            original_name: original_name.into(),
            year,
            language,
            subtitles: Vec::new(),
            media: Vec::new(),
            imdb_code: None,
            wiki_en: None,
            wiki_cz: None,
            picture: None,
            note: None,
            genres: Vec::new(),
            position: 0,
        }
    }

    /// Sum of all media lengths
    pub fn total_length(&self) -> Duration {
        self.media.iter().copied().sum()
    }

    /// Number of media the movie spans
    pub fn media_count(&self) -> usize {
        self.media.len()
    }
}

positioned!(Movie);

impl CatalogEntity for Movie {
    const KIND: EntityKind = EntityKind::Movie;

    fn genres(&self) -> &[EntityId] {
        &self.genres
    }
}

impl Validator for Movie {
    fn validate(&self, rules: &ValidationRules) -> Result<(), Vec<String>> {
        Checks::new(rules)
            .not_blank(&self.czech_name, "Czech name")
            .not_blank(&self.original_name, "Original name")
            .year(self.year, "Year")
            .not_empty(&self.media, "Media")
            .ensure(
                self.media.iter().all(|m| !m.is_zero()),
                "Length of medium must be greater than zero",
            )
            .ensure(
                self.media.iter().all(|m| *m <= Duration::MAX_STORED),
                "Length of medium is too long",
            )
            .imdb_code(self.imdb_code, "IMDB code")
            .optional_text(self.wiki_en.as_deref(), "English Wikipedia")
            .optional_text(self.wiki_cz.as_deref(), "Czech Wikipedia")
            .optional_text(self.picture.as_deref(), "Picture")
            .optional_text(self.note.as_deref(), "Note")
            .finish()
    }
}
