//! Serie, season and episode domain models

use crate::entity::{positioned, CatalogEntity, EntityKind};
use crate::types::{Checks, Duration, EntityId, Language, ValidationRules, Validator};
use serde::{Deserialize, Serialize};

/// A TV serie; owns its seasons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Serie {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub czech_name: String,
    pub original_name: String,
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

impl Serie {
    /// Creates a new serie with required fields
    pub fn new(czech_name: impl Into<String>, original_name: impl Into<String>) -> Self {
        Self {
            id: None,
            czech_name: czech_name.into(),
            original_name: original_name.into(),
            imdb_code: None,
            wiki_en: None,
            wiki_cz: None,
            picture: None,
            note: None,
            genres: Vec::new(),
            position: 0,
        }
    }
}

positioned!(Serie);

impl CatalogEntity for Serie {
    const KIND: EntityKind = EntityKind::Serie;

    fn genres(&self) -> &[EntityId] {
        &self.genres
    }
}

impl Validator for Serie {
    fn validate(&self, rules: &ValidationRules) -> Result<(), Vec<String>> {
        Checks::new(rules)
            .not_blank(&self.czech_name, "Czech name")
            .not_blank(&self.original_name, "Original name")
            .imdb_code(self.imdb_code, "IMDB code")
            .optional_text(self.wiki_en.as_deref(), "English Wikipedia")
            .optional_text(self.wiki_cz.as_deref(), "Czech Wikipedia")
            .optional_text(self.picture.as_deref(), "Picture")
            .optional_text(self.note.as_deref(), "Note")
            .finish()
    }
}

/// A season of a serie; owns its episodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub serie_id: EntityId,
    pub number: u32,
    pub start_year: i32,
    pub end_year: i32,
    pub language: Language,
    #[serde(default)]
    pub subtitles: Vec<Language>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub position: u32,
}

impl Season {
    /// Creates a new season of the given serie
    pub fn new(
        serie_id: EntityId,
        number: u32,
        start_year: i32,
        end_year: i32,
        language: Language,
    ) -> Self {
        Self {
            id: None,
            serie_id,
            number,
            start_year,
            end_year,
            language,
            subtitles: Vec::new(),
            note: None,
            position: 0,
        }
    }
}

positioned!(Season, parent = serie_id);

impl CatalogEntity for Season {
    const KIND: EntityKind = EntityKind::Season;

    fn set_parent(&mut self, parent: EntityId) {
        self.serie_id = parent;
    }
}

impl Validator for Season {
    fn validate(&self, rules: &ValidationRules) -> Result<(), Vec<String>> {
        Checks::new(rules)
            .positive(self.number, "Number of season")
            .year(self.start_year, "Starting year")
            .year(self.end_year, "Ending year")
            .ensure(
                self.start_year <= self.end_year,
                "Starting year must not be greater than ending year",
            )
            .optional_text(self.note.as_deref(), "Note")
            .finish()
    }
}

/// A single episode of a season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub season_id: EntityId,
    pub number: u32,
    pub name: String,
    #[serde(default)]
    pub length: Duration,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub position: u32,
}

impl Episode {
    /// Creates a new episode of the given season
    pub fn new(season_id: EntityId, number: u32, name: impl Into<String>, length: Duration) -> Self {
        Self {
            id: None,
            season_id,
            number,
            name: name.into(),
            length,
            note: None,
            position: 0,
        }
    }
}

positioned!(Episode, parent = season_id);

impl CatalogEntity for Episode {
    const KIND: EntityKind = EntityKind::Episode;

    fn set_parent(&mut self, parent: EntityId) {
        self.season_id = parent;
    }
}

impl Validator for Episode {
    fn validate(&self, rules: &ValidationRules) -> Result<(), Vec<String>> {
        Checks::new(rules)
            .positive(self.number, "Number of episode")
            .not_blank(&self.name, "Name")
            .length(self.length, "Length")
            .optional_text(self.note.as_deref(), "Note")
            .finish()
    }
}
