//! Music and song domain models

use crate::entity::{positioned, CatalogEntity, EntityKind};
use crate::types::{Checks, Duration, EntityId, ValidationRules, Validator};
use serde::{Deserialize, Serialize};

/// An album or other music release; owns its songs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Music {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub wiki_en: Option<String>,
    #[serde(default)]
    pub wiki_cz: Option<String>,
    pub media_count: u32,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub position: u32,
}

impl Music {
    pub fn new(name: impl Into<String>, media_count: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            wiki_en: None,
            wiki_cz: None,
            media_count,
            note: None,
            position: 0,
        }
    }
}

positioned!(Music);

impl CatalogEntity for Music {
    const KIND: EntityKind = EntityKind::Music;
}

impl Validator for Music {
    fn validate(&self, rules: &ValidationRules) -> Result<(), Vec<String>> {
        Checks::new(rules)
            .not_blank(&self.name, "Name")
            .positive(self.media_count, "Count of media")
            .optional_text(self.wiki_en.as_deref(), "English Wikipedia")
            .optional_text(self.wiki_cz.as_deref(), "Czech Wikipedia")
            .optional_text(self.note.as_deref(), "Note")
            .finish()
    }
}

/// A song of a music release
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub music_id: EntityId,
    pub name: String,
    #[serde(default)]
    pub length: Duration,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub position: u32,
}

impl Song {
    pub fn new(music_id: EntityId, name: impl Into<String>, length: Duration) -> Self {
        Self {
            id: None,
            music_id,
            name: name.into(),
            length,
            note: None,
            position: 0,
        }
    }
}

positioned!(Song, parent = music_id);

impl CatalogEntity for Song {
    const KIND: EntityKind = EntityKind::Song;

    fn set_parent(&mut self, parent: EntityId) {
        self.music_id = parent;
    }
}

impl Validator for Song {
    fn validate(&self, rules: &ValidationRules) -> Result<(), Vec<String>> {
        Checks::new(rules)
            .not_blank(&self.name, "Name")
            .length(self.length, "Length")
            .optional_text(self.note.as_deref(), "Note")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ValidationRules {
        ValidationRules::with_max_year(2024)
    }

    #[test]
    fn test_music_requires_media() {
        assert!(Music::new("Abbey Road", 1).is_valid(&rules()));
        assert!(!Music::new("Abbey Road", 0).is_valid(&rules()));
    }

    #[test]
    fn test_song_validation() {
        let song = Song::new(EntityId::new(1), "Something", Duration::from_seconds(182));
        assert!(song.is_valid(&rules()));

        let mut with_blank_note = song.clone();
        with_blank_note.note = Some(String::new());
        assert!(!with_blank_note.is_valid(&rules()));
    }
}
