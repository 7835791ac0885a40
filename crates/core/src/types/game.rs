//! Game domain model

use crate::entity::{positioned, CatalogEntity, EntityKind};
use crate::types::{Checks, EntityId, ValidationRules, Validator};
use serde::{Deserialize, Serialize};

/// A computer game and the extras shipped with it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub wiki_en: Option<String>,
    #[serde(default)]
    pub wiki_cz: Option<String>,
    pub media_count: u32,
    #[serde(default)]
    pub crack: bool,
    #[serde(default)]
    pub serial_key: bool,
    #[serde(default)]
    pub patch: bool,
    #[serde(default)]
    pub trainer: bool,
    #[serde(default)]
    pub trainer_data: bool,
    #[serde(default)]
    pub editor: bool,
    #[serde(default)]
    pub saves: bool,
    #[serde(default)]
    pub other_data: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub position: u32,
}

impl Game {
    pub fn new(name: impl Into<String>, media_count: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            wiki_en: None,
            wiki_cz: None,
            media_count,
            crack: false,
            serial_key: false,
            patch: false,
            trainer: false,
            trainer_data: false,
            editor: false,
            saves: false,
            other_data: None,
            note: None,
            position: 0,
        }
    }

    /// Returns true when any extra besides the game itself is stored
    pub fn has_extras(&self) -> bool {
        self.crack
            || self.serial_key
            || self.patch
            || self.trainer
            || self.trainer_data
            || self.editor
            || self.saves
            || self.other_data.is_some()
    }
}

positioned!(Game);

impl CatalogEntity for Game {
    const KIND: EntityKind = EntityKind::Game;
}

impl Validator for Game {
    fn validate(&self, rules: &ValidationRules) -> Result<(), Vec<String>> {
        Checks::new(rules)
            .not_blank(&self.name, "Name")
            .positive(self.media_count, "Count of media")
            .optional_text(self.wiki_en.as_deref(), "English Wikipedia")
            .optional_text(self.wiki_cz.as_deref(), "Czech Wikipedia")
            .optional_text(self.other_data.as_deref(), "Other data")
            .optional_text(self.note.as_deref(), "Note")
            .finish()
    }
}
