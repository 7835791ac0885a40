//! Genre domain model

use crate::entity::{positioned, CatalogEntity, EntityKind};
use crate::types::{Checks, EntityId, ValidationRules, Validator};
use serde::{Deserialize, Serialize};

/// A genre movies and series can be tagged with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub position: u32,
}

impl Genre {
    /// Creates a new, not yet persisted genre
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            position: 0,
        }
    }
}

positioned!(Genre);

impl CatalogEntity for Genre {
    const KIND: EntityKind = EntityKind::Genre;
}

impl Validator for Genre {
    fn validate(&self, rules: &ValidationRules) -> Result<(), Vec<String>> {
        Checks::new(rules).not_blank(&self.name, "Name").finish()
    }
}
