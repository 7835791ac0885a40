//! Program domain model

use crate::entity::{positioned, CatalogEntity, EntityKind};
use crate::types::{Checks, EntityId, ValidationRules, Validator};
use serde::{Deserialize, Serialize};

/// An application program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
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
    pub other_data: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub position: u32,
}

impl Program {
    pub fn new(name: impl Into<String>, media_count: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            wiki_en: None,
            wiki_cz: None,
            media_count,
            crack: false,
            serial_key: false,
            other_data: None,
            note: None,
            position: 0,
        }
    }
}

positioned!(Program);

impl CatalogEntity for Program {
    const KIND: EntityKind = EntityKind::Program;
}

impl Validator for Program {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_validation() {
        let rules = ValidationRules::with_max_year(2024);
        let mut program = Program::new("GIMP", 1);
        assert!(program.is_valid(&rules));

        program.other_data = Some("plugins".to_string());
        program.media_count = 0;
        let errors = program.validate(&rules).unwrap_err();
        assert_eq!(errors, vec!["Count of media must be greater than zero".to_string()]);
    }
}
