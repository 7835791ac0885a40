//! Book and book category domain models

use crate::entity::{positioned, CatalogEntity, EntityKind};
use crate::types::{Checks, EntityId, Language, ValidationRules, Validator};
use serde::{Deserialize, Serialize};

/// A shelf of books; owns its books
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookCategory {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub position: u32,
}

impl BookCategory {
    /// Creates a new, not yet persisted category
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            note: None,
            position: 0,
        }
    }
}

positioned!(BookCategory);

impl CatalogEntity for BookCategory {
    const KIND: EntityKind = EntityKind::BookCategory;
}

impl Validator for BookCategory {
    fn validate(&self, rules: &ValidationRules) -> Result<(), Vec<String>> {
        Checks::new(rules)
            .not_blank(&self.name, "Name")
            .optional_text(self.note.as_deref(), "Note")
            .finish()
    }
}

/// A book inside a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub category_id: EntityId,
    pub author: String,
    pub title: String,
    pub languages: Vec<Language>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub position: u32,
}

impl Book {
    /// Creates a new book with required fields
    pub fn new(
        category_id: EntityId,
        author: impl Into<String>,
        title: impl Into<String>,
        languages: Vec<Language>,
    ) -> Self {
        Self {
            id: None,
            category_id,
            author: author.into(),
            title: title.into(),
            languages,
            note: None,
            position: 0,
        }
    }
}

positioned!(Book, parent = category_id);

impl CatalogEntity for Book {
    const KIND: EntityKind = EntityKind::Book;

    fn set_parent(&mut self, parent: EntityId) {
        self.category_id = parent;
    }
}

impl Validator for Book {
    fn validate(&self, rules: &ValidationRules) -> Result<(), Vec<String>> {
        Checks::new(rules)
            .not_blank(&self.author, "Author")
            .not_blank(&self.title, "Title")
            .not_empty(&self.languages, "Languages")
            .optional_text(self.note.as_deref(), "Note")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Positioned;

    fn rules() -> ValidationRules {
        ValidationRules::with_max_year(2024)
    }

    fn book() -> Book {
        Book::new(
            EntityId::new(1),
            "Karel Čapek",
            "R.U.R.",
            vec![Language::Czech],
        )
    }

    #[test]
    fn test_book_new() {
        let book = book();
        assert_eq!(book.title, "R.U.R.");
        assert_eq!(book.parent(), Some(EntityId::new(1)));
        assert!(book.id().is_none());
    }

    #[test]
    fn test_book_validation_success() {
        assert!(book().is_valid(&rules()));
    }

    #[test]
    fn test_book_validation_empty_title() {
        let mut book = book();
        book.title = "   ".to_string();
        assert!(!book.is_valid(&rules()));
    }

    #[test]
    fn test_book_validation_requires_language() {
        let mut book = book();
        book.languages.clear();
        assert!(!book.is_valid(&rules()));
    }

    #[test]
    fn test_book_note_length() {
        let mut rules = rules();
        rules.max_text_length = 3;
        let mut book = book();
        book.note = Some("long note".to_string());
        assert!(!book.is_valid(&rules));
    }

    #[test]
    fn test_category_validation() {
        assert!(BookCategory::new("Sci-fi").is_valid(&rules()));
        assert!(!BookCategory::new("").is_valid(&rules()));
    }

    #[test]
    fn test_book_reparent() {
        let mut book = book();
        book.set_parent(EntityId::new(4));
        assert_eq!(book.category_id, EntityId::new(4));
    }
}
