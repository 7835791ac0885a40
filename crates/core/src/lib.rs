pub mod entity;
pub mod error;
pub mod ordering;
pub mod repository;
pub mod types;

// Re-export commonly used types
pub use entity::{CatalogEntity, EntityKind, Positioned};
pub use error::{CatalogError, ErrorSeverity, Result};
pub use ordering::{Direction, OrderingError};
pub use repository::Repository;
pub use types::{
    Book, BookCategory, CatalogStats, Duration, EntityId, Episode, Game, Genre, Language, Movie,
    Music, Program, Season, Serie, Song, ValidationRules, Validator,
};
