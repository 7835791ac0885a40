//! Domain types for the media catalog
//!
//! This module contains all domain models organized by family:
//! - `genre`: Genres referenced by movies and series
//! - `movie`: Movies and their media
//! - `serie`: Series, seasons and episodes
//! - `music`: Music releases and songs
//! - `game`, `program`: Software entries
//! - `book`: Book categories and books
//! - `stats`: Catalog statistics
//! - `common`: Shared types, validation rules and the `Validator` trait

mod book;
mod common;
mod game;
mod genre;
mod movie;
mod music;
mod program;
mod serie;
mod stats;

// Re-export all public types
pub use book::{Book, BookCategory};
pub use common::{Checks, Duration, EntityId, Language, ValidationRules, Validator};
pub use game::Game;
pub use genre::Genre;
pub use movie::Movie;
pub use music::{Music, Song};
pub use program::Program;
pub use serie::{Episode, Season, Serie};
pub use stats::CatalogStats;
