//! Contracts shared by every catalog entity
//!
//! An entity has an optional storage identity, a zero-based position inside
//! its sibling group and, for child entities, a reference to its parent.
//! Entities with the same parent (or all top-level entities of one kind)
//! form a sibling group.

use crate::types::{EntityId, Validator};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every entity family held by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Genre,
    Movie,
    Serie,
    Season,
    Episode,
    Music,
    Song,
    Game,
    Program,
    BookCategory,
    Book,
}

impl EntityKind {
    /// All kinds, parents before their children
    pub const ALL: [EntityKind; 11] = [
        Self::Genre,
        Self::Movie,
        Self::Serie,
        Self::Season,
        Self::Episode,
        Self::Music,
        Self::Song,
        Self::Game,
        Self::Program,
        Self::BookCategory,
        Self::Book,
    ];

    /// Human readable name used in messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Genre => "Genre",
            Self::Movie => "Movie",
            Self::Serie => "Serie",
            Self::Season => "Season",
            Self::Episode => "Episode",
            Self::Music => "Music",
            Self::Song => "Song",
            Self::Game => "Game",
            Self::Program => "Program",
            Self::BookCategory => "Book category",
            Self::Book => "Book",
        }
    }

    /// Kind of the owning aggregate, if any
    pub fn parent(&self) -> Option<EntityKind> {
        match self {
            Self::Season => Some(Self::Serie),
            Self::Episode => Some(Self::Season),
            Self::Song => Some(Self::Music),
            Self::Book => Some(Self::BookCategory),
            _ => None,
        }
    }

    /// Returns true for kinds without a parent
    pub fn is_top_level(&self) -> bool {
        self.parent().is_none()
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "genre" | "genres" => Ok(Self::Genre),
            "movie" | "movies" => Ok(Self::Movie),
            "serie" | "series" => Ok(Self::Serie),
            "season" | "seasons" => Ok(Self::Season),
            "episode" | "episodes" => Ok(Self::Episode),
            "music" => Ok(Self::Music),
            "song" | "songs" => Ok(Self::Song),
            "game" | "games" => Ok(Self::Game),
            "program" | "programs" => Ok(Self::Program),
            "book_category" | "book_categories" | "category" => Ok(Self::BookCategory),
            "book" | "books" => Ok(Self::Book),
            other => Err(format!("unknown entity kind '{}'", other)),
        }
    }
}

/// A record with identity and a position inside its sibling group
pub trait Positioned {
    /// Storage identity; `None` until the entity is first persisted
    fn id(&self) -> Option<EntityId>;

    fn set_id(&mut self, id: Option<EntityId>);

    /// Zero-based rank inside the sibling group
    fn position(&self) -> u32;

    fn set_position(&mut self, position: u32);

    /// Owning aggregate; entities sharing it are siblings
    fn parent(&self) -> Option<EntityId> {
        None
    }
}

/// A concrete entity family stored in the catalog
pub trait CatalogEntity:
    Positioned + Validator + Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: EntityKind;

    /// Re-parents a copied child; top-level entities have nothing to do
    fn set_parent(&mut self, _parent: EntityId) {}

    /// Genres this entity refers to
    fn genres(&self) -> &[EntityId] {
        &[]
    }
}

/// Implements [`Positioned`] for structs with `id` and `position` fields
macro_rules! positioned {
    ($ty:ty) => {
        impl $crate::entity::Positioned for $ty {
            fn id(&self) -> Option<$crate::types::EntityId> {
                self.id
            }

            fn set_id(&mut self, id: Option<$crate::types::EntityId>) {
                self.id = id;
            }

            fn position(&self) -> u32 {
                self.position
            }

            fn set_position(&mut self, position: u32) {
                self.position = position;
            }
        }
    };
    ($ty:ty, parent = $field:ident) => {
        impl $crate::entity::Positioned for $ty {
            fn id(&self) -> Option<$crate::types::EntityId> {
                self.id
            }

            fn set_id(&mut self, id: Option<$crate::types::EntityId>) {
                self.id = id;
            }

            fn position(&self) -> u32 {
                self.position
            }

            fn set_position(&mut self, position: u32) {
                self.position = position;
            }

            fn parent(&self) -> Option<$crate::types::EntityId> {
                Some(self.$field)
            }
        }
    };
}

pub(crate) use positioned;
