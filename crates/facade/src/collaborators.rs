//! Hooks one facade uses to reach other entity families
//!
//! Collaborators are injected at construction time. They let a child
//! facade verify its parent, let movies and series verify their genres,
//! and let an aggregate copy its children when it is duplicated.

use crate::error::FacadeResult;
use async_trait::async_trait;
use catalog_core::{CatalogEntity, EntityId, EntityKind, Repository};
use std::marker::PhantomData;
use std::sync::Arc;

/// Answers whether an entity of one family exists
#[async_trait]
pub trait Lookup: Send + Sync {
    fn kind(&self) -> EntityKind;

    async fn contains(&self, id: EntityId) -> FacadeResult<bool>;
}

/// Copies the children of one aggregate under another
#[async_trait]
pub trait ChildCopier: Send + Sync {
    /// Copies every child of `source` under `target`, preserving their order
    ///
    /// Returns the number of direct children copied.
    async fn copy_children(&self, source: EntityId, target: EntityId) -> FacadeResult<usize>;
}

/// A family whose entries may point at genres
#[async_trait]
pub trait GenreUsage: Send + Sync {
    fn kind(&self) -> EntityKind;

    async fn uses_genre(&self, genre: EntityId) -> FacadeResult<bool>;
}

/// [`Lookup`] backed directly by a repository
pub struct Existence<T, R> {
    repository: Arc<R>,
    _entity: PhantomData<fn() -> T>,
}

impl<T, R> Existence<T, R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<T: CatalogEntity, R: Repository<T>> Lookup for Existence<T, R> {
    fn kind(&self) -> EntityKind {
        T::KIND
    }

    async fn contains(&self, id: EntityId) -> FacadeResult<bool> {
        Ok(self.repository.exists(id).await?)
    }
}
