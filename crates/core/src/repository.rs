//! Storage contract for one entity family

use crate::entity::CatalogEntity;
use crate::error::Result;
use crate::types::EntityId;
use async_trait::async_trait;

/// Persistent storage of one entity family
///
/// Lists come back in display order: `(position, id)` within a sibling
/// group, and grouped by parent for [`Repository::list`].
#[async_trait]
pub trait Repository<T: CatalogEntity>: Send + Sync {
    /// Fetches an entity by identity
    async fn get(&self, id: EntityId) -> Result<Option<T>>;

    /// Fetches every entity of the family
    async fn list(&self) -> Result<Vec<T>>;

    /// Fetches one sibling group; `None` selects the top-level group
    async fn siblings(&self, parent: Option<EntityId>) -> Result<Vec<T>>;

    /// Stores a new entity and returns it with its identity assigned
    async fn insert(&self, entity: &T) -> Result<T>;

    /// Rewrites content columns; position and parent are left alone
    async fn update(&self, entity: &T) -> Result<()>;

    /// Deletes the entity and writes the positions of `reordered` in the same transaction
    async fn delete(&self, id: EntityId, reordered: &[T]) -> Result<()>;

    /// Writes positions of the given entities in one transaction
    async fn save_positions(&self, entities: &[T]) -> Result<()>;

    async fn exists(&self, id: EntityId) -> Result<bool>;

    async fn count(&self) -> Result<u64>;

    /// Deletes every entity of the family
    async fn clear(&self) -> Result<()>;
}
