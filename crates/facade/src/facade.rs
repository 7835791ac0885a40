//! Generic facade over one entity family
//!
//! A facade checks arguments, validates content, resolves references and
//! then drives the ordering operations against its repository. Checks run
//! in that order, so a malformed identifier is reported before any storage
//! access happens.

use crate::collaborators::{ChildCopier, Existence, GenreUsage, Lookup};
use crate::error::{FacadeError, FacadeResult};
use async_trait::async_trait;
use catalog_core::ordering::{self, Direction};
use catalog_core::{CatalogEntity, EntityId, EntityKind, Repository, ValidationRules};
use log::{debug, info};
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Public operations for one entity family
///
/// Mutations are serialized through a per-facade lock, so two reorders of
/// the same sibling group never interleave their reads and writes.
pub struct Facade<T, R> {
    repository: Arc<R>,
    rules: ValidationRules,
    parents: Option<Arc<dyn Lookup>>,
    genres: Option<Arc<dyn Lookup>>,
    children: Vec<Arc<dyn ChildCopier>>,
    genre_users: Vec<Arc<dyn GenreUsage>>,
    write_lock: Mutex<()>,
    _entity: PhantomData<fn() -> T>,
}

impl<T, R> Facade<T, R>
where
    T: CatalogEntity,
    R: Repository<T> + 'static,
{
    pub fn new(repository: Arc<R>, rules: ValidationRules) -> Self {
        Self {
            repository,
            rules,
            parents: None,
            genres: None,
            children: Vec::new(),
            genre_users: Vec::new(),
            write_lock: Mutex::new(()),
            _entity: PhantomData,
        }
    }

    /// Checks parent references of new entities against `lookup`
    pub fn with_parents(mut self, lookup: Arc<dyn Lookup>) -> Self {
        self.parents = Some(lookup);
        self
    }

    /// Checks genre references against `lookup`
    pub fn with_genres(mut self, lookup: Arc<dyn Lookup>) -> Self {
        self.genres = Some(lookup);
        self
    }

    /// Copies children through `copier` whenever an entity is duplicated
    pub fn with_children(mut self, copier: Arc<dyn ChildCopier>) -> Self {
        self.children.push(copier);
        self
    }

    /// Refuses to remove entities still referenced by `usage`
    pub fn with_genre_usage(mut self, usage: Arc<dyn GenreUsage>) -> Self {
        self.genre_users.push(usage);
        self
    }

    pub fn kind(&self) -> EntityKind {
        T::KIND
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Existence check other facades can use as a parent or genre lookup
    pub fn lookup(&self) -> Arc<dyn Lookup> {
        Arc::new(Existence::<T, R>::new(Arc::clone(&self.repository)))
    }

    pub async fn get(&self, id: EntityId) -> FacadeResult<T> {
        check_id(id, "id")?;
        self.load(id).await
    }

    /// Every entity of the family, grouped by parent and in display order
    pub async fn list(&self) -> FacadeResult<Vec<T>> {
        Ok(self.repository.list().await?)
    }

    /// Children of one parent in display order
    pub async fn list_in(&self, parent: EntityId) -> FacadeResult<Vec<T>> {
        if T::KIND.is_top_level() {
            return Err(FacadeError::InvalidArgument(format!(
                "{} entries do not belong to a parent",
                T::KIND
            )));
        }
        check_id(parent, "parent")?;
        self.ensure_parent_exists(parent).await?;

        Ok(self.repository.siblings(Some(parent)).await?)
    }

    /// Stores a new entity at the end of its sibling group
    pub async fn add(&self, mut entity: T) -> FacadeResult<T> {
        check_references(&entity)?;
        if let Some(id) = entity.id() {
            return Err(FacadeError::validation(format!(
                "{} {} has already been added",
                T::KIND,
                id
            )));
        }
        self.validate(&entity)?;
        if let Some(parent) = entity.parent() {
            self.ensure_parent_exists(parent).await?;
        }
        self.ensure_genres_exist(&entity).await?;

        let _guard = self.write_lock.lock().await;
        let siblings = self.repository.siblings(entity.parent()).await?;
        ordering::append(&siblings, &mut entity)?;
        let stored = self.repository.insert(&entity).await?;

        info!(
            "Added {} {} at position {}",
            T::KIND,
            display_id(stored.id()),
            stored.position()
        );
        Ok(stored)
    }

    /// Rewrites content; position and parent keep their stored values
    pub async fn update(&self, mut entity: T) -> FacadeResult<()> {
        let id = entity.id().ok_or_else(|| {
            FacadeError::validation(format!("{} has not been added yet", T::KIND))
        })?;
        check_id(id, "id")?;
        check_references(&entity)?;
        self.validate(&entity)?;
        self.ensure_genres_exist(&entity).await?;

        let _guard = self.write_lock.lock().await;
        let stored = self.load(id).await?;
        entity.set_position(stored.position());
        if let Some(parent) = stored.parent() {
            entity.set_parent(parent);
        }
        self.repository.update(&entity).await?;

        debug!("Updated {} {}", T::KIND, id);
        Ok(())
    }

    /// Deletes the entity and closes the gap in its sibling group
    pub async fn remove(&self, id: EntityId) -> FacadeResult<()> {
        check_id(id, "id")?;

        let _guard = self.write_lock.lock().await;
        let stored = self.load(id).await?;
        self.ensure_unused(id).await?;

        let mut siblings = self.repository.siblings(stored.parent()).await?;
        let removal = ordering::remove(&mut siblings, id)?;
        let moved: Vec<T> = removal
            .changed
            .iter()
            .map(|&index| siblings[index].clone())
            .collect();
        self.repository.delete(id, &moved).await?;

        info!(
            "Removed {} {}, {} sibling(s) moved up",
            T::KIND,
            id,
            moved.len()
        );
        Ok(())
    }

    /// Copies the entity, and its children, to the end of its sibling group
    pub async fn duplicate(&self, id: EntityId) -> FacadeResult<T> {
        check_id(id, "id")?;

        let _guard = self.write_lock.lock().await;
        let stored = self.load(id).await?;
        let siblings = self.repository.siblings(stored.parent()).await?;
        let copy = ordering::duplicate(&siblings, &stored)?;
        let inserted = self.repository.insert(&copy).await?;

        if let Some(copy_id) = inserted.id() {
            for copier in &self.children {
                copier.copy_children(id, copy_id).await?;
            }
        }

        info!(
            "Duplicated {} {} as {}",
            T::KIND,
            id,
            display_id(inserted.id())
        );
        Ok(inserted)
    }

    pub async fn move_up(&self, id: EntityId) -> FacadeResult<()> {
        self.shift(id, Direction::Up).await
    }

    pub async fn move_down(&self, id: EntityId) -> FacadeResult<()> {
        self.shift(id, Direction::Down).await
    }

    pub async fn exists(&self, id: EntityId) -> FacadeResult<bool> {
        check_id(id, "id")?;
        Ok(self.repository.exists(id).await?)
    }

    pub async fn count(&self) -> FacadeResult<u64> {
        Ok(self.repository.count().await?)
    }

    /// Rewrites every sibling group to contiguous positions
    ///
    /// Returns how many entities changed position.
    pub async fn update_positions(&self) -> FacadeResult<usize> {
        let _guard = self.write_lock.lock().await;
        let mut all = self.repository.list().await?;
        let changed = ordering::resequence_all(&mut all);
        let repaired: Vec<T> = changed.iter().map(|&index| all[index].clone()).collect();
        self.repository.save_positions(&repaired).await?;

        if !repaired.is_empty() {
            info!("Repaired {} {} position(s)", repaired.len(), T::KIND);
        }
        Ok(repaired.len())
    }

    /// Deletes every entity of the family
    pub async fn clear(&self) -> FacadeResult<()> {
        let _guard = self.write_lock.lock().await;
        self.repository.clear().await?;

        info!("Cleared all {} entries", T::KIND);
        Ok(())
    }

    async fn shift(&self, id: EntityId, direction: Direction) -> FacadeResult<()> {
        check_id(id, "id")?;

        let _guard = self.write_lock.lock().await;
        let stored = self.load(id).await?;
        let mut siblings = self.repository.siblings(stored.parent()).await?;
        let changed = match direction {
            Direction::Up => ordering::move_up(&mut siblings, id)?,
            Direction::Down => ordering::move_down(&mut siblings, id)?,
        };
        let updates: Vec<T> = changed.iter().map(|&i| siblings[i].clone()).collect();
        self.repository.save_positions(&updates).await?;

        debug!("Moved {} {} {}", T::KIND, id, direction);
        Ok(())
    }

    async fn load(&self, id: EntityId) -> FacadeResult<T> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| FacadeError::not_found(T::KIND, id))
    }

    fn validate(&self, entity: &T) -> FacadeResult<()> {
        entity.validate(&self.rules).map_err(FacadeError::Validation)
    }

    async fn ensure_parent_exists(&self, parent: EntityId) -> FacadeResult<()> {
        if let Some(lookup) = &self.parents {
            if !lookup.contains(parent).await? {
                return Err(FacadeError::not_found(lookup.kind(), parent));
            }
        }
        Ok(())
    }

    async fn ensure_genres_exist(&self, entity: &T) -> FacadeResult<()> {
        if let Some(lookup) = &self.genres {
            for &genre in entity.genres() {
                if !lookup.contains(genre).await? {
                    return Err(FacadeError::not_found(lookup.kind(), genre));
                }
            }
        }
        Ok(())
    }

    async fn ensure_unused(&self, id: EntityId) -> FacadeResult<()> {
        for usage in &self.genre_users {
            if usage.uses_genre(id).await? {
                return Err(FacadeError::validation(format!(
                    "{} {} is still used by a {} entry",
                    T::KIND,
                    id,
                    usage.kind()
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<T, R> ChildCopier for Facade<T, R>
where
    T: CatalogEntity,
    R: Repository<T> + 'static,
{
    async fn copy_children(&self, source: EntityId, target: EntityId) -> FacadeResult<usize> {
        let _guard = self.write_lock.lock().await;
        let children = self.repository.siblings(Some(source)).await?;

        for (position, child) in children.iter().enumerate() {
            let mut copy = child.clone();
            copy.set_id(None);
            copy.set_parent(target);
            copy.set_position(position as u32);
            let inserted = self.repository.insert(&copy).await?;

            if let (Some(from), Some(to)) = (child.id(), inserted.id()) {
                for copier in &self.children {
                    copier.copy_children(from, to).await?;
                }
            }
        }

        debug!(
            "Copied {} {} entries from {} to {}",
            children.len(),
            T::KIND,
            source,
            target
        );
        Ok(children.len())
    }
}

#[async_trait]
impl<T, R> GenreUsage for Facade<T, R>
where
    T: CatalogEntity,
    R: Repository<T> + 'static,
{
    fn kind(&self) -> EntityKind {
        T::KIND
    }

    async fn uses_genre(&self, genre: EntityId) -> FacadeResult<bool> {
        let entries = self.repository.list().await?;
        Ok(entries.iter().any(|entry| entry.genres().contains(&genre)))
    }
}

fn check_id(id: EntityId, argument: &str) -> FacadeResult<()> {
    if id.is_well_formed() {
        Ok(())
    } else {
        Err(FacadeError::InvalidArgument(format!(
            "{} must be a positive identifier, got {}",
            argument, id
        )))
    }
}

/// Parent and genre references must at least be well-formed identifiers
fn check_references<T: CatalogEntity>(entity: &T) -> FacadeResult<()> {
    if let Some(parent) = entity.parent() {
        check_id(parent, "parent")?;
    }
    entity
        .genres()
        .iter()
        .try_for_each(|&genre| check_id(genre, "genre"))
}

fn display_id(id: Option<EntityId>) -> String {
    id.map_or_else(|| "-".to_string(), |id| id.to_string())
}
