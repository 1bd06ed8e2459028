//! In-memory entity storage with versioned-repository semantics.

use chronicle_core::{Entity, EntityId, EntityType};
use std::collections::HashMap;

use crate::error::{StoreError, StoreResult};

/// The versioned entity repository.
///
/// Enforces the persistence-side invariants regardless of what the incoming
/// record claims: `insert` forces `version = 1, deleted = false`, `update`
/// bumps the *persisted* version by exactly 1. Version handling is
/// last-writer-wins: there is no compare-and-swap against an expected
/// version, so interleaved updates to one entity can overwrite each other.
#[derive(Debug, Default)]
pub struct EntityStore {
    /// Entity storage.
    entities: HashMap<EntityId, Entity>,
    /// Insertion order, for deterministic scans.
    order: Vec<EntityId>,
}

impl EntityStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist a new entity. The stored record always starts at
    /// `version = 1, deleted = false`, whatever the input carries.
    pub fn insert(&mut self, mut entity: Entity) -> StoreResult<&Entity> {
        if self.entities.contains_key(&entity.id) {
            return Err(StoreError::already_persisted(entity.id));
        }
        entity.version = 1;
        entity.deleted = false;

        let id = entity.id;
        self.order.push(id);
        self.entities.insert(id, entity);
        Ok(&self.entities[&id])
    }

    /// Persist an updated copy of an existing entity. The stored version is
    /// the previously persisted version plus exactly 1; any version on the
    /// incoming copy is ignored.
    pub fn update(&mut self, mut entity: Entity) -> StoreResult<&Entity> {
        let persisted = self
            .entities
            .get(&entity.id)
            .ok_or(StoreError::NotPersisted(entity.id))?;
        entity.version = persisted.version + 1;

        let id = entity.id;
        self.entities.insert(id, entity);
        Ok(&self.entities[&id])
    }

    /// Look up an entity by id. Soft-deleted entities are hidden unless
    /// `include_deleted` is set.
    pub fn get(&self, id: EntityId, include_deleted: bool) -> Option<&Entity> {
        self.entities
            .get(&id)
            .filter(|e| include_deleted || !e.deleted)
    }

    /// True when the id is persisted (soft-deleted included).
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// All entities of a type, in insertion order. Soft-deleted entities are
    /// excluded unless `include_deleted` is set.
    pub fn scan(&self, entity_type: EntityType, include_deleted: bool) -> Vec<&Entity> {
        self.order
            .iter()
            .filter_map(|id| self.entities.get(id))
            .filter(|e| e.entity_type() == entity_type)
            .filter(|e| include_deleted || !e.deleted)
            .collect()
    }

    /// Number of persisted entities (soft-deleted included).
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True when nothing is persisted.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
