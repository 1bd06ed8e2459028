//! Store error types.

use chronicle_core::EntityId;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An update was attempted against an entity the store never persisted.
    #[error("Entity not persisted: {0}")]
    NotPersisted(EntityId),

    /// An insert collided with an already-persisted identifier.
    #[error("Entity already persisted: {0}")]
    AlreadyPersisted(EntityId),
}

impl StoreError {
    /// The entity is not in the store.
    pub fn not_persisted(id: EntityId) -> Self {
        StoreError::NotPersisted(id)
    }

    /// The entity is already in the store.
    pub fn already_persisted(id: EntityId) -> Self {
        StoreError::AlreadyPersisted(id)
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
