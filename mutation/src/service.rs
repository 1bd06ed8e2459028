//! The mutation service facade.
//!
//! Owns the field registry, the entity store, and the append-only audit log,
//! and exposes the full operation surface: create/update/delete, relationship
//! member mutations, and the read-only query family. Every operation that can
//! fail for an expected reason returns [`ErrorCollection`]; nothing here
//! panics on bad input.

use chronicle_audit::{AuditLog, AuditTransaction};
use chronicle_core::{ApiError, Entity, EntityId, EntityType, ErrorCollection};
use chronicle_query::{execute, translate, FilterClause, Page, QueryResult, SortKey};
use chronicle_registry::{business_catalog, Registry, RegistryError};
use chronicle_store::EntityStore;

use crate::ops::create::execute_create;
use crate::ops::members::{execute_members, MemberOp};
use crate::ops::update::{execute_update, UpdateKind};
use crate::payload::{MutationPayload, RelationshipPayload};

/// Orchestrator over registry, store, and audit log.
pub struct MutationService {
    registry: Registry,
    store: EntityStore,
    log: AuditLog,
}

impl MutationService {
    /// Create a service over an explicit registry and an empty store.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            store: EntityStore::new(),
            log: AuditLog::new(),
        }
    }

    /// Create a service over the built-in business catalog.
    pub fn with_catalog() -> Result<Self, RegistryError> {
        Ok(Self::new(business_catalog()?))
    }

    /// The field and relationship metadata this service enforces.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The underlying entity store.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// The append-only audit log.
    pub fn audit_log(&self) -> &AuditLog {
        &self.log
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Create a new entity from a payload. The persisted entity starts at
    /// `version = 1` with `deleted = false` regardless of payload contents.
    pub fn create(
        &mut self,
        entity_type: EntityType,
        payload: &MutationPayload,
    ) -> Result<Entity, ErrorCollection> {
        execute_create(
            &self.registry,
            &mut self.store,
            &mut self.log,
            entity_type,
            payload,
        )
    }

    /// Update an existing entity. Bumps the persisted version by one and
    /// records an audit transaction over the changed auditable fields.
    pub fn update(
        &mut self,
        id: EntityId,
        payload: &MutationPayload,
    ) -> Result<Entity, ErrorCollection> {
        execute_update(
            &self.registry,
            &mut self.store,
            &mut self.log,
            id,
            payload,
            UpdateKind::Update,
        )
    }

    /// Soft-delete an entity: the same pipeline as [`Self::update`] with the
    /// `deleted` flag forced on the working copy, so the flip is audited and
    /// the version bumps.
    pub fn delete(
        &mut self,
        id: EntityId,
        payload: &MutationPayload,
    ) -> Result<Entity, ErrorCollection> {
        execute_update(
            &self.registry,
            &mut self.store,
            &mut self.log,
            id,
            payload,
            UpdateKind::Delete,
        )
    }

    /// Append members to a collection relationship.
    pub fn add_relationship_members(
        &mut self,
        id: EntityId,
        name: &str,
        payload: &RelationshipPayload,
    ) -> Result<Entity, ErrorCollection> {
        execute_members(
            &self.registry,
            &mut self.store,
            &mut self.log,
            id,
            name,
            payload,
            MemberOp::Add,
        )
    }

    /// Replace a relationship's membership wholesale. For single-cardinality
    /// relationships this sets or clears the reference.
    pub fn replace_relationship_members(
        &mut self,
        id: EntityId,
        name: &str,
        payload: &RelationshipPayload,
    ) -> Result<Entity, ErrorCollection> {
        execute_members(
            &self.registry,
            &mut self.store,
            &mut self.log,
            id,
            name,
            payload,
            MemberOp::Replace,
        )
    }

    /// Remove members from a collection relationship.
    pub fn remove_relationship_members(
        &mut self,
        id: EntityId,
        name: &str,
        payload: &RelationshipPayload,
    ) -> Result<Entity, ErrorCollection> {
        execute_members(
            &self.registry,
            &mut self.store,
            &mut self.log,
            id,
            name,
            payload,
            MemberOp::Remove,
        )
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Load one entity by id. Soft-deleted entities are excluded unless the
    /// caller passes the override flag.
    pub fn find(&self, id: EntityId, include_deleted: bool) -> Result<Entity, ErrorCollection> {
        self.store
            .get(id, include_deleted)
            .cloned()
            .ok_or_else(|| {
                ErrorCollection::single(ApiError::record_not_found(format!(
                    "No entity with id '{}'",
                    id
                )))
            })
    }

    /// List entities of one type through the filter/sort/page pipeline.
    /// Every filter or sort field must come from the type's public-field
    /// set; each violation accumulates a `ValidationInvalidQueryParameter`.
    pub fn all(
        &self,
        entity_type: EntityType,
        filters: &[FilterClause],
        sorts: &[SortKey],
        page: Page,
    ) -> Result<QueryResult, ErrorCollection> {
        let mut errors = ErrorCollection::new();
        for clause in filters {
            if !self.registry.is_public_field(entity_type, &clause.field) {
                errors.push(ApiError::invalid_query_parameter(&clause.field));
            }
        }
        for key in sorts {
            if !self.registry.is_public_field(entity_type, &key.field) {
                errors.push(ApiError::invalid_query_parameter(&key.field));
            }
        }
        errors.into_result(())?;

        let plan = translate(entity_type, filters, sorts, page, false);
        Ok(execute(&plan, &self.store))
    }

    /// Filtered listing without sorting or paging.
    pub fn find_by(
        &self,
        entity_type: EntityType,
        filters: &[FilterClause],
    ) -> Result<Vec<Entity>, ErrorCollection> {
        Ok(self.all(entity_type, filters, &[], Page::none())?.entities)
    }

    /// The first entity matching the filters, in insertion order.
    pub fn find_one_by(
        &self,
        entity_type: EntityType,
        filters: &[FilterClause],
    ) -> Result<Option<Entity>, ErrorCollection> {
        Ok(self.find_by(entity_type, filters)?.into_iter().next())
    }

    /// Term search: OR-combined case-insensitive substring clauses over the
    /// field/term cartesian product, then the usual sort/page pipeline.
    pub fn search(
        &self,
        entity_type: EntityType,
        fields: &[&str],
        terms: &[&str],
        sorts: &[SortKey],
        page: Page,
    ) -> Result<QueryResult, ErrorCollection> {
        let mut clauses = Vec::with_capacity(fields.len() * terms.len());
        for field in fields {
            for term in terms {
                clauses.push(FilterClause::like(*field, *term).or());
            }
        }
        self.all(entity_type, &clauses, sorts, page)
    }

    /// The audit transactions that touched one entity, in append order.
    pub fn history(&self, id: EntityId) -> Vec<&AuditTransaction> {
        self.log.transactions_for_entity(id)
    }
}
