//! Relationship linkage resolution.
//!
//! Validates relationship payloads against declared metadata (name,
//! cardinality, target type), loads the referenced entities, and returns
//! relationship slots ready to merge onto the target entity. Every violation
//! across every supplied relationship and member accumulates into one
//! [`ErrorCollection`] so a single response reports all bad linkage at once.

use std::collections::{BTreeMap, BTreeSet};

use chronicle_core::{ApiError, EntityId, EntityType, ErrorCollection, LinkSlot};
use chronicle_registry::{Cardinality, Registry, RelationshipDef};
use chronicle_store::EntityStore;

use crate::reference::{LinkagePayload, RawIdentifier, ResourceIdentifier};

/// Resolves relationship payloads against the registry and store.
pub struct LinkageResolver<'a> {
    registry: &'a Registry,
    store: &'a EntityStore,
}

impl<'a> LinkageResolver<'a> {
    /// Create a resolver over the given collaborators.
    pub fn new(registry: &'a Registry, store: &'a EntityStore) -> Self {
        Self { registry, store }
    }

    /// Resolve a full relationship map from a create/update payload.
    ///
    /// Undeclared names are [`RelationshipNotAllowed`]: the payload reached
    /// for a relationship the type does not offer.
    ///
    /// [`RelationshipNotAllowed`]: chronicle_core::ErrorCode::RelationshipNotAllowed
    pub fn resolve(
        &self,
        entity_type: EntityType,
        payloads: &BTreeMap<String, LinkagePayload>,
    ) -> Result<BTreeMap<String, LinkSlot>, ErrorCollection> {
        let mut errors = ErrorCollection::new();
        let mut resolved = BTreeMap::new();

        for (name, payload) in payloads {
            let Some(def) = self.registry.relationship_def(entity_type, name) else {
                errors.push(ApiError::relationship_not_allowed(name));
                continue;
            };
            match self.resolve_slot(def, payload) {
                Ok(slot) => {
                    resolved.insert(name.clone(), slot);
                }
                Err(slot_errors) => errors.merge(slot_errors),
            }
        }

        errors.into_result(resolved)
    }

    /// Resolve an **add** shape against one named relationship: the members
    /// to append. Cardinality must be `collection` and the payload a list.
    pub fn resolve_add(
        &self,
        entity_type: EntityType,
        name: &str,
        payload: &LinkagePayload,
    ) -> Result<Vec<EntityId>, ErrorCollection> {
        let def = self.member_relationship(entity_type, name)?;
        self.collection_members(def, payload)
    }

    /// Resolve a **replace** shape against one named relationship: the full
    /// new slot. For `single`, an identifier sets and `null` clears; for
    /// `collection`, a list (possibly empty) fully repopulates.
    pub fn resolve_replace(
        &self,
        entity_type: EntityType,
        name: &str,
        payload: &LinkagePayload,
    ) -> Result<LinkSlot, ErrorCollection> {
        let def = self.member_relationship(entity_type, name)?;
        self.resolve_slot(def, payload)
    }

    /// Resolve a **remove** shape against one named relationship: the members
    /// to delete. Cardinality must be `collection` and the payload a list.
    pub fn resolve_remove(
        &self,
        entity_type: EntityType,
        name: &str,
        payload: &LinkagePayload,
    ) -> Result<Vec<EntityId>, ErrorCollection> {
        let def = self.member_relationship(entity_type, name)?;
        self.collection_members(def, payload)
    }

    // Member operations name one relationship directly, so an unknown name
    // is RelationshipNotFound rather than the payload-map NotAllowed.
    fn member_relationship(
        &self,
        entity_type: EntityType,
        name: &str,
    ) -> Result<&RelationshipDef, ErrorCollection> {
        self.registry
            .relationship_def(entity_type, name)
            .ok_or_else(|| ErrorCollection::single(ApiError::relationship_not_found(name)))
    }

    fn resolve_slot(
        &self,
        def: &RelationshipDef,
        payload: &LinkagePayload,
    ) -> Result<LinkSlot, ErrorCollection> {
        match (def.cardinality, payload) {
            (Cardinality::Single, LinkagePayload::Null) => Ok(LinkSlot::empty_one()),
            (Cardinality::Single, LinkagePayload::One(raw)) => {
                let member = self.resolve_member(def, raw)?;
                Ok(LinkSlot::One(Some(member.id)))
            }
            (Cardinality::Single, LinkagePayload::Many(_)) => Err(ErrorCollection::single(
                ApiError::relationship_invalid_type(
                    &def.name,
                    "Single relationship cannot take a list",
                ),
            )),
            (Cardinality::Collection, LinkagePayload::Many(raws)) => {
                let mut errors = ErrorCollection::new();
                let mut members = BTreeSet::new();
                for raw in raws {
                    match self.resolve_member(def, raw) {
                        Ok(member) => {
                            members.insert(member.id);
                        }
                        Err(member_errors) => errors.merge(member_errors),
                    }
                }
                errors.into_result(LinkSlot::Many(members))
            }
            (Cardinality::Collection, LinkagePayload::One(_)) => Err(ErrorCollection::single(
                ApiError::relationship_invalid_type(
                    &def.name,
                    "Collection relationship requires a list",
                ),
            )),
            // Clearing a collection takes an empty list, never null.
            (Cardinality::Collection, LinkagePayload::Null) => Err(ErrorCollection::single(
                ApiError::relationship_invalid_data(
                    &def.name,
                    "Collection relationship cannot be null; send an empty list to clear",
                ),
            )),
        }
    }

    fn collection_members(
        &self,
        def: &RelationshipDef,
        payload: &LinkagePayload,
    ) -> Result<Vec<EntityId>, ErrorCollection> {
        if def.cardinality != Cardinality::Collection {
            return Err(ErrorCollection::single(ApiError::relationship_invalid_type(
                &def.name,
                "Member operations apply to collection relationships only",
            )));
        }
        match payload {
            LinkagePayload::Many(raws) => {
                let mut errors = ErrorCollection::new();
                let mut members = Vec::new();
                for raw in raws {
                    match self.resolve_member(def, raw) {
                        Ok(member) => members.push(member.id),
                        Err(member_errors) => errors.merge(member_errors),
                    }
                }
                errors.into_result(members)
            }
            LinkagePayload::One(_) => Err(ErrorCollection::single(
                ApiError::relationship_invalid_type(
                    &def.name,
                    "Collection relationship requires a list",
                ),
            )),
            LinkagePayload::Null => Err(ErrorCollection::single(
                ApiError::relationship_invalid_data(
                    &def.name,
                    "Collection relationship cannot be null; send an empty list to clear",
                ),
            )),
        }
    }

    /// Validate one resource identifier and load its entity. Soft-deleted
    /// targets are invisible here: a reference to one is a missing record.
    fn resolve_member(
        &self,
        def: &RelationshipDef,
        raw: &RawIdentifier,
    ) -> Result<ResourceIdentifier, ErrorCollection> {
        let mut errors = ErrorCollection::new();

        let id_text = raw.id.as_deref();
        let type_text = raw.entity_type.as_deref();
        if id_text.is_none() || type_text.is_none() {
            errors.push(ApiError::relationship_invalid_data(
                &def.name,
                "Resource identifier requires both 'id' and 'type'",
            ));
            return Err(errors);
        }

        let type_text = type_text.unwrap_or_default();
        if type_text != def.target.as_str() {
            errors.push(ApiError::relationship_invalid_entity_type(
                &def.name,
                def.target.as_str(),
                type_text,
            ));
        }

        let id_text = id_text.unwrap_or_default();
        match id_text.parse::<EntityId>() {
            Ok(id) if self.store.get(id, false).is_some() => {
                errors.into_result(ResourceIdentifier::new(id, def.target))
            }
            // A malformed id cannot name a record any more than an unknown
            // one can.
            _ => {
                errors.push(ApiError::record_not_found(format!(
                    "No {} with id '{}'",
                    def.target, id_text
                )));
                Err(errors)
            }
        }
    }
}
