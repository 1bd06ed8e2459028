//! Entity creation.

use std::collections::BTreeMap;

use chronicle_audit::{AuditLog, TransactionBuilder};
use chronicle_core::{ApiError, Entity, EntityBody, EntityType, ErrorCollection};
use chronicle_linkage::{LinkagePayload, LinkageResolver};
use chronicle_registry::Registry;
use chronicle_store::EntityStore;

use crate::ops::store_fault;
use crate::payload::MutationPayload;
use crate::validation::{validate_attributes, RuleGroup};

/// Create a new entity from a payload.
///
/// Attribute validation and relationship resolution both run to completion
/// before anything persists, so one response carries every violation. On
/// success the entity lands at `version = 1, deleted = false` with its
/// creation transaction attached.
pub(crate) fn execute_create(
    registry: &Registry,
    store: &mut EntityStore,
    log: &mut AuditLog,
    entity_type: EntityType,
    payload: &MutationPayload,
) -> Result<Entity, ErrorCollection> {
    let (attributes, mut errors) = validate_attributes(
        registry,
        entity_type,
        &payload.data.attributes,
        RuleGroup::Create,
    );

    let linkage = parse_linkage(&payload.data.relationships, &mut errors);
    let resolver = LinkageResolver::new(registry, store);
    let slots = match resolver.resolve(entity_type, &linkage) {
        Ok(slots) => slots,
        Err(linkage_errors) => {
            errors.merge(linkage_errors);
            BTreeMap::new()
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    // A pure create diffs nothing; the transaction records actor and reason.
    let reason = payload
        .meta
        .reason_or(&format!("{}_create_new_record", entity_type));
    let transaction = TransactionBuilder::new(registry, store).build(
        &payload.meta,
        &reason,
        None,
        None,
    );

    let mut entity = Entity::new(EntityBody::empty(entity_type), transaction.id);
    for (name, value) in &attributes {
        entity.set_field(name, value);
    }
    for (name, slot) in slots {
        entity.set_relationship(&name, slot);
    }

    let persisted = store.insert(entity).map_err(store_fault)?.clone();
    log.append(transaction);
    Ok(persisted)
}

/// Parse each relationship's raw JSON linkage, reporting malformed shapes
/// without dropping the rest of the map.
pub(crate) fn parse_linkage(
    relationships: &BTreeMap<String, serde_json::Value>,
    errors: &mut ErrorCollection,
) -> BTreeMap<String, LinkagePayload> {
    let mut linkage = BTreeMap::new();
    for (name, json) in relationships {
        match LinkagePayload::from_json(json) {
            Some(payload) => {
                linkage.insert(name.clone(), payload);
            }
            None => errors.push(ApiError::relationship_invalid_data(
                name,
                "Malformed resource linkage",
            )),
        }
    }
    linkage
}
