//! Relationship-member mutations.
//!
//! Add, replace, and remove against one named relationship of an existing
//! entity. Relationships are not auditable fields, so the transaction these
//! produce carries zero field rows; the version bump and actor record still
//! apply.

use chronicle_audit::{AuditLog, TransactionBuilder};
use chronicle_core::{ApiError, Entity, EntityId, ErrorCollection, LinkSlot};
use chronicle_linkage::{LinkagePayload, LinkageResolver};
use chronicle_registry::Registry;
use chronicle_store::EntityStore;

use crate::ops::store_fault;
use crate::payload::RelationshipPayload;

/// The three member-mutation shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MemberOp {
    /// Append members not already present (collection only).
    Add,
    /// Clear then fully repopulate, or set/clear for single.
    Replace,
    /// Delete the specified members (collection only).
    Remove,
}

/// Apply one member mutation to a named relationship.
pub(crate) fn execute_members(
    registry: &Registry,
    store: &mut EntityStore,
    log: &mut AuditLog,
    id: EntityId,
    name: &str,
    payload: &RelationshipPayload,
    op: MemberOp,
) -> Result<Entity, ErrorCollection> {
    let Some(before) = store.get(id, false).cloned() else {
        return Err(ErrorCollection::single(ApiError::record_not_found(
            format!("No entity with id '{}'", id),
        )));
    };
    let entity_type = before.entity_type();

    let Some(linkage) = LinkagePayload::from_json(&payload.data) else {
        return Err(ErrorCollection::single(ApiError::relationship_invalid_data(
            name,
            "Malformed resource linkage",
        )));
    };

    let resolver = LinkageResolver::new(registry, store);
    let mut working = before.clone();

    match op {
        MemberOp::Add => {
            let members = resolver.resolve_add(entity_type, name, &linkage)?;
            let mut slot = current_many(&working, name)?;
            slot.extend(members);
            working.set_relationship(name, LinkSlot::Many(slot));
        }
        MemberOp::Replace => {
            let slot = resolver.resolve_replace(entity_type, name, &linkage)?;
            working.set_relationship(name, slot);
        }
        MemberOp::Remove => {
            let members = resolver.resolve_remove(entity_type, name, &linkage)?;
            let mut slot = current_many(&working, name)?;
            for member in members {
                slot.remove(&member);
            }
            working.set_relationship(name, LinkSlot::Many(slot));
        }
    }

    let reason = payload
        .meta
        .reason_or(&format!("{}_update_existing_record", entity_type));
    let transaction = TransactionBuilder::new(registry, store).build(
        &payload.meta,
        &reason,
        Some(&before),
        Some(&working),
    );

    working.transaction = transaction.id;
    let persisted = store.update(working).map_err(store_fault)?.clone();
    log.append(transaction);
    Ok(persisted)
}

// The resolver already enforced collection cardinality; a One slot here
// would mean registry metadata and the typed body disagree.
fn current_many(
    entity: &Entity,
    name: &str,
) -> Result<std::collections::BTreeSet<EntityId>, ErrorCollection> {
    match entity.relationship(name) {
        Some(LinkSlot::Many(set)) => Ok(set),
        _ => Err(ErrorCollection::single(ApiError::relationship_not_found(
            name,
        ))),
    }
}
