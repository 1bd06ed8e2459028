//! The shared update pipeline.
//!
//! Delete is not a separate code path: it is this pipeline with the
//! soft-delete flag forced on the working copy, so it produces the same
//! audit transaction and version bump as any other update.

use chronicle_audit::{AuditLog, TransactionBuilder};
use chronicle_core::{ApiError, Entity, EntityId, ErrorCollection};
use chronicle_linkage::LinkageResolver;
use chronicle_registry::Registry;
use chronicle_store::EntityStore;

use crate::ops::create::parse_linkage;
use crate::ops::store_fault;
use crate::payload::MutationPayload;
use crate::validation::{validate_attributes, RuleGroup};

/// Whether the pipeline runs as a plain update or a soft delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UpdateKind {
    Update,
    Delete,
}

/// Update an existing entity: snapshot, validate, resolve, diff, persist.
pub(crate) fn execute_update(
    registry: &Registry,
    store: &mut EntityStore,
    log: &mut AuditLog,
    id: EntityId,
    payload: &MutationPayload,
    kind: UpdateKind,
) -> Result<Entity, ErrorCollection> {
    let Some(before) = store.get(id, false).cloned() else {
        return Err(ErrorCollection::single(ApiError::record_not_found(
            format!("No entity with id '{}'", id),
        )));
    };
    let entity_type = before.entity_type();

    let (attributes, mut errors) = validate_attributes(
        registry,
        entity_type,
        &payload.data.attributes,
        RuleGroup::Update,
    );

    let linkage = parse_linkage(&payload.data.relationships, &mut errors);
    let resolver = LinkageResolver::new(registry, store);
    let slots = match resolver.resolve(entity_type, &linkage) {
        Ok(slots) => slots,
        Err(linkage_errors) => {
            errors.merge(linkage_errors);
            Default::default()
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    // Nothing below can fail validation; the working copy may now diverge
    // from the snapshot.
    let mut working = before.clone();
    for (name, value) in &attributes {
        working.set_field(name, value);
    }
    if kind == UpdateKind::Delete {
        working.deleted = true;
    }
    for (name, slot) in slots {
        working.set_relationship(&name, slot);
    }

    let default_reason = match kind {
        UpdateKind::Update => format!("{}_update_existing_record", entity_type),
        UpdateKind::Delete => format!("{}_delete_existing_record", entity_type),
    };
    let reason = payload.meta.reason_or(&default_reason);
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
