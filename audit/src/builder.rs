//! Audit transaction construction.

use chrono::Utc;
use chronicle_core::{Entity, EntityId, EntityType, MutationMeta, TransactionId, Value};
use chronicle_registry::Registry;
use chronicle_store::EntityStore;

use crate::transaction::{AuditTransaction, AuditTransactionField};

/// Builds audit transactions from pre/post mutation snapshots.
///
/// A pure function over two snapshots: neither entity is mutated, and
/// construction never fails the primary mutation. An actor reference that is
/// missing, garbled, or unknown degrades to `None` rather than erroring.
pub struct TransactionBuilder<'a> {
    registry: &'a Registry,
    store: &'a EntityStore,
}

impl<'a> TransactionBuilder<'a> {
    /// Create a builder over the given collaborators.
    pub fn new(registry: &'a Registry, store: &'a EntityStore) -> Self {
        Self { registry, store }
    }

    /// Build the transaction for one mutating call.
    ///
    /// With both snapshots absent (pure create) the transaction records actor
    /// and reason with zero field rows. Otherwise the entity's auditable
    /// fields are walked in declaration order; each value inequality between
    /// the snapshots appends a field row (a missing side reads as null).
    pub fn build(
        &self,
        meta: &MutationMeta,
        update_reason: &str,
        before: Option<&Entity>,
        after: Option<&Entity>,
    ) -> AuditTransaction {
        let id = TransactionId::generate();
        let mut transaction = AuditTransaction {
            id,
            timestamp: Utc::now(),
            update_reason: update_reason.to_string(),
            user: self.resolve_user(meta),
            client: meta.client_id.clone(),
            fields: Vec::new(),
        };

        let Some(subject) = after.or(before) else {
            return transaction;
        };
        let entity_id = subject.id;
        let entity_type = subject.entity_type();

        transaction.fields = self.diff_fields(id, entity_id, entity_type, before, after);
        transaction
    }

    fn diff_fields(
        &self,
        transaction_id: TransactionId,
        entity_id: EntityId,
        entity_type: EntityType,
        before: Option<&Entity>,
        after: Option<&Entity>,
    ) -> Vec<AuditTransactionField> {
        let Some(def) = self.registry.entity_def(entity_type) else {
            return Vec::new();
        };

        let mut fields = Vec::new();
        for field_def in def.auditable_fields() {
            let old = snapshot_value(before, &field_def.name);
            let new = snapshot_value(after, &field_def.name);
            if old == new {
                continue;
            }
            fields.push(AuditTransactionField {
                transaction_id,
                entity_id,
                field_name: field_def.name.clone(),
                data_type: field_def.data_type,
                old_value: old.to_plain_string(),
                new_value: new.to_plain_string(),
            });
        }
        fields
    }

    // Bad actor references must not block the mutation being audited.
    fn resolve_user(&self, meta: &MutationMeta) -> Option<EntityId> {
        let id = meta.user_id.as_deref()?.parse::<EntityId>().ok()?;
        let entity = self.store.get(id, false)?;
        if entity.entity_type() == EntityType::User {
            Some(id)
        } else {
            None
        }
    }
}

fn snapshot_value(entity: Option<&Entity>, field: &str) -> Value {
    entity
        .and_then(|e| e.field(field))
        .unwrap_or(Value::Null)
}
