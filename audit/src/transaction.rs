//! Audit transaction records.

use chrono::{DateTime, Utc};
use chronicle_core::{DataType, EntityId, TransactionId};
use serde::Serialize;

/// One field-level change snapshot inside an audit transaction.
///
/// Identity is the composite `(transaction_id, entity_id, field_name)`. A row
/// exists only when the field's value actually changed between the pre- and
/// post-mutation snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditTransactionField {
    /// The owning transaction.
    pub transaction_id: TransactionId,
    /// The mutated entity.
    pub entity_id: EntityId,
    /// The changed field.
    pub field_name: String,
    /// The field's declared data type.
    pub data_type: DataType,
    /// String-serialized pre-mutation value; `None` when the field was unset.
    pub old_value: Option<String>,
    /// String-serialized post-mutation value; `None` when the field is unset.
    pub new_value: Option<String>,
}

/// An immutable record of one mutating call: who, when, why, and which
/// fields changed.
///
/// Created once per mutating call that reaches persistence, never updated or
/// deleted by the mutation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditTransaction {
    /// Transaction identifier.
    pub id: TransactionId,
    /// When the mutation was recorded.
    pub timestamp: DateTime<Utc>,
    /// Free-text classification key
    /// (e.g. `"user_update_existing_record"`).
    pub update_reason: String,
    /// The acting user, when the supplied reference resolved.
    pub user: Option<EntityId>,
    /// The calling client system, carried as an opaque identifier.
    pub client: Option<String>,
    /// Field-level change snapshots, in field declaration order.
    pub fields: Vec<AuditTransactionField>,
}

impl AuditTransaction {
    /// Number of field rows in this transaction.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Look up a field row by name.
    pub fn field(&self, name: &str) -> Option<&AuditTransactionField> {
        self.fields.iter().find(|f| f.field_name == name)
    }

    /// True when this transaction touches the given entity.
    pub fn touches(&self, entity_id: EntityId) -> bool {
        self.fields.iter().any(|f| f.entity_id == entity_id)
    }
}
