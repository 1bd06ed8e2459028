//! Append-only audit log.

use chronicle_core::{EntityId, TransactionId};

use crate::transaction::{AuditTransaction, AuditTransactionField};

/// In-memory append-only store of audit transactions.
///
/// Entities keep only their *latest* transaction reference; full history is
/// recoverable solely by querying field rows by entity id across all
/// transactions, which is exactly what [`AuditLog::fields_for_entity`] does.
#[derive(Debug, Default)]
pub struct AuditLog {
    /// All recorded transactions, in append order.
    transactions: Vec<AuditTransaction>,
}

impl AuditLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction. Returns its identifier.
    pub fn append(&mut self, transaction: AuditTransaction) -> TransactionId {
        let id = transaction.id;
        self.transactions.push(transaction);
        id
    }

    /// All recorded transactions, in append order.
    pub fn transactions(&self) -> &[AuditTransaction] {
        &self.transactions
    }

    /// Look up a transaction by id.
    pub fn get(&self, id: TransactionId) -> Option<&AuditTransaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Every transaction holding a field row for the given entity, in append
    /// order. Zero-field transactions (pure creates) carry no entity link and
    /// do not appear here.
    pub fn transactions_for_entity(&self, entity_id: EntityId) -> Vec<&AuditTransaction> {
        self.transactions
            .iter()
            .filter(|t| t.touches(entity_id))
            .collect()
    }

    /// Every field row ever recorded for the given entity, across all
    /// transactions, in append order. The audit history recovery path.
    pub fn fields_for_entity(&self, entity_id: EntityId) -> Vec<&AuditTransactionField> {
        self.transactions
            .iter()
            .flat_map(|t| t.fields.iter())
            .filter(|f| f.entity_id == entity_id)
            .collect()
    }

    /// Number of recorded transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Drop all recorded transactions.
    pub fn clear(&mut self) {
        self.transactions.clear();
    }
}
