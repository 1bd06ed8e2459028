//! Chronicle Audit Trail
//!
//! Field-level audit capture: the [`AuditTransaction`] record (who, when,
//! why, which fields changed), the [`TransactionBuilder`] computing pure
//! diffs over pre/post mutation snapshots, and the append-only [`AuditLog`]
//! with the by-entity history queries the audit contract depends on.

mod builder;
mod log;
mod transaction;

pub use builder::TransactionBuilder;
pub use log::AuditLog;
pub use transaction::{AuditTransaction, AuditTransactionField};
