//! Chronicle Mutation Service
//!
//! The orchestrator crate: [`MutationService`] wires the field registry, the
//! versioned entity store, the linkage resolver, the audit-transaction
//! builder, and the query engine into one operation surface. Mutating calls
//! run validate → resolve → diff → persist synchronously; nothing is written
//! unless validation and linkage resolution both succeed.

mod ops;
mod payload;
mod service;
mod validation;

pub use payload::{MutationPayload, PayloadData, RelationshipPayload};
pub use service::MutationService;
pub use validation::{validate_attributes, RuleGroup};
