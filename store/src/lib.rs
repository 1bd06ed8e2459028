//! Chronicle Entity Store
//!
//! The persistence collaborator: an in-memory versioned repository holding
//! every business entity, with insertion-order scans for the query executor.
//! The store owns the persistence-side invariants (forced `version = 1` on
//! insert, exact `+1` version bump on update, soft-delete visibility).

mod error;
mod store;

pub use error::{StoreError, StoreResult};
pub use store::EntityStore;
