//! Mutation operations.
//!
//! The service delegates to specialized operation modules:
//! - `ops/create.rs` - new-entity creation
//! - `ops/update.rs` - the shared update pipeline (delete is a flagged update)
//! - `ops/members.rs` - relationship-member add/replace/remove

pub(crate) mod create;
pub(crate) mod members;
pub(crate) mod update;

use chronicle_core::{ApiError, ErrorCollection};
use chronicle_store::StoreError;

/// Store faults surface through the expected-failure channel. The only
/// reachable case is an entity disappearing between load and persist, which
/// reads as a missing record to the caller.
pub(crate) fn store_fault(error: StoreError) -> ErrorCollection {
    ErrorCollection::single(ApiError::record_not_found(error.to_string()))
}
