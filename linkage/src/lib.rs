//! Chronicle Relationship Linkage
//!
//! Resource-identifier payload ingestion and the linkage resolver: validates
//! relationship payloads against declared metadata, loads referenced
//! entities, and produces relationship slots ready to merge onto an entity.
//! All violations accumulate; resolution never stops at the first failure.

mod reference;
mod resolver;

pub use reference::{LinkagePayload, RawIdentifier, ResourceIdentifier};
pub use resolver::LinkageResolver;
