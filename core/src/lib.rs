//! Chronicle Core Types
//!
//! This crate provides the foundational types used throughout the chronicle
//! system:
//! - Identity types (EntityId, TransactionId, EntityType)
//! - Value types (the Value enum and the declared DataType vocabulary)
//! - Entity structures (the Entity envelope, typed variant bodies, link slots)
//! - The expected-failure vocabulary (ErrorCode, ApiError, ErrorCollection)
//! - The actor context attached to mutating calls

mod entity;
mod error;
mod id;
mod meta;
mod value;

pub use entity::*;
pub use error::*;
pub use id::*;
pub use meta::*;
pub use value::*;
