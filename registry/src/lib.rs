//! Chronicle Metadata Registry
//!
//! Static per-entity-type metadata: scalar field definitions (data type,
//! auditable/mandatory flags, code domains, patterns), relationship
//! definitions (target type, cardinality), and code domains. Built once via
//! [`RegistryBuilder`], immutable afterwards, and consulted by validation,
//! audit diffing, linkage resolution, and query-parameter whitelisting.

mod builder;
mod catalog;
mod registry;
mod types;

pub use builder::{EntityTypeBuilder, RegistryBuilder, RegistryError};
pub use catalog::business_catalog;
pub use registry::Registry;
pub use types::{Cardinality, CodeDomain, EntityDef, FieldDef, RelationshipDef};
