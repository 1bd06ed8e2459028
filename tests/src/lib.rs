//! Shared fixtures for the end-to-end suites.
//!
//! Payload builders and seeding helpers over a [`MutationService`] backed by
//! the seeded business catalog. Helpers panic on failure; they exist so the
//! suites can state their preconditions in one line.

use chronicle_core::{Entity, EntityId, EntityType};
use chronicle_mutation::{MutationPayload, MutationService};
use serde_json::json;

/// Everything a suite typically needs in one import.
pub mod prelude {
    pub use chronicle_core::{
        Entity, EntityId, EntityType, ErrorCode, LinkSlot, MutationMeta, Value,
    };
    pub use chronicle_mutation::{MutationPayload, MutationService, RelationshipPayload};
    pub use chronicle_query::{FilterClause, FilterOp, FilterValue, Page, SortKey};
    pub use serde_json::json;

    pub use crate::{
        account_payload, create_account, create_person, create_tag, create_user, identifier,
        person_payload, service, tag_payload, user_payload,
    };
}

/// A service over the seeded business catalog and an empty store.
pub fn service() -> MutationService {
    MutationService::with_catalog().unwrap()
}

/// A valid User create payload.
pub fn user_payload(username: &str) -> MutationPayload {
    MutationPayload::new()
        .attribute("username", json!(username))
        .attribute("timezone_code", json!("UTC"))
        .attribute("locale_code", json!("en_US"))
}

/// A valid Person create payload.
pub fn person_payload(first_name: &str, last_name: &str) -> MutationPayload {
    MutationPayload::new()
        .attribute("first_name", json!(first_name))
        .attribute("last_name", json!(last_name))
}

/// A valid Account create payload.
pub fn account_payload(name: &str) -> MutationPayload {
    MutationPayload::new().attribute("name", json!(name))
}

/// A valid Tag create payload.
pub fn tag_payload(label: &str) -> MutationPayload {
    MutationPayload::new().attribute("label", json!(label))
}

/// A resource identifier document: `{"id": .., "type": ..}`.
pub fn identifier(id: EntityId, entity_type: EntityType) -> serde_json::Value {
    json!({"id": id.to_string(), "type": entity_type.as_str()})
}

/// Seed a User.
pub fn create_user(svc: &mut MutationService, username: &str) -> Entity {
    svc.create(EntityType::User, &user_payload(username)).unwrap()
}

/// Seed a Person.
pub fn create_person(svc: &mut MutationService, first_name: &str, last_name: &str) -> Entity {
    svc.create(EntityType::Person, &person_payload(first_name, last_name))
        .unwrap()
}

/// Seed an Account.
pub fn create_account(svc: &mut MutationService, name: &str) -> Entity {
    svc.create(EntityType::Account, &account_payload(name)).unwrap()
}

/// Seed a Tag.
pub fn create_tag(svc: &mut MutationService, label: &str) -> Entity {
    svc.create(EntityType::Tag, &tag_payload(label)).unwrap()
}
