//! Resource-identifier payload shapes.
//!
//! Relationship payloads arrive as JSON resource linkage: a single
//! `{id, type}` object, a list of them, `null`, or an empty list. Ingestion
//! is deliberately lenient: missing keys and unknown strings are carried
//! through as raw text so the resolver can report every problem with a
//! pointer instead of failing deserialization.

use chronicle_core::{EntityId, EntityType};
use serde::Deserialize;

/// A fully validated `{id, type}` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceIdentifier {
    /// The referenced entity.
    pub id: EntityId,
    /// The entity type the reference claims.
    pub entity_type: EntityType,
}

impl ResourceIdentifier {
    /// Create a resource identifier.
    pub fn new(id: EntityId, entity_type: EntityType) -> Self {
        Self { id, entity_type }
    }
}

/// A raw, unvalidated resource identifier as it appears in a payload.
/// Either key may be missing; both are carried as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawIdentifier {
    /// The `id` member, if present.
    pub id: Option<String>,
    /// The `type` member, if present.
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
}

impl RawIdentifier {
    /// Create a raw identifier from both members.
    pub fn new(id: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            entity_type: Some(entity_type.into()),
        }
    }

    /// Build from an id and a typed entity type.
    pub fn of(id: EntityId, entity_type: EntityType) -> Self {
        Self::new(id.to_string(), entity_type.as_str())
    }
}

/// The shape of one relationship's payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkagePayload {
    /// `null`: clear a to-one relationship.
    Null,
    /// A single resource identifier.
    One(RawIdentifier),
    /// A list of resource identifiers (possibly empty).
    Many(Vec<RawIdentifier>),
}

impl LinkagePayload {
    /// Parse a relationship payload from its JSON form. Objects missing
    /// either key still parse (the member lands as `None`); scalars,
    /// non-object list members, and objects with non-string members return
    /// `None` for the resolver to report as invalid data.
    pub fn from_json(json: &serde_json::Value) -> Option<LinkagePayload> {
        match json {
            serde_json::Value::Null => Some(LinkagePayload::Null),
            serde_json::Value::Object(_) => {
                let raw = deserialize_member(json)?;
                Some(LinkagePayload::One(raw))
            }
            serde_json::Value::Array(members) => {
                let mut raws = Vec::with_capacity(members.len());
                for member in members {
                    raws.push(deserialize_member(member)?);
                }
                Some(LinkagePayload::Many(raws))
            }
            _ => None,
        }
    }
}

fn deserialize_member(json: &serde_json::Value) -> Option<RawIdentifier> {
    if !json.is_object() {
        return None;
    }
    serde_json::from_value(json.clone()).ok()
}
